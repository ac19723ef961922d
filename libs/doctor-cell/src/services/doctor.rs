use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_utils::validation::{is_non_empty, is_valid_email};

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, DoctorFilters, DoctorPage, Pagination};
use crate::repository::{DoctorRepository, SupabaseDoctorRepository};

pub struct DoctorService {
    repository: Arc<dyn DoctorRepository>,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            repository: Arc::new(SupabaseDoctorRepository::new(config)),
        }
    }

    pub fn with_repository(repository: Arc<dyn DoctorRepository>) -> Self {
        Self { repository }
    }

    /// Create a new doctor record
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Creating new doctor record for: {}", request.email);

        validate_create(&request)?;

        let existing = self
            .repository
            .find_by_email(&request.email)
            .await
            .map_err(storage)?;

        if existing.is_some() {
            warn!("Doctor with email {} already exists", request.email);
            return Err(DoctorError::EmailExists(request.email));
        }

        let doctor = self.repository.create(&request).await.map_err(storage)?;

        info!(
            "Doctor created with ID {} ({})",
            doctor.doctor_id, doctor.name
        );
        Ok(doctor)
    }

    /// List doctors in insertion order, with optional equality filters and
    /// offset/limit pagination. The returned total counts every matching
    /// record, not just the page.
    pub async fn list_doctors(
        &self,
        filters: DoctorFilters,
        skip: i64,
        limit: i64,
    ) -> Result<DoctorPage, DoctorError> {
        let page = Pagination::clamped(skip, limit);

        let (doctors, total) = self
            .repository
            .list(&filters, page)
            .await
            .map_err(storage)?;

        debug!("Doctors retrieved: total={} returned={}", total, doctors.len());
        Ok(DoctorPage { doctors, total })
    }

    /// Get doctor by ID
    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        let doctor = self
            .repository
            .find_by_id(doctor_id)
            .await
            .map_err(storage)?;

        match doctor {
            Some(doctor) => Ok(doctor),
            None => {
                warn!("Doctor not found: {}", doctor_id);
                Err(DoctorError::NotFound)
            }
        }
    }

    /// Get a doctor's department (used by other services for validation)
    pub async fn get_department(&self, doctor_id: i64) -> Result<String, DoctorError> {
        let doctor = self.get_doctor(doctor_id).await?;
        Ok(doctor.department)
    }
}

fn validate_create(request: &CreateDoctorRequest) -> Result<(), DoctorError> {
    if !is_non_empty(&request.name) {
        return Err(DoctorError::Validation("name must not be empty".to_string()));
    }
    if !is_valid_email(&request.email) {
        return Err(DoctorError::Validation(format!(
            "{} is not a valid email address",
            request.email
        )));
    }
    if !is_non_empty(&request.phone) {
        return Err(DoctorError::Validation("phone must not be empty".to_string()));
    }
    if !is_non_empty(&request.department) {
        return Err(DoctorError::Validation(
            "department must not be empty".to_string(),
        ));
    }
    if !is_non_empty(&request.specialization) {
        return Err(DoctorError::Validation(
            "specialization must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn storage(error: anyhow::Error) -> DoctorError {
    DoctorError::Storage(error.to_string())
}
