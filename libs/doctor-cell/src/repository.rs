use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateDoctorRequest, Doctor, DoctorFilters, Pagination};

/// Store access for doctor records. The directory service only ever talks to
/// this trait, so tests can swap the Supabase-backed implementation for an
/// in-memory one.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn create(&self, request: &CreateDoctorRequest) -> Result<Doctor>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>>;
    async fn find_by_id(&self, doctor_id: i64) -> Result<Option<Doctor>>;
    async fn list(&self, filters: &DoctorFilters, page: Pagination) -> Result<(Vec<Doctor>, u64)>;
}

pub struct SupabaseDoctorRepository {
    supabase: SupabaseClient,
}

impl SupabaseDoctorRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl DoctorRepository for SupabaseDoctorRepository {
    async fn create(&self, request: &CreateDoctorRequest) -> Result<Doctor> {
        debug!("Inserting doctor record for: {}", request.email);

        let doctor_data = json!({
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "department": request.department,
            "specialization": request.specialization,
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/doctors",
                Some(doctor_data),
                Some(headers),
            )
            .await?;

        if result.is_empty() {
            return Err(anyhow!("Failed to create doctor record"));
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())?;
        Ok(doctor)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>> {
        let path = format!("/rest/v1/doctors?email=eq.{}&limit=1", email);
        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        match result.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, doctor_id: i64) -> Result<Option<Doctor>> {
        let path = format!("/rest/v1/doctors?doctor_id=eq.{}", doctor_id);
        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        match result.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filters: &DoctorFilters, page: Pagination) -> Result<(Vec<Doctor>, u64)> {
        // Insertion order is id order: doctor_id is assigned by the store.
        let mut query_parts = vec!["order=doctor_id.asc".to_string()];

        if let Some(ref department) = filters.department {
            query_parts.push(format!("department=eq.{}", department));
        }
        if let Some(ref specialization) = filters.specialization {
            query_parts.push(format!("specialization=eq.{}", specialization));
        }

        query_parts.push(format!("offset={}", page.skip));
        query_parts.push(format!("limit={}", page.limit));

        let path = format!("/rest/v1/doctors?{}", query_parts.join("&"));
        let (rows, total): (Vec<Value>, u64) = self.supabase.request_with_count(&path).await?;

        let doctors = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Doctor>, _>>()?;

        Ok((doctors, total))
    }
}
