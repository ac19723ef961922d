use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError, DoctorFilters};
use crate::services::{availability::AvailabilityService, doctor::DoctorService};

#[derive(Debug, Deserialize)]
pub struct ListDoctorsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub department: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
}

fn map_doctor_error(error: DoctorError) -> AppError {
    match error {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::EmailExists(_) => {
            AppError::Conflict("Doctor with this email already exists".to_string())
        }
        DoctorError::InvalidDate(_) | DoctorError::PastDate => {
            AppError::BadRequest(error.to_string())
        }
        DoctorError::Validation(msg) => AppError::ValidationError(msg),
        DoctorError::Storage(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create_doctor(request)
        .await
        .map_err(map_doctor_error)?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<ListDoctorsQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let filters = DoctorFilters {
        department: query.department,
        specialization: query.specialization,
    };

    let page = doctor_service
        .list_doctors(filters, query.skip.unwrap_or(0), query.limit.unwrap_or(100))
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "doctors": page.doctors,
        "total": page.total
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get_doctor(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let availability = availability_service
        .check_availability(doctor_id, &query.date)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(availability)))
}

#[axum::debug_handler]
pub async fn get_doctor_department(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let department = doctor_service
        .get_department(doctor_id)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "department": department
    })))
}
