use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub specialization: String,
}

/// Equality filters for the directory listing. A missing filter places no
/// restriction on that field; supplying both intersects them.
#[derive(Debug, Clone, Default)]
pub struct DoctorFilters {
    pub department: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Pagination {
    /// Clamp raw query values into the supported window.
    pub fn clamped(skip: i64, limit: i64) -> Self {
        Self {
            skip: skip.max(0),
            limit: limit.clamp(1, 100),
        }
    }
}

/// One page of the directory plus the total count of records matching the
/// filters, independent of pagination.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorPage {
    pub doctors: Vec<Doctor>,
    pub total: u64,
}

/// A computed appointment window. Never persisted; produced fresh on every
/// availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Daily open/close boundary and slot length used to generate slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicHours {
    pub open_hour: u32,
    pub close_hour: u32,
    pub slot_duration_minutes: u32,
}

impl Default for ClinicHours {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 18,
            slot_duration_minutes: 30,
        }
    }
}

impl ClinicHours {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            open_hour: config.clinic_open_hour,
            close_hour: config.clinic_close_hour,
            slot_duration_minutes: config.slot_duration_minutes,
        }
    }

    pub fn as_response(&self) -> ClinicHoursResponse {
        ClinicHoursResponse {
            start: format!("{}:00", self.open_hour),
            end: format!("{}:00", self.close_hour),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicHoursResponse {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub doctor_id: i64,
    pub date: String,
    pub available_slots: Vec<Slot>,
    pub clinic_hours: ClinicHoursResponse,
}

// Error types specific to doctor operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    NotFound,
    EmailExists(String),
    InvalidDate(String),
    PastDate,
    Validation(String),
    Storage(String),
}

impl std::fmt::Display for DoctorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoctorError::NotFound => write!(f, "Doctor not found"),
            DoctorError::EmailExists(email) => {
                write!(f, "Doctor with email {} already exists", email)
            }
            DoctorError::InvalidDate(raw) => {
                write!(f, "Invalid date {}, expected YYYY-MM-DD", raw)
            }
            DoctorError::PastDate => write!(f, "Cannot book in the past"),
            DoctorError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DoctorError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DoctorError {}
