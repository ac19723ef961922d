pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use models::{
    AvailabilityResponse, ClinicHours, CreateDoctorRequest, Doctor, DoctorError, DoctorPage, Slot,
};
pub use services::availability::generate_slots_for_date;
pub use services::{AvailabilityService, DoctorService};
