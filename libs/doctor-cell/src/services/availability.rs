use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{AvailabilityResponse, ClinicHours, DoctorError, Slot};
use crate::services::doctor::DoctorService;

/// Generate every theoretical slot for one calendar day: starting at the
/// opening hour, emit fixed-length windows back to back while the window
/// start is strictly before the closing hour.
pub fn generate_slots_for_date(date: NaiveDate, hours: &ClinicHours) -> Vec<Slot> {
    let (Some(opening), Some(closing)) = (
        date.and_hms_opt(hours.open_hour, 0, 0),
        date.and_hms_opt(hours.close_hour, 0, 0),
    ) else {
        return Vec::new();
    };

    let step = Duration::minutes(hours.slot_duration_minutes as i64);
    // A zero-length step would never reach closing time.
    if step <= Duration::zero() {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = opening;

    while current < closing {
        let end = current + step;
        slots.push(Slot {
            start: current,
            end,
        });
        current = end;
    }

    slots
}

pub struct AvailabilityService {
    doctors: DoctorService,
    clinic_hours: ClinicHours,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            doctors: DoctorService::new(config),
            clinic_hours: ClinicHours::from_config(config),
        }
    }

    pub fn with_service(doctors: DoctorService, clinic_hours: ClinicHours) -> Self {
        Self {
            doctors,
            clinic_hours,
        }
    }

    /// Check availability for a doctor on a specific date.
    ///
    /// The slot list is theoretical: the appointment service that would supply
    /// booked slots is not integrated, so nothing is subtracted.
    pub async fn check_availability(
        &self,
        doctor_id: i64,
        date: &str,
    ) -> Result<AvailabilityResponse, DoctorError> {
        let doctor = self.doctors.get_doctor(doctor_id).await?;

        let requested = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DoctorError::InvalidDate(date.to_string()))?;

        let today = Local::now().date_naive();
        if requested < today {
            debug!("Rejected past date {} for doctor {}", date, doctor_id);
            return Err(DoctorError::PastDate);
        }

        let slots = generate_slots_for_date(requested, &self.clinic_hours);

        info!(
            "Availability checked for doctor {} on {}: {} slots",
            doctor.doctor_id,
            date,
            slots.len()
        );

        Ok(AvailabilityResponse {
            doctor_id: doctor.doctor_id,
            date: date.to_string(),
            available_slots: slots,
            clinic_hours: self.clinic_hours.as_response(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn default_hours_yield_eighteen_slots() {
        let slots = generate_slots_for_date(date("2025-06-10"), &ClinicHours::default());

        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].start.to_string(), "2025-06-10 09:00:00");
        assert_eq!(slots[0].end.to_string(), "2025-06-10 09:30:00");
        assert_eq!(slots[17].start.to_string(), "2025-06-10 17:30:00");
        assert_eq!(slots[17].end.to_string(), "2025-06-10 18:00:00");
    }

    #[test]
    fn slots_are_contiguous_and_ordered() {
        let slots = generate_slots_for_date(date("2025-06-10"), &ClinicHours::default());

        for pair in slots.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for slot in &slots {
            assert_eq!(slot.end - slot.start, Duration::minutes(30));
        }
    }

    #[test]
    fn generation_is_a_pure_function_of_date_and_hours() {
        let hours = ClinicHours::default();
        let first = generate_slots_for_date(date("2025-06-10"), &hours);
        let second = generate_slots_for_date(date("2025-06-10"), &hours);

        assert_eq!(first, second);
    }

    #[test]
    fn custom_hours_bound_the_day() {
        let hours = ClinicHours {
            open_hour: 10,
            close_hour: 12,
            slot_duration_minutes: 30,
        };
        let slots = generate_slots_for_date(date("2025-06-10"), &hours);

        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start.to_string(), "2025-06-10 10:00:00");
        assert_eq!(slots[3].end.to_string(), "2025-06-10 12:00:00");
    }

    #[test]
    fn last_slot_may_run_past_closing_when_duration_does_not_divide_evenly() {
        let hours = ClinicHours {
            open_hour: 9,
            close_hour: 10,
            slot_duration_minutes: 40,
        };
        let slots = generate_slots_for_date(date("2025-06-10"), &hours);

        // 09:40 is still before closing, so a second slot starts there.
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start.to_string(), "2025-06-10 09:40:00");
        assert_eq!(slots[1].end.to_string(), "2025-06-10 10:20:00");
    }

    #[test]
    fn degenerate_hours_yield_no_slots() {
        let closed = ClinicHours {
            open_hour: 9,
            close_hour: 9,
            slot_duration_minutes: 30,
        };
        assert!(generate_slots_for_date(date("2025-06-10"), &closed).is_empty());

        let inverted = ClinicHours {
            open_hour: 18,
            close_hour: 9,
            slot_duration_minutes: 30,
        };
        assert!(generate_slots_for_date(date("2025-06-10"), &inverted).is_empty());

        let out_of_range = ClinicHours {
            open_hour: 9,
            close_hour: 24,
            slot_duration_minutes: 30,
        };
        assert!(generate_slots_for_date(date("2025-06-10"), &out_of_range).is_empty());

        let zero_step = ClinicHours {
            open_hour: 9,
            close_hour: 18,
            slot_duration_minutes: 0,
        };
        assert!(generate_slots_for_date(date("2025-06-10"), &zero_step).is_empty());
    }

    #[test]
    fn slots_serialize_without_timezone_suffix() {
        let slots = generate_slots_for_date(date("2025-06-10"), &ClinicHours::default());
        let json = serde_json::to_value(&slots[0]).unwrap();

        assert_eq!(json["start"], "2025-06-10T09:00:00");
        assert_eq!(json["end"], "2025-06-10T09:30:00");
    }

    mod service {
        use std::sync::Arc;

        use assert_matches::assert_matches;
        use chrono::Duration as ChronoDuration;

        use super::*;
        use crate::models::CreateDoctorRequest;
        use crate::repository::memory::InMemoryDoctorRepository;

        async fn service_with_one_doctor() -> (AvailabilityService, i64) {
            let store = Arc::new(InMemoryDoctorRepository::new());
            let doctors = DoctorService::with_repository(store);
            let doctor = doctors
                .create_doctor(CreateDoctorRequest {
                    name: "Dr. Jonas Salk".to_string(),
                    email: "salk@clinic.org".to_string(),
                    phone: "+1-555-0102".to_string(),
                    department: "Immunology".to_string(),
                    specialization: "Virology".to_string(),
                })
                .await
                .unwrap();
            let doctor_id = doctor.doctor_id;

            (
                AvailabilityService::with_service(doctors, ClinicHours::default()),
                doctor_id,
            )
        }

        #[tokio::test]
        async fn unknown_doctor_is_not_found() {
            let (service, doctor_id) = service_with_one_doctor().await;

            let result = service.check_availability(doctor_id + 1, "2099-01-15").await;
            assert_matches!(result, Err(DoctorError::NotFound));
        }

        #[tokio::test]
        async fn unparsable_date_is_rejected() {
            let (service, doctor_id) = service_with_one_doctor().await;

            for raw in ["06/10/2025", "2025-13-40", "tomorrow", ""] {
                let result = service.check_availability(doctor_id, raw).await;
                assert_matches!(result, Err(DoctorError::InvalidDate(_)));
            }
        }

        #[tokio::test]
        async fn past_date_is_rejected() {
            let (service, doctor_id) = service_with_one_doctor().await;

            let yesterday = (Local::now().date_naive() - ChronoDuration::days(1))
                .format("%Y-%m-%d")
                .to_string();
            let result = service.check_availability(doctor_id, &yesterday).await;

            assert_matches!(result, Err(DoctorError::PastDate));
        }

        #[tokio::test]
        async fn today_and_future_dates_are_accepted() {
            let (service, doctor_id) = service_with_one_doctor().await;

            let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
            let response = service.check_availability(doctor_id, &today).await.unwrap();
            assert_eq!(response.available_slots.len(), 18);

            let response = service
                .check_availability(doctor_id, "2099-01-15")
                .await
                .unwrap();
            assert_eq!(response.doctor_id, doctor_id);
            assert_eq!(response.date, "2099-01-15");
            assert_eq!(response.available_slots.len(), 18);
            assert_eq!(response.clinic_hours.start, "9:00");
            assert_eq!(response.clinic_hours.end, "18:00");
        }
    }
}
