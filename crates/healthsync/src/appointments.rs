// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `healthsync appointments` command implementation.

use chrono::{DateTime, Utc};
use healthsync_core::{Appointment, Doctor, HealthSyncError};
use tracing::warn;

use crate::portal::Portal;

/// Runs `healthsync appointments`: lists the caller's appointments with
/// doctor names resolved from the doctor directory when it is reachable.
pub async fn run_appointments(portal: &Portal) -> Result<(), HealthSyncError> {
    let session = portal.require_session()?;
    let appointments = portal.client.my_appointments(&session.token).await?;

    // The directory only decorates the listing with names; losing it is
    // not worth failing the screen over.
    let doctors = match portal.client.doctors(&session.token).await {
        Ok(doctors) => doctors,
        Err(e) if e.is_unauthorized() => return Err(e),
        Err(e) => {
            warn!(error = %e, "failed to fetch doctor directory");
            Vec::new()
        }
    };

    println!("{}", render_appointments(&appointments, &doctors, Utc::now()));
    Ok(())
}

/// The appointment listing as text, soonest first.
pub fn render_appointments(
    appointments: &[Appointment],
    doctors: &[Doctor],
    now: DateTime<Utc>,
) -> String {
    if appointments.is_empty() {
        return "No appointments yet.".to_string();
    }

    let mut ordered: Vec<&Appointment> = appointments.iter().collect();
    ordered.sort_by_key(|appt| appt.start_time);

    let mut out = String::from("Your appointments\n");
    out.push_str(&"-".repeat(32));
    for appt in ordered {
        let upcoming = if appt.is_upcoming(now) { " (upcoming)" } else { "" };
        out.push_str(&format!(
            "\n  {} with {}\n    {} to {}  [{}]{}",
            appt.start_time.format("%-d %B %Y"),
            doctor_name(doctors, appt.doctor_id),
            appt.start_time.format("%H:%M"),
            appt.end_time.format("%H:%M UTC"),
            appt.status,
            upcoming,
        ));
        if let Some(url) = &appt.telemedicine_url {
            out.push_str(&format!("\n    meeting: {url}"));
        }
    }
    out
}

fn doctor_name(doctors: &[Doctor], doctor_id: i64) -> String {
    doctors
        .iter()
        .find(|doctor| doctor.id == doctor_id)
        .map_or_else(|| format!("doctor #{doctor_id}"), Doctor::full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment(id: i64, doctor_id: i64, status: &str, start: &str) -> Appointment {
        serde_json::from_value(serde_json::json!({
            "id": id, "patient_id": 2, "doctor_id": doctor_id,
            "start_time": start, "end_time": start.replace("14:30", "15:30"),
            "status": status, "telemedicine_url": "https://meet.example/r1"
        }))
        .unwrap()
    }

    fn khan() -> Doctor {
        serde_json::from_value(serde_json::json!({
            "id": 4, "first_name": "Sara", "last_name": "Khan",
            "specialization": "Cardiology", "qualifications": "MBBS",
            "email": "khan@healthsync.example", "is_available": true,
            "years_experience": 11, "bio": "Consultant.", "rating": 4.8
        }))
        .unwrap()
    }

    #[test]
    fn empty_listing_has_its_own_line() {
        assert_eq!(
            render_appointments(&[], &[], Utc::now()),
            "No appointments yet."
        );
    }

    #[test]
    fn listing_resolves_names_and_marks_upcoming() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let appointments = vec![
            appointment(9, 4, "scheduled", "2026-03-01T14:30:00Z"),
            appointment(8, 99, "completed", "2026-01-10T14:30:00Z"),
        ];

        let screen = render_appointments(&appointments, &[khan()], now);
        assert!(screen.contains("Sara Khan"));
        assert!(screen.contains("doctor #99"));
        assert!(screen.contains("(upcoming)"));
        assert!(screen.contains("meeting: https://meet.example/r1"));
        // Soonest first: the January appointment renders before March.
        assert!(screen.find("10 January 2026").unwrap() < screen.find("1 March 2026").unwrap());
    }

    #[test]
    fn past_scheduled_appointments_are_not_upcoming() {
        let now = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
        let appointments = vec![appointment(9, 4, "scheduled", "2026-03-01T14:30:00Z")];
        let screen = render_appointments(&appointments, &[khan()], now);
        assert!(!screen.contains("(upcoming)"));
    }
}
