// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a completed [`BookingSelection`] into one appointment call.

use std::sync::Arc;

use chrono::Duration;
use healthsync_api::PortalClient;
use healthsync_core::{AppointmentRequest, HealthSyncError};
use healthsync_session::SessionGate;
use tracing::info;
use uuid::Uuid;

use crate::slots::parse_slot;
use crate::widget::BookingSelection;

/// Shown when confirm is pressed with any of the three picks missing.
pub const INCOMPLETE_SELECTION_MESSAGE: &str =
    "Please select a doctor, date, and time for the appointment.";

/// Shown when the portal accepts the booking.
pub const APPOINTMENT_CREATED_MESSAGE: &str = "Appointment created successfully!";

/// Submits confirmed selections. Construct once per booking screen.
pub struct AppointmentConfirmer {
    client: PortalClient,
    gate: Arc<SessionGate>,
    telemedicine_base: String,
}

impl AppointmentConfirmer {
    pub fn new(
        client: PortalClient,
        gate: Arc<SessionGate>,
        telemedicine_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            gate,
            telemedicine_base: telemedicine_base.into(),
        }
    }

    /// Books the selected doctor, date, and slot as a one-hour
    /// appointment.
    ///
    /// Rejects with [`INCOMPLETE_SELECTION_MESSAGE`] before any network
    /// traffic when a pick is missing. Failures leave the selection
    /// untouched so the user can retry.
    pub async fn confirm(&self, selection: &BookingSelection) -> Result<(), HealthSyncError> {
        let (Some(doctor), Some(date), Some(slot)) =
            (&selection.doctor, selection.date, selection.slot.as_deref())
        else {
            return Err(HealthSyncError::Validation(
                INCOMPLETE_SELECTION_MESSAGE.to_string(),
            ));
        };
        let session = self.gate.require()?;
        let start_time = date.and_time(parse_slot(slot)?).and_utc();
        let request = AppointmentRequest {
            doctor_id: doctor.id,
            start_time,
            end_time: start_time + Duration::hours(1),
            telemedicine_url: self.meeting_url(),
        };
        self.client
            .create_appointment(&session.token, &request)
            .await?;
        info!(doctor = doctor.id, start = %request.start_time, "appointment booked");
        Ok(())
    }

    /// A fresh meeting room under the configured telemedicine base.
    fn meeting_url(&self) -> String {
        format!(
            "{}/{}",
            self.telemedicine_base.trim_end_matches('/'),
            Uuid::new_v4()
        )
    }
}

/// The inline failure message for a confirm that did not go through.
///
/// Server-provided messages surface verbatim; everything else falls back
/// to a retry hint. Expired sessions are routed through the session gate
/// instead of being rendered here.
pub fn failure_text(error: &HealthSyncError) -> String {
    match error {
        HealthSyncError::Api { message, .. } if !message.is_empty() => {
            format!("Failed to create appointment: {message}")
        }
        HealthSyncError::Api { .. } => {
            "Failed to create appointment. Please try again.".to_string()
        }
        HealthSyncError::Validation(message) => message.clone(),
        other => format!("Failed to create appointment. {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use healthsync_core::{Doctor, Role, Session};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_in_gate() -> Arc<SessionGate> {
        let gate = Arc::new(SessionGate::new());
        gate.set(Session {
            token: "test-token".into(),
            token_type: "bearer".into(),
            username: "amina".into(),
            role: Role::Patient,
            user_id: Some(7),
        });
        gate
    }

    fn confirmer(server: &MockServer, base: &str) -> AppointmentConfirmer {
        let client = PortalClient::new(&server.uri(), 30).unwrap();
        AppointmentConfirmer::new(client, signed_in_gate(), base)
    }

    fn doctor() -> Doctor {
        Doctor {
            id: 4,
            first_name: "Sara".into(),
            last_name: "Khan".into(),
            specialization: "Cardiology".into(),
            qualifications: "MBBS".into(),
            email: "khan@healthsync.example".into(),
            is_available: true,
            years_experience: 11,
            bio: "Consultant.".into(),
            rating: 4.8,
        }
    }

    fn complete_selection() -> BookingSelection {
        BookingSelection {
            doctor: Some(doctor()),
            date: NaiveDate::from_ymd_opt(2025, 3, 19),
            slot: Some("02:30pm".into()),
        }
    }

    #[tokio::test]
    async fn incomplete_selection_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/appointment"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let confirmer = confirmer(&server, "https://meet.example");
        let mut selection = complete_selection();
        selection.slot = None;

        let err = confirmer.confirm(&selection).await.unwrap_err();
        assert_eq!(failure_text(&err), INCOMPLETE_SELECTION_MESSAGE);
    }

    #[tokio::test]
    async fn books_a_one_hour_appointment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/appointment"))
            .and(body_partial_json(serde_json::json!({
                "doctor_id": 4,
                "start_time": "2025-03-19T14:30:00.000Z",
                "end_time": "2025-03-19T15:30:00.000Z"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let confirmer = confirmer(&server, "https://meet.example");
        confirmer.confirm(&complete_selection()).await.unwrap();
    }

    #[tokio::test]
    async fn meeting_urls_are_unique_per_booking() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/appointment"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        // Trailing slash on the configured base is tolerated.
        let confirmer = confirmer(&server, "https://meet.example/rooms/");
        confirmer.confirm(&complete_selection()).await.unwrap();
        confirmer.confirm(&complete_selection()).await.unwrap();

        let urls: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
                body["telemedicine_url"].as_str().unwrap().to_string()
            })
            .collect();

        assert_eq!(urls.len(), 2);
        assert_ne!(urls[0], urls[1]);
        for url in &urls {
            let room = url.strip_prefix("https://meet.example/rooms/").unwrap();
            Uuid::parse_str(room).unwrap();
        }
    }

    #[tokio::test]
    async fn server_conflict_surfaces_its_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/appointment"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "detail": "Doctor is not available at this time"
            })))
            .mount(&server)
            .await;

        let confirmer = confirmer(&server, "https://meet.example");
        let err = confirmer.confirm(&complete_selection()).await.unwrap_err();
        assert_eq!(
            failure_text(&err),
            "Failed to create appointment: Doctor is not available at this time"
        );
    }

    #[tokio::test]
    async fn rejected_token_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/appointment"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let confirmer = confirmer(&server, "https://meet.example");
        let err = confirmer.confirm(&complete_selection()).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn failure_text_falls_back_per_error_kind() {
        let blank = HealthSyncError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            failure_text(&blank),
            "Failed to create appointment. Please try again."
        );

        let transport = HealthSyncError::network(
            "HTTP request failed: connection refused",
            std::io::Error::other("connection refused"),
        );
        assert_eq!(
            failure_text(&transport),
            "Failed to create appointment. network error: HTTP request failed: connection refused"
        );
    }
}
