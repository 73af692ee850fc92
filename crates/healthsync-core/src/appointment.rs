// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Doctors and appointments as seen over the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// Wire: one entry from `GET /api/appointment/doctors`. Read-only
/// reference data, fetched once per booking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub qualifications: String,
    pub email: String,
    pub is_available: bool,
    pub years_experience: u32,
    pub bio: String,
    pub rating: f64,
}

impl Doctor {
    /// Display name, matching how the booking screen lists doctors.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Wire: body for `POST /api/appointment`. Constructed once, sent once.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRequest {
    pub doctor_id: i64,
    #[serde(serialize_with = "serialize_utc_millis")]
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_utc_millis")]
    pub end_time: DateTime<Utc>,
    pub telemedicine_url: String,
}

/// Lifecycle state reported for a stored appointment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// Wire: one entry from `GET /api/appointment/my-appointments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub telemedicine_url: Option<String>,
    #[serde(default)]
    pub health_record_id: Option<i64>,
}

impl Appointment {
    /// An appointment is upcoming while still scheduled and not yet started.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == AppointmentStatus::Scheduled && self.start_time > now
    }
}

/// Serializes timestamps as RFC 3339 UTC with millisecond precision
/// (`2026-03-01T14:30:00.000Z`), the format the portal stores.
fn serialize_utc_millis<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
