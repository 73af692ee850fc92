// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the HealthSync portal client.
//!
//! This crate provides the error type, the domain entities, and the wire
//! shapes shared by every HealthSync crate. All state here is a transient
//! copy of data owned by the portal's backend services.

pub mod appointment;
pub mod chat;
pub mod error;
pub mod record;
pub mod session;
pub mod stats;

// Re-export key items at crate root for ergonomic imports.
pub use appointment::{Appointment, AppointmentRequest, AppointmentStatus, Doctor};
pub use chat::{
    ChatEntry, ChatMessage, ChatRoomHistory, GREETING, NO_RESPONSE_FALLBACK, Sender,
    SymptomRequest, SymptomResponse, TRIAGE_SCHEDULE_APPOINTMENT,
};
pub use error::HealthSyncError;
pub use record::{Diagnosis, DoctorNote, HealthRecord, Medication, Symptom, TreatmentPlan};
pub use session::{
    DoctorRegistration, PatientRegistration, RegistrationRequest, Role, Session, TokenResponse,
};
pub use stats::Statistics;
