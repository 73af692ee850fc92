// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate counts shown on the dashboard.

use serde::{Deserialize, Serialize};

/// Wire: reply from `GET /api/statistics/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_users: u64,
    pub total_doctors: u64,
    pub total_patients: u64,
    pub total_appointments: u64,
    pub total_chat_sessions: u64,
    pub total_health_records: u64,
    pub total_triage_records: u64,
    pub total_doctor_notes: u64,
}
