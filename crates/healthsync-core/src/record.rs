// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health records and their nested clinical sub-entities.

use serde::{Deserialize, Serialize};

/// One symptom row inside a record or doctor note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One diagnosis row inside a record or doctor note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// One treatment-plan row inside a record or doctor note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

/// One medication row inside a record or doctor note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Wire: one entry from `GET /api/health-record/patient/{id}`.
///
/// Each sub-list is independently optional; absent or empty sections are
/// simply not rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub record_type: String,
    #[serde(default)]
    pub symptoms: Option<Vec<Symptom>>,
    #[serde(default)]
    pub diagnosis: Option<Vec<Diagnosis>>,
    #[serde(default)]
    pub treatment_plan: Option<Vec<TreatmentPlan>>,
    #[serde(default)]
    pub medication: Option<Vec<Medication>>,
    #[serde(default)]
    pub triage_recommendation: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Wire: body for `POST /api/health-record/doctor-note`.
///
/// The server supplies id, doctor id, record type, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorNote {
    pub title: String,
    pub summary: String,
    pub patient_id: i64,
    pub symptoms: Vec<Symptom>,
    pub diagnosis: Vec<Diagnosis>,
    pub treatment_plan: Vec<TreatmentPlan>,
    pub medication: Vec<Medication>,
}
