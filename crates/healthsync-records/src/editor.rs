// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row-by-row state for the doctor note form.
//!
//! Each of the four clinical sections is a dynamic list of rows with a
//! floor of one visible row: removing the last row resets it to a blank
//! instead of deleting it. Blank rows are a UI affordance only; they are
//! dropped when the payload is built.

use healthsync_core::{
    Diagnosis, DoctorNote, HealthSyncError, Medication, Symptom, TreatmentPlan,
};
use tracing::debug;

/// Shown when the note is submitted without a title.
pub const MISSING_TITLE_MESSAGE: &str = "Please provide a title for the note.";

/// The four clinical sections of a doctor note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Symptoms,
    Diagnosis,
    TreatmentPlan,
    Medication,
}

/// Editable state of one doctor note.
///
/// The patient id comes from the enclosing screen (the doctor picked the
/// patient before opening the form), never from a form field.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    patient_id: i64,
    title: String,
    summary: String,
    symptoms: Vec<Symptom>,
    diagnosis: Vec<Diagnosis>,
    treatment_plan: Vec<TreatmentPlan>,
    medication: Vec<Medication>,
}

impl NoteEditor {
    /// A fresh form for `patient_id` with one blank row per section.
    pub fn new(patient_id: i64) -> Self {
        Self {
            patient_id,
            title: String::new(),
            summary: String::new(),
            symptoms: vec![blank_symptom()],
            diagnosis: vec![blank_diagnosis()],
            treatment_plan: vec![blank_plan()],
            medication: vec![blank_medication()],
        }
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    /// Appends a blank row to `section`.
    pub fn add_row(&mut self, section: Section) {
        match section {
            Section::Symptoms => self.symptoms.push(blank_symptom()),
            Section::Diagnosis => self.diagnosis.push(blank_diagnosis()),
            Section::TreatmentPlan => self.treatment_plan.push(blank_plan()),
            Section::Medication => self.medication.push(blank_medication()),
        }
    }

    /// Removes the row at `index`, keeping the one-row floor: removing
    /// the only row clears it instead. Returns false when `index` is out
    /// of range.
    pub fn remove_row(&mut self, section: Section, index: usize) -> bool {
        fn remove<T>(rows: &mut Vec<T>, index: usize, blank: impl FnOnce() -> T) -> bool {
            if index >= rows.len() {
                return false;
            }
            if rows.len() == 1 {
                rows[0] = blank();
            } else {
                rows.remove(index);
            }
            true
        }
        match section {
            Section::Symptoms => remove(&mut self.symptoms, index, blank_symptom),
            Section::Diagnosis => remove(&mut self.diagnosis, index, blank_diagnosis),
            Section::TreatmentPlan => remove(&mut self.treatment_plan, index, blank_plan),
            Section::Medication => remove(&mut self.medication, index, blank_medication),
        }
    }

    /// Number of visible rows in `section`. Never below one.
    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Symptoms => self.symptoms.len(),
            Section::Diagnosis => self.diagnosis.len(),
            Section::TreatmentPlan => self.treatment_plan.len(),
            Section::Medication => self.medication.len(),
        }
    }

    pub fn symptom_mut(&mut self, index: usize) -> Option<&mut Symptom> {
        self.symptoms.get_mut(index)
    }

    pub fn diagnosis_mut(&mut self, index: usize) -> Option<&mut Diagnosis> {
        self.diagnosis.get_mut(index)
    }

    pub fn treatment_plan_mut(&mut self, index: usize) -> Option<&mut TreatmentPlan> {
        self.treatment_plan.get_mut(index)
    }

    pub fn medication_mut(&mut self, index: usize) -> Option<&mut Medication> {
        self.medication.get_mut(index)
    }

    /// Builds the submission payload.
    ///
    /// Blank rows are dropped: a symptom, diagnosis, or medication with
    /// an empty name, or a treatment plan with an empty description, was
    /// never filled in. Title and summary are trimmed; a note without a
    /// title is rejected before any network call.
    pub fn build(&self) -> Result<DoctorNote, HealthSyncError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(HealthSyncError::Validation(MISSING_TITLE_MESSAGE.into()));
        }

        let note = DoctorNote {
            title: title.to_string(),
            summary: self.summary.trim().to_string(),
            patient_id: self.patient_id,
            symptoms: self
                .symptoms
                .iter()
                .filter(|row| !row.name.trim().is_empty())
                .cloned()
                .collect(),
            diagnosis: self
                .diagnosis
                .iter()
                .filter(|row| !row.name.trim().is_empty())
                .cloned()
                .collect(),
            treatment_plan: self
                .treatment_plan
                .iter()
                .filter(|row| !row.description.trim().is_empty())
                .cloned()
                .collect(),
            medication: self
                .medication
                .iter()
                .filter(|row| !row.name.trim().is_empty())
                .cloned()
                .collect(),
        };
        debug!(
            patient = self.patient_id,
            symptoms = note.symptoms.len(),
            diagnosis = note.diagnosis.len(),
            treatment_plans = note.treatment_plan.len(),
            medications = note.medication.len(),
            "doctor note built"
        );
        Ok(note)
    }
}

fn blank_symptom() -> Symptom {
    Symptom {
        name: String::new(),
        severity: None,
        duration: None,
        description: None,
    }
}

fn blank_diagnosis() -> Diagnosis {
    Diagnosis {
        name: String::new(),
        icd10_code: None,
        description: None,
        confidence: None,
    }
}

fn blank_plan() -> TreatmentPlan {
    TreatmentPlan {
        description: String::new(),
        duration: None,
        follow_up: None,
    }
}

fn blank_medication() -> Medication {
    Medication {
        name: String::new(),
        dosage: String::new(),
        frequency: String::new(),
        duration: None,
        notes: None,
    }
}
