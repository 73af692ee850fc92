// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `healthsync records` and the doctor note form.
//!
//! Patients view their own records; doctors view a chosen patient's and
//! can author a new note through the row-by-row form.

use colored::Colorize;
use healthsync_core::{HealthRecord, HealthSyncError, Role};
use healthsync_records::{NoteEditor, RecordList, Section, has_clinical_sections};

use crate::portal::Portal;
use crate::prompt;

/// Runs `healthsync records`.
///
/// Patients always see their own records; doctors must name a patient.
pub async fn run_records(portal: &Portal, patient: Option<i64>) -> Result<(), HealthSyncError> {
    let session = portal.require_session()?;
    let patient_id = match (session.role, patient) {
        (_, Some(id)) => id,
        (Role::Patient, None) => session.user_id.ok_or_else(|| {
            HealthSyncError::Validation(
                "Your user id is not known to this session. Please log in again.".into(),
            )
        })?,
        (Role::Doctor, None) => {
            return Err(HealthSyncError::Validation(
                "Pass --patient <id> to view a patient's records.".into(),
            ));
        }
    };

    let records = portal.client.patient_records(&session.token, patient_id).await?;
    let list = RecordList::from_fetched(records);
    if list.is_empty() {
        println!("No health records yet.");
        return Ok(());
    }
    for record in list.records() {
        println!("{}\n", render_record(record));
    }
    Ok(())
}

/// Runs the doctor note form and submits the result.
pub async fn run_note(portal: &Portal, patient: Option<i64>) -> Result<(), HealthSyncError> {
    let session = portal.require_session()?;
    if session.role != Role::Doctor {
        return Err(HealthSyncError::Validation(
            "Only doctors can write notes.".into(),
        ));
    }
    let patient_id = match patient {
        Some(id) => id,
        None => prompt::parsed("Patient id")?,
    };

    let mut editor = NoteEditor::new(patient_id);
    editor.set_title(prompt::line("Title")?);
    editor.set_summary(prompt::line("Summary")?);
    fill_symptoms(&mut editor)?;
    fill_diagnosis(&mut editor)?;
    fill_treatment_plans(&mut editor)?;
    fill_medications(&mut editor)?;

    let note = editor.build()?;
    portal.client.create_doctor_note(&session.token, &note).await?;
    println!("{}", "Doctor note saved.".green());
    Ok(())
}

/// One record as the record screen renders it. Sections that are absent
/// or empty are simply not shown.
pub fn render_record(record: &HealthRecord) -> String {
    let mut out = format!(
        "{} [{}]\n  created {}\n  {}",
        record.title, record.record_type, record.created_at, record.summary
    );

    if let Some(advice) = &record.triage_recommendation {
        out.push_str(&format!("\n  triage recommendation: {advice}"));
        if let Some(score) = record.confidence_score {
            out.push_str(&format!(" (confidence {score:.2})"));
        }
    }

    if !has_clinical_sections(record) {
        return out;
    }

    if let Some(rows) = record.symptoms.as_deref().filter(|r| !r.is_empty()) {
        out.push_str("\n  Symptoms:");
        for row in rows {
            out.push_str(&format!("\n    - {}", row.name));
            if let Some(severity) = row.severity {
                out.push_str(&format!(" (severity {severity})"));
            }
            if let Some(duration) = &row.duration {
                out.push_str(&format!(", {duration}"));
            }
        }
    }
    if let Some(rows) = record.diagnosis.as_deref().filter(|r| !r.is_empty()) {
        out.push_str("\n  Diagnosis:");
        for row in rows {
            out.push_str(&format!("\n    - {}", row.name));
            if let Some(code) = &row.icd10_code {
                out.push_str(&format!(" [{code}]"));
            }
        }
    }
    if let Some(rows) = record.treatment_plan.as_deref().filter(|r| !r.is_empty()) {
        out.push_str("\n  Treatment plan:");
        for row in rows {
            out.push_str(&format!("\n    - {}", row.description));
            if let Some(follow_up) = &row.follow_up {
                out.push_str(&format!(" (follow up: {follow_up})"));
            }
        }
    }
    if let Some(rows) = record.medication.as_deref().filter(|r| !r.is_empty()) {
        out.push_str("\n  Medication:");
        for row in rows {
            out.push_str(&format!("\n    - {} {} {}", row.name, row.dosage, row.frequency));
        }
    }
    out
}

fn fill_symptoms(editor: &mut NoteEditor) -> Result<(), HealthSyncError> {
    println!("Symptoms (blank name finishes the section)");
    let mut first = true;
    loop {
        let name = prompt::line("  Symptom name")?;
        if name.is_empty() {
            break;
        }
        let index = next_row(editor, Section::Symptoms, first);
        first = false;
        let row = editor.symptom_mut(index).expect("row just ensured");
        row.name = name;
        row.severity = prompt::parsed_optional("  Severity 1-10 (blank to skip)")?;
        row.duration = prompt::optional("  Duration (blank to skip)")?;
        row.description = prompt::optional("  Description (blank to skip)")?;
    }
    Ok(())
}

fn fill_diagnosis(editor: &mut NoteEditor) -> Result<(), HealthSyncError> {
    println!("Diagnosis (blank name finishes the section)");
    let mut first = true;
    loop {
        let name = prompt::line("  Diagnosis name")?;
        if name.is_empty() {
            break;
        }
        let index = next_row(editor, Section::Diagnosis, first);
        first = false;
        let row = editor.diagnosis_mut(index).expect("row just ensured");
        row.name = name;
        row.icd10_code = prompt::optional("  ICD-10 code (blank to skip)")?;
        row.description = prompt::optional("  Description (blank to skip)")?;
    }
    Ok(())
}

fn fill_treatment_plans(editor: &mut NoteEditor) -> Result<(), HealthSyncError> {
    println!("Treatment plans (blank description finishes the section)");
    let mut first = true;
    loop {
        let description = prompt::line("  Plan description")?;
        if description.is_empty() {
            break;
        }
        let index = next_row(editor, Section::TreatmentPlan, first);
        first = false;
        let row = editor.treatment_plan_mut(index).expect("row just ensured");
        row.description = description;
        row.duration = prompt::optional("  Duration (blank to skip)")?;
        row.follow_up = prompt::optional("  Follow up (blank to skip)")?;
    }
    Ok(())
}

fn fill_medications(editor: &mut NoteEditor) -> Result<(), HealthSyncError> {
    println!("Medication (blank name finishes the section)");
    let mut first = true;
    loop {
        let name = prompt::line("  Medication name")?;
        if name.is_empty() {
            break;
        }
        let index = next_row(editor, Section::Medication, first);
        first = false;
        let row = editor.medication_mut(index).expect("row just ensured");
        row.name = name;
        row.dosage = prompt::line("  Dosage")?;
        row.frequency = prompt::line("  Frequency")?;
        row.duration = prompt::optional("  Duration (blank to skip)")?;
        row.notes = prompt::optional("  Notes (blank to skip)")?;
    }
    Ok(())
}

/// The first answer reuses the form's initial blank row; later answers
/// append a fresh one.
fn next_row(editor: &mut NoteEditor, section: Section, first: bool) -> usize {
    if first {
        0
    } else {
        editor.add_row(section);
        editor.row_count(section) - 1
    }
}
