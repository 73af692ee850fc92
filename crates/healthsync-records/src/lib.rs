// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health record viewing and doctor note authoring.
//!
//! [`RecordList`] orders a patient's fetched records for display;
//! [`NoteEditor`] holds the row-by-row state of a doctor note form and
//! builds the submission payload once the doctor is done.

pub mod editor;
pub mod list;

pub use editor::{MISSING_TITLE_MESSAGE, NoteEditor, Section};
pub use list::{RecordList, has_clinical_sections};
