// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only view over a patient's fetched health records.

use chrono::NaiveDateTime;
use healthsync_core::HealthRecord;
use tracing::warn;

/// A patient's records ordered newest first, as the record screen
/// renders them. Built once per fetch; never refreshed in place.
#[derive(Debug, Clone)]
pub struct RecordList {
    records: Vec<HealthRecord>,
}

impl RecordList {
    /// Orders fetched records by creation time descending.
    ///
    /// Records whose timestamp does not parse sort after every dated
    /// record, with a warning, rather than being dropped.
    pub fn from_fetched(mut records: Vec<HealthRecord>) -> Self {
        records.sort_by_key(|record| std::cmp::Reverse(parse_created_at(record)));
        Self { records }
    }

    /// The records, newest first.
    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// True when the record has at least one clinical section worth a
/// heading; records from chat triage often carry none.
pub fn has_clinical_sections(record: &HealthRecord) -> bool {
    fn non_empty<T>(section: &Option<Vec<T>>) -> bool {
        section.as_ref().is_some_and(|rows| !rows.is_empty())
    }
    non_empty(&record.symptoms)
        || non_empty(&record.diagnosis)
        || non_empty(&record.treatment_plan)
        || non_empty(&record.medication)
}

fn parse_created_at(record: &HealthRecord) -> Option<NaiveDateTime> {
    let parsed = record
        .created_at
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(&record.created_at, "%Y-%m-%dT%H:%M:%S%.fZ"));
    match parsed {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            warn!(record = record.id, created_at = %record.created_at, error = %e,
                "record has an unparseable creation time");
            None
        }
    }
}
