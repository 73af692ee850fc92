// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `healthsync dashboard` command implementation.
//!
//! Shows the portal-wide aggregate counts. A failed fetch renders a
//! visible error state; it never takes the process down.

use colored::Colorize;
use healthsync_core::{HealthSyncError, Statistics};
use tracing::warn;

use crate::portal::Portal;

/// The dashboard's error state when the counts cannot be fetched.
pub const DASHBOARD_ERROR_MESSAGE: &str = "Failed to load your health data. Please try again later.";

/// Runs `healthsync dashboard`.
///
/// The statistics endpoint is public, so this works signed in or out.
/// A failure is rendered, not returned: the dashboard always produces a
/// screen.
pub async fn run_dashboard(portal: &Portal) -> Result<(), HealthSyncError> {
    match portal.client.statistics().await {
        Ok(stats) => println!("{}", render_statistics(&stats)),
        Err(e) => {
            warn!(error = %e, "statistics fetch failed");
            eprintln!("{}", DASHBOARD_ERROR_MESSAGE.red());
        }
    }
    Ok(())
}

/// The dashboard screen as text.
pub fn render_statistics(stats: &Statistics) -> String {
    let rows = [
        ("Users", stats.total_users),
        ("Doctors", stats.total_doctors),
        ("Patients", stats.total_patients),
        ("Appointments", stats.total_appointments),
        ("Chat sessions", stats.total_chat_sessions),
        ("Health records", stats.total_health_records),
        ("Triage records", stats.total_triage_records),
        ("Doctor notes", stats.total_doctor_notes),
    ];
    let mut out = String::from("HealthSync portal statistics\n");
    out.push_str(&"-".repeat(32));
    for (label, count) in rows {
        out.push_str(&format!("\n  {label:<16} {count:>6}"));
    }
    out
}
