// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symptom triage chat for the HealthSync portal client.
//!
//! [`ChatPane`] drives one conversation with the server-side triage bot:
//! optimistic message append, room numbering, cached history of earlier
//! rooms, and the booking offer raised when the server recommends seeing
//! a doctor.

pub mod pane;

pub use pane::{ChatPane, PaneState};
