// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state for the HealthSync portal client.
//!
//! Two pieces: [`SessionStore`] persists the signed-in identity as one
//! JSON file between runs, and [`SessionGate`] shares it across screens
//! at runtime and turns the first authentication-rejected reply into a
//! single, final expiry notice.

pub mod gate;
pub mod store;

pub use gate::{SESSION_EXPIRED_MESSAGE, SessionGate};
pub use store::SessionStore;
