// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the HealthSync portal API.
//!
//! Every screen in the portal talks to the remote server through
//! [`PortalClient`]; no business logic runs locally. The client is a
//! thin typed layer: it attaches the bearer token, serializes the wire
//! types from `healthsync-core`, and turns non-2xx replies into
//! [`healthsync_core::HealthSyncError`] values that carry the server's
//! own error wording.

pub mod client;
pub mod types;

pub use client::PortalClient;
pub use types::{ApiErrorBody, error_message};
