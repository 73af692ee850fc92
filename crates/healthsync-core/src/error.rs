// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the HealthSync portal client.

use thiserror::Error;

/// The primary error type used across all HealthSync crates.
#[derive(Debug, Error)]
pub enum HealthSyncError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Session persistence errors (unreadable or unwritable session file).
    #[error("session error: {message}")]
    Session {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport-level failures (connection refused, DNS, TLS, request timeout).
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server rejected the bearer token. The stored session is no longer
    /// valid and the user must log in again.
    #[error("session expired or invalid")]
    Unauthorized,

    /// Non-2xx business reply. `message` carries the server's own wording
    /// (the `detail`/`message` body field) so screens can show it verbatim;
    /// it is empty when the body had neither.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Input rejected locally before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HealthSyncError {
    /// True when this error means the session must be discarded.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Shorthand for a transport failure wrapping an underlying error.
    pub fn network(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
