// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error-body handling for non-2xx portal replies.

use serde::Deserialize;

/// Error body shape the portal sends with non-2xx replies.
///
/// Most endpoints report through `detail`; the auth endpoints use
/// `message`. Both are optional because proxies and crashes can produce
/// bodies that are not JSON at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Extracts the server's own wording from an error body.
///
/// Preference order is `detail`, then `message`, skipping blank values.
/// A JSON body carrying neither falls through to the raw text, and a
/// body that is not JSON at all yields an empty string so callers can
/// substitute their own fallback.
pub fn error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) else {
        return String::new();
    };
    parsed
        .detail
        .filter(|d| !d.is_empty())
        .or_else(|| parsed.message.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| body.to_string())
}
