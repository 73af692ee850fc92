// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./healthsync.toml` > `~/.config/healthsync/healthsync.toml` > `/etc/healthsync/healthsync.toml`
//! with environment variable overrides via `HEALTHSYNC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HealthSyncConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/healthsync/healthsync.toml` (system-wide)
/// 3. `~/.config/healthsync/healthsync.toml` (user XDG config)
/// 4. `./healthsync.toml` (local directory)
/// 5. `HEALTHSYNC_*` environment variables
pub fn load_config() -> Result<HealthSyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HealthSyncConfig::default()))
        .merge(Toml::file("/etc/healthsync/healthsync.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("healthsync/healthsync.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("healthsync.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HealthSyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HealthSyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HealthSyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HealthSyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `HEALTHSYNC_API_BASE_URL` must
/// map to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("HEALTHSYNC_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HEALTHSYNC_API_BASE_URL -> "api_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("appointment_", "appointment.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
