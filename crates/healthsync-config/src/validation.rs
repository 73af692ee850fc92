// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as well-formed URLs, non-empty paths, and recognized log levels.

use crate::diagnostic::ConfigError;
use crate::model::HealthSyncConfig;

/// Log levels accepted by `log.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HealthSyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate base_url is not empty
    if config.api.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    }

    // Validate base_url carries an http(s) scheme
    if !config.api.base_url.trim().is_empty() {
        let url = config.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("api.base_url `{url}` must start with http:// or https://"),
            });
        }
    }

    // Validate the request timeout is at least one second
    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate session path is not empty
    if config.session.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.path must not be empty".to_string(),
        });
    }

    // Validate telemedicine base URL is not empty
    if config.appointment.telemedicine_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "appointment.telemedicine_url must not be empty".to_string(),
        });
    }

    // Validate telemedicine base URL carries an http(s) scheme
    if !config.appointment.telemedicine_url.trim().is_empty() {
        let url = config.appointment.telemedicine_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!(
                    "appointment.telemedicine_url `{url}` must start with http:// or https://"
                ),
            });
        }
    }

    // Validate log level is recognized
    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level must be one of trace, debug, info, warn, error, got `{}`",
                config.log.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
