// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small stdin prompt helpers for the form-style flows (login,
//! registration, doctor notes). The chat shell uses rustyline instead;
//! these are for one-question-at-a-time field entry.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use healthsync_core::HealthSyncError;
use secrecy::SecretString;

/// Prints `label: ` and reads one trimmed line.
pub fn line(label: &str) -> Result<String, HealthSyncError> {
    print!("{label}: ");
    io::stdout()
        .flush()
        .map_err(|e| HealthSyncError::Internal(format!("failed to flush stdout: {e}")))?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| HealthSyncError::Internal(format!("failed to read input: {e}")))?;
    Ok(input.trim().to_string())
}

/// Like [`line`], but an empty answer means "skip".
pub fn optional(label: &str) -> Result<Option<String>, HealthSyncError> {
    let answer = line(label)?;
    Ok(if answer.is_empty() { None } else { Some(answer) })
}

/// Reads a line and parses it, rejecting unparseable input locally.
pub fn parsed<T: FromStr>(label: &str) -> Result<T, HealthSyncError> {
    parse_field(label, &line(label)?)
}

/// Like [`parsed`], but an empty answer means "skip".
pub fn parsed_optional<T: FromStr>(label: &str) -> Result<Option<T>, HealthSyncError> {
    match optional(label)? {
        Some(raw) => parse_field(label, &raw).map(Some),
        None => Ok(None),
    }
}

/// Reads a password without echoing it.
pub fn password(label: &str) -> Result<SecretString, HealthSyncError> {
    let secret = rpassword::prompt_password(format!("{label}: "))
        .map_err(|e| HealthSyncError::Internal(format!("failed to read password: {e}")))?;
    Ok(SecretString::from(secret))
}

fn parse_field<T: FromStr>(label: &str, raw: &str) -> Result<T, HealthSyncError> {
    raw.trim()
        .parse()
        .map_err(|_| HealthSyncError::Validation(format!("invalid value for {label}: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_field_accepts_matching_input() {
        assert_eq!(parse_field::<u32>("years of experience", "11").unwrap(), 11);
        assert_eq!(parse_field::<f64>("height (cm)", " 168.5 ").unwrap(), 168.5);
        assert_eq!(
            parse_field::<NaiveDate>("date of birth", "1990-04-12").unwrap(),
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
        );
    }

    #[test]
    fn parse_field_names_the_field_in_the_error() {
        let err = parse_field::<u32>("years of experience", "eleven").unwrap_err();
        assert!(matches!(err, HealthSyncError::Validation(_)));
        assert!(err.to_string().contains("years of experience"));
    }
}
