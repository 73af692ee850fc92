// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `healthsync login`, `logout`, and `register` command implementations.
//!
//! Credentials are prompted rather than taken as arguments so passwords
//! never land in shell history; the password itself stays wrapped in a
//! `SecretString` until the moment it goes on the wire.

use std::str::FromStr;

use colored::Colorize;
use healthsync_core::{
    DoctorRegistration, HealthSyncError, PatientRegistration, RegistrationRequest, Role,
};
use secrecy::ExposeSecret;
use tracing::info;

use crate::portal::Portal;
use crate::prompt;

/// Shown when the server rejects credentials without its own wording.
pub const BAD_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Runs `healthsync login`. Prompts for whatever was not given on the
/// command line, then establishes and persists the session.
pub async fn run_login(
    portal: &Portal,
    username: Option<String>,
    role: Option<String>,
) -> Result<(), HealthSyncError> {
    let username = match username {
        Some(username) => username,
        None => prompt::line("Username")?,
    };
    if username.is_empty() {
        return Err(HealthSyncError::Validation("Username is required.".into()));
    }
    let role = match role {
        Some(raw) => parse_role(&raw)?,
        None => parse_role(&prompt::line("Role (patient/doctor)")?)?,
    };
    let password = prompt::password("Password")?;

    let token = portal
        .client
        .login(&username, password.expose_secret())
        .await
        .map_err(login_failure)?;
    let session = token.into_session(&username, role);
    portal.establish(session).await?;

    info!(username, %role, "login succeeded");
    println!("{}", format!("Signed in as {username} ({role}).").green());
    Ok(())
}

/// Runs `healthsync logout`.
pub async fn run_logout(portal: &Portal) -> Result<(), HealthSyncError> {
    portal.sign_out().await?;
    println!("Signed out.");
    Ok(())
}

/// Runs `healthsync register`. Walks the role-specific form, creates
/// the account, and signs the user straight in with the returned token.
pub async fn run_register(portal: &Portal, role: Option<String>) -> Result<(), HealthSyncError> {
    let role = match role {
        Some(raw) => parse_role(&raw)?,
        None => parse_role(&prompt::line("Role (patient/doctor)")?)?,
    };
    let request = match role {
        Role::Patient => RegistrationRequest::Patient(prompt_patient_form()?),
        Role::Doctor => RegistrationRequest::Doctor(prompt_doctor_form()?),
    };

    let username = request.username().to_string();
    let token = portal.client.register(&request).await?;
    let session = token.into_session(&username, role);
    portal.establish(session).await?;

    info!(username, %role, "registration succeeded");
    println!(
        "{}",
        format!("Account created. Signed in as {username} ({role}).").green()
    );
    Ok(())
}

fn prompt_patient_form() -> Result<PatientRegistration, HealthSyncError> {
    Ok(PatientRegistration {
        username: required("Username")?,
        email: required("Email")?,
        password: confirmed_password()?,
        first_name: required("First name")?,
        last_name: required("Last name")?,
        date_of_birth: prompt::parsed("Date of birth (YYYY-MM-DD)")?,
        gender: required("Gender")?,
        height_cm: prompt::parsed("Height (cm)")?,
        weight_kg: prompt::parsed("Weight (kg)")?,
        blood_type: required("Blood type")?,
        allergies: prompt::optional("Allergies (blank to skip)")?,
        existing_conditions: prompt::optional("Existing conditions (blank to skip)")?,
    })
}

fn prompt_doctor_form() -> Result<DoctorRegistration, HealthSyncError> {
    Ok(DoctorRegistration {
        username: required("Username")?,
        email: required("Email")?,
        password: confirmed_password()?,
        first_name: required("First name")?,
        last_name: required("Last name")?,
        specialization: required("Specialization")?,
        qualifications: required("Qualifications")?,
        years_experience: prompt::parsed("Years of experience")?,
        bio: prompt::optional("Short bio (blank to skip)")?,
    })
}

fn required(label: &str) -> Result<String, HealthSyncError> {
    let answer = prompt::line(label)?;
    if answer.is_empty() {
        return Err(HealthSyncError::Validation(format!("{label} is required.")));
    }
    Ok(answer)
}

fn confirmed_password() -> Result<String, HealthSyncError> {
    let password = prompt::password("Password")?;
    let again = prompt::password("Confirm password")?;
    if password.expose_secret() != again.expose_secret() {
        return Err(HealthSyncError::Validation("Passwords do not match.".into()));
    }
    Ok(password.expose_secret().to_string())
}

/// Parses the role argument case-insensitively.
pub fn parse_role(raw: &str) -> Result<Role, HealthSyncError> {
    Role::from_str(raw.trim()).map_err(|_| {
        HealthSyncError::Validation(format!("unknown role: {raw} (expected patient or doctor)"))
    })
}

/// Maps a rejected login onto the message the login screen shows: the
/// server's own wording when it sent any, else the generic line.
fn login_failure(error: HealthSyncError) -> HealthSyncError {
    match error {
        HealthSyncError::Api { message, .. } if !message.is_empty() => {
            HealthSyncError::Validation(message)
        }
        HealthSyncError::Api { .. } => HealthSyncError::Validation(BAD_CREDENTIALS_MESSAGE.into()),
        other => other,
    }
}
