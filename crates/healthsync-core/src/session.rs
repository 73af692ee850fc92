// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The authenticated identity and the auth wire types that create it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the portal the user logs in as.
///
/// The role is chosen at login time and routes the user to the matching
/// surface: patients land on the dashboard, doctors on the note editor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

/// The authenticated identity held for the duration of a login.
///
/// Persisted as a single JSON document and destroyed on logout or on the
/// first authentication-rejected reply from any endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token from `/api/auth/login` or `/api/auth/register`.
    pub token: String,
    /// Token type reported by the server (normally "bearer").
    pub token_type: String,
    /// Display name, echoed back from the login form.
    pub username: String,
    /// Role selected at login.
    pub role: Role,
    /// Numeric user id when known; registration replies carry it, plain
    /// logins do not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[redacted]")
            .field("token_type", &self.token_type)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Wire: reply from `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Present on registration replies; absent on login.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl TokenResponse {
    /// Builds the session this token grants.
    pub fn into_session(self, username: impl Into<String>, role: Role) -> Session {
        Session {
            token: self.access_token,
            token_type: self.token_type,
            username: username.into(),
            role,
            user_id: self.user_id,
        }
    }
}

/// Wire: body for `/api/auth/register`, discriminated by the `role` tag.
///
/// The two roles carry different profile fields, so the payload is a tagged
/// union rather than one loose struct with many optional fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RegistrationRequest {
    Patient(PatientRegistration),
    Doctor(DoctorRegistration),
}

impl RegistrationRequest {
    /// The username the account will be created with.
    pub fn username(&self) -> &str {
        match self {
            Self::Patient(p) => &p.username,
            Self::Doctor(d) => &d.username,
        }
    }

    /// The role this payload registers.
    pub fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Doctor(_) => Role::Doctor,
        }
    }
}

/// Profile fields for a patient account.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub blood_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_conditions: Option<String>,
}

/// Profile fields for a doctor account.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub qualifications: String,
    pub years_experience: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
