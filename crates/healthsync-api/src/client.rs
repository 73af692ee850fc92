// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the HealthSync portal API.
//!
//! Provides [`PortalClient`] which handles request construction, bearer
//! authentication, and translation of non-2xx replies into
//! [`HealthSyncError`] values.

use std::time::Duration;

use healthsync_core::{
    Appointment, AppointmentRequest, ChatRoomHistory, Doctor, DoctorNote, HealthRecord,
    HealthSyncError, RegistrationRequest, Statistics, SymptomRequest, SymptomResponse,
    TokenResponse,
};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::error_message;

/// HTTP client for portal API communication.
///
/// One instance is shared across the whole program; reqwest pools
/// connections internally. Requests are single-attempt: every reply is
/// shown to a person sitting at the terminal, so failures surface
/// immediately instead of being retried behind their back.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Creates a client for the portal at `base_url`.
    ///
    /// A trailing slash on `base_url` is tolerated and stripped so the
    /// `/api/...` paths join cleanly.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, HealthSyncError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HealthSyncError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The portal base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges credentials for a bearer token via `POST /api/auth/login`.
    ///
    /// The token endpoint takes form-encoded credentials, not JSON. A 401
    /// here means the credentials were wrong, so it surfaces as a plain
    /// API error rather than as a session-expiry signal.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, HealthSyncError> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| HealthSyncError::network(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, "login response received");

        if !status.is_success() {
            return Err(api_error(response).await);
        }
        parse_body(response).await
    }

    /// Creates an account via `POST /api/auth/register`.
    ///
    /// Registration is open to anyone, so no bearer token is attached.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<TokenResponse, HealthSyncError> {
        let response = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| HealthSyncError::network(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, "register response received");

        if !status.is_success() {
            return Err(api_error(response).await);
        }
        parse_body(response).await
    }

    /// Submits a symptom description via `POST /api/chatbot/symptom` and
    /// returns the bot's analysis for the given room.
    pub async fn symptom(
        &self,
        token: &str,
        text: &str,
        room_number: u32,
    ) -> Result<SymptomResponse, HealthSyncError> {
        let request = SymptomRequest {
            symptom_text: text.to_string(),
            room_number,
        };
        let response = self
            .post_authed("/api/chatbot/symptom", token, &request)
            .await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Fetches every chat room the user has, via `GET /api/chatbot/chats`.
    pub async fn chat_history(&self, token: &str) -> Result<Vec<ChatRoomHistory>, HealthSyncError> {
        let response = self.get_authed("/api/chatbot/chats", token).await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Lists bookable doctors via `GET /api/appointment/doctors`.
    pub async fn doctors(&self, token: &str) -> Result<Vec<Doctor>, HealthSyncError> {
        let response = self.get_authed("/api/appointment/doctors", token).await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Books an appointment via `POST /api/appointment`.
    ///
    /// The reply body is not used; the portal confirms with the status
    /// code alone.
    pub async fn create_appointment(
        &self,
        token: &str,
        request: &AppointmentRequest,
    ) -> Result<(), HealthSyncError> {
        let response = self.post_authed("/api/appointment", token, request).await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        Ok(())
    }

    /// Lists the user's appointments via `GET /api/appointment/my-appointments`.
    pub async fn my_appointments(&self, token: &str) -> Result<Vec<Appointment>, HealthSyncError> {
        let response = self
            .get_authed("/api/appointment/my-appointments", token)
            .await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Lists every health record for one patient via
    /// `GET /api/health-record/patient/{patient_id}`.
    pub async fn patient_records(
        &self,
        token: &str,
        patient_id: i64,
    ) -> Result<Vec<HealthRecord>, HealthSyncError> {
        let path = format!("/api/health-record/patient/{patient_id}");
        let response = self.get_authed(&path, token).await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Fetches the health record linked to one appointment via
    /// `GET /api/health-record/{appointment_id}`.
    ///
    /// Returns `Api { status: 404, .. }` when the appointment has no
    /// record; callers fall back to searching the patient's records.
    pub async fn record_for_appointment(
        &self,
        token: &str,
        appointment_id: i64,
    ) -> Result<HealthRecord, HealthSyncError> {
        let path = format!("/api/health-record/{appointment_id}");
        let response = self.get_authed(&path, token).await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        parse_body(response).await
    }

    /// Saves a doctor note via `POST /api/health-record/doctor-note`.
    pub async fn create_doctor_note(
        &self,
        token: &str,
        note: &DoctorNote,
    ) -> Result<(), HealthSyncError> {
        let response = self
            .post_authed("/api/health-record/doctor-note", token, note)
            .await?;
        if !response.status().is_success() {
            return Err(authed_api_error(response).await);
        }
        Ok(())
    }

    /// Fetches portal-wide counts via `GET /api/statistics/`.
    ///
    /// The statistics endpoint is public. No token is attached, so a
    /// failure here can never invalidate the session.
    pub async fn statistics(&self) -> Result<Statistics, HealthSyncError> {
        let response = self
            .client
            .get(format!("{}/api/statistics/", self.base_url))
            .send()
            .await
            .map_err(|e| HealthSyncError::network(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, "statistics response received");

        if !status.is_success() {
            return Err(api_error(response).await);
        }
        parse_body(response).await
    }

    /// Issues a GET with the bearer token attached.
    async fn get_authed(
        &self,
        path: &str,
        token: &str,
    ) -> Result<reqwest::Response, HealthSyncError> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| HealthSyncError::network(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, path, "response received");
        Ok(response)
    }

    /// Issues a POST with the bearer token attached and a JSON body.
    async fn post_authed<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<reqwest::Response, HealthSyncError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| HealthSyncError::network(format!("HTTP request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, path, "response received");
        Ok(response)
    }
}

/// Reads a success body and parses it as JSON.
async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, HealthSyncError> {
    let body = response
        .text()
        .await
        .map_err(|e| HealthSyncError::network(format!("failed to read response body: {e}"), e))?;
    serde_json::from_str(&body)
        .map_err(|e| HealthSyncError::Internal(format!("failed to parse API response: {e}")))
}

/// Builds the error for a non-2xx reply, surfacing the server's own
/// `detail`/`message` wording when the body carries any.
async fn api_error(response: reqwest::Response) -> HealthSyncError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    HealthSyncError::Api {
        status,
        message: error_message(&body),
    }
}

/// Like [`api_error`], but treats 401 as the end of the session. Only
/// bearer-authenticated endpoints route through here; on the auth
/// endpoints a 401 just means wrong credentials.
async fn authed_api_error(response: reqwest::Response) -> HealthSyncError {
    if response.status() == StatusCode::UNAUTHORIZED {
        return HealthSyncError::Unauthorized;
    }
    api_error(response).await
}
