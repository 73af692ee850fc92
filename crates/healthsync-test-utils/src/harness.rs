// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full client stack against a wiremock
//! portal: a `PortalClient` pointed at the mock server, a tempdir-backed
//! `SessionStore`, and a shared `SessionGate`. The builder queues canned
//! endpoint replies; tests then drive login, chat, and booking flows and
//! assert on the resulting state.

use std::sync::Arc;

use healthsync_api::PortalClient;
use healthsync_core::{HealthSyncError, Role, Session};
use healthsync_session::{SessionGate, SessionStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One canned endpoint reply, mounted when the harness is built.
struct CannedReply {
    method: &'static str,
    path: String,
    status: u16,
    body: Option<serde_json::Value>,
}

/// Builder for creating test environments with queued portal replies.
pub struct TestHarnessBuilder {
    replies: Vec<CannedReply>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
        }
    }

    /// Queue an arbitrary JSON reply for one endpoint.
    pub fn with_json_reply(
        mut self,
        method: &'static str,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> Self {
        self.replies.push(CannedReply {
            method,
            path: path.into(),
            status,
            body: Some(body),
        });
        self
    }

    /// Queue a bodyless reply, e.g. a bare 401 or 500.
    pub fn with_status_reply(
        mut self,
        method: &'static str,
        path: impl Into<String>,
        status: u16,
    ) -> Self {
        self.replies.push(CannedReply {
            method,
            path: path.into(),
            status,
            body: None,
        });
        self
    }

    /// Queue a successful login reply issuing `token`.
    pub fn with_login_token(self, token: &str) -> Self {
        self.with_json_reply(
            "POST",
            "/api/auth/login",
            200,
            serde_json::json!({"access_token": token, "token_type": "bearer"}),
        )
    }

    /// Queue a symptom analysis reply, optionally with triage advice.
    pub fn with_symptom_reply(self, analysis: &str, triage_advice: Option<&str>) -> Self {
        let mut body = serde_json::json!({"analysis": analysis});
        if let Some(advice) = triage_advice {
            body["triage_advice"] = serde_json::Value::String(advice.to_string());
        }
        self.with_json_reply("POST", "/api/chatbot/symptom", 200, body)
    }

    /// Queue a chat history reply; pass `json!([])` for a fresh account.
    pub fn with_chat_history(self, rooms: serde_json::Value) -> Self {
        self.with_json_reply("GET", "/api/chatbot/chats", 200, rooms)
    }

    /// Queue the bookable doctor list.
    pub fn with_doctors(self, doctors: serde_json::Value) -> Self {
        self.with_json_reply("GET", "/api/appointment/doctors", 200, doctors)
    }

    /// Queue a statistics reply with every count set to `count`.
    pub fn with_statistics(self, count: u64) -> Self {
        self.with_json_reply(
            "GET",
            "/api/statistics/",
            200,
            serde_json::json!({
                "total_users": count, "total_doctors": count, "total_patients": count,
                "total_appointments": count, "total_chat_sessions": count,
                "total_health_records": count, "total_triage_records": count,
                "total_doctor_notes": count
            }),
        )
    }

    /// Build the test harness: start the mock server, mount every queued
    /// reply, and wire up the client, gate, and temp session store.
    pub async fn build(self) -> Result<TestHarness, HealthSyncError> {
        let server = MockServer::start().await;
        for reply in self.replies {
            let template = match reply.body {
                Some(body) => ResponseTemplate::new(reply.status).set_body_json(body),
                None => ResponseTemplate::new(reply.status),
            };
            Mock::given(method(reply.method))
                .and(path(reply.path))
                .respond_with(template)
                .mount(&server)
                .await;
        }

        let temp_dir = tempfile::TempDir::new().map_err(|e| HealthSyncError::Session {
            message: format!("failed to create temp dir: {e}"),
            source: Some(Box::new(e)),
        })?;
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        let client = PortalClient::new(&server.uri(), 5)?;

        Ok(TestHarness {
            server,
            client,
            gate: Arc::new(SessionGate::new()),
            store,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment: mock portal, client, session state.
pub struct TestHarness {
    /// The mock portal backend. Mount extra expectations directly when a
    /// canned reply is not enough.
    pub server: MockServer,
    /// Client pointed at the mock portal.
    pub client: PortalClient,
    /// Shared in-memory session handle.
    pub gate: Arc<SessionGate>,
    /// Session file in a temp directory, cleaned up on drop.
    pub store: SessionStore,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Drive the real login path: exchange credentials against the mock
    /// portal, install the session in the gate, and persist it.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, HealthSyncError> {
        let token = self.client.login(username, password).await?;
        let session = token.into_session(username, role);
        self.gate.set(session.clone());
        self.store.save(&session).await?;
        Ok(session)
    }

    /// Install a signed-in session directly, for tests that start past
    /// the login screen. Uses the token `test-token`.
    pub async fn sign_in(&self, role: Role) -> Result<Session, HealthSyncError> {
        let session = Session {
            token: "test-token".into(),
            token_type: "bearer".into(),
            username: "amina".into(),
            role,
            user_id: Some(7),
        };
        self.gate.set(session.clone());
        self.store.save(&session).await?;
        Ok(session)
    }

    /// The session currently on disk, if any.
    pub async fn stored_session(&self) -> Result<Option<Session>, HealthSyncError> {
        self.store.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder()
            .with_statistics(3)
            .build()
            .await
            .unwrap();

        let stats = harness.client.statistics().await.unwrap();
        assert_eq!(stats.total_doctors, 3);
        assert!(harness.gate.current().is_none());
        assert!(harness.stored_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_installs_and_persists_the_session() {
        let harness = TestHarness::builder()
            .with_login_token("tok123")
            .build()
            .await
            .unwrap();

        let session = harness.login("amina", "hunter2", Role::Patient).await.unwrap();
        assert_eq!(session.token, "tok123");

        assert_eq!(harness.gate.require().unwrap().username, "amina");
        let stored = harness.stored_session().await.unwrap().unwrap();
        assert_eq!(stored, session);
    }

    #[tokio::test]
    async fn failed_login_leaves_everything_signed_out() {
        let harness = TestHarness::builder()
            .with_json_reply(
                "POST",
                "/api/auth/login",
                401,
                serde_json::json!({"detail": "Incorrect username or password"}),
            )
            .build()
            .await
            .unwrap();

        let err = harness.login("amina", "wrong", Role::Patient).await.unwrap_err();
        assert!(!err.is_unauthorized());
        assert!(harness.gate.current().is_none());
        assert!(harness.stored_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_in_skips_the_wire() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness.sign_in(Role::Doctor).await.unwrap();

        let current = harness.gate.require().unwrap();
        assert_eq!(current.role, Role::Doctor);
        assert_eq!(current.token, "test-token");
    }

    #[tokio::test]
    async fn harnesses_are_isolated() {
        let h1 = TestHarness::builder().build().await.unwrap();
        let h2 = TestHarness::builder().build().await.unwrap();

        h1.sign_in(Role::Patient).await.unwrap();
        assert!(h1.stored_session().await.unwrap().is_some());
        assert!(h2.stored_session().await.unwrap().is_none());
        assert_ne!(h1.server.uri(), h2.server.uri());
    }
}
