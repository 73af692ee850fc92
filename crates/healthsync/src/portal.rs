// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state every screen works against: the API client, the session
//! gate, and the persisted session file.

use std::sync::Arc;

use colored::Colorize;
use healthsync_api::PortalClient;
use healthsync_config::HealthSyncConfig;
use healthsync_core::{HealthSyncError, Session};
use healthsync_session::{SESSION_EXPIRED_MESSAGE, SessionGate, SessionStore};
use tracing::warn;

/// Shown by authenticated commands when nobody is signed in.
pub const SIGN_IN_HINT: &str = "You are not signed in. Run `healthsync login` first.";

/// The assembled client stack, built once at startup.
pub struct Portal {
    pub config: HealthSyncConfig,
    pub client: PortalClient,
    pub gate: Arc<SessionGate>,
    pub store: SessionStore,
}

impl Portal {
    /// Builds the client from config and restores any persisted session
    /// into the gate.
    pub async fn connect(config: HealthSyncConfig) -> Result<Self, HealthSyncError> {
        let client = PortalClient::new(&config.api.base_url, config.api.timeout_secs)?;
        let store = SessionStore::new(&config.session.path);
        let gate = Arc::new(SessionGate::new());

        if let Some(session) = store.load().await? {
            gate.set(session);
        }

        Ok(Self {
            config,
            client,
            gate,
            store,
        })
    }

    /// The current session, or the sign-in hint for the command surface.
    pub fn require_session(&self) -> Result<Arc<Session>, HealthSyncError> {
        self.gate
            .current()
            .ok_or_else(|| HealthSyncError::Validation(SIGN_IN_HINT.into()))
    }

    /// Installs a freshly authenticated session and persists it.
    pub async fn establish(&self, session: Session) -> Result<(), HealthSyncError> {
        self.gate.set(session.clone());
        self.store.save(&session).await
    }

    /// Signs out deliberately: no expiry notice, session file removed.
    pub async fn sign_out(&self) -> Result<(), HealthSyncError> {
        self.gate.clear();
        self.store.clear().await
    }

    /// The forced-logout path for a rejected token.
    ///
    /// Drops the in-memory session, deletes the session file, and prints
    /// the expiry notice. The gate guarantees the notice appears exactly
    /// once even when several in-flight calls were rejected together.
    pub async fn expire(&self) {
        if self.gate.expire() {
            eprintln!("{}", SESSION_EXPIRED_MESSAGE.yellow());
        }
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to remove session file after expiry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthsync_core::Role;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path) -> HealthSyncConfig {
        let mut config = HealthSyncConfig::default();
        config.session.path = dir.join("session.json").to_string_lossy().into_owned();
        config
    }

    fn test_session() -> Session {
        Session {
            token: "tok123".into(),
            token_type: "bearer".into(),
            username: "amina".into(),
            role: Role::Patient,
            user_id: Some(7),
        }
    }

    #[tokio::test]
    async fn connect_without_session_file_starts_signed_out() {
        let dir = tempdir().unwrap();
        let portal = Portal::connect(test_config(dir.path())).await.unwrap();

        let err = portal.require_session().unwrap_err();
        assert_eq!(err.to_string(), SIGN_IN_HINT);
    }

    #[tokio::test]
    async fn connect_restores_a_persisted_session() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());

        let store = SessionStore::new(&config.session.path);
        store.save(&test_session()).await.unwrap();

        let portal = Portal::connect(config).await.unwrap();
        assert_eq!(portal.require_session().unwrap().username, "amina");
    }

    #[tokio::test]
    async fn establish_persists_and_sign_out_removes() {
        let dir = tempdir().unwrap();
        let portal = Portal::connect(test_config(dir.path())).await.unwrap();

        portal.establish(test_session()).await.unwrap();
        assert!(portal.store.load().await.unwrap().is_some());

        portal.sign_out().await.unwrap();
        assert!(portal.require_session().is_err());
        assert!(portal.store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expire_clears_session_state() {
        let dir = tempdir().unwrap();
        let portal = Portal::connect(test_config(dir.path())).await.unwrap();
        portal.establish(test_session()).await.unwrap();

        portal.expire().await;
        assert!(portal.require_session().is_err());
        assert!(portal.store.load().await.unwrap().is_none());
        assert!(portal.gate.is_expired());
    }
}
