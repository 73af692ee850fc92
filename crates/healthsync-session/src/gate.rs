// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory session handle shared by every screen.
//!
//! All authenticated calls read the token through [`SessionGate`], and
//! every authentication-rejected reply is routed back through it. The
//! gate drops the session on the first rejection and remembers that it
//! already did, so the expiry notice is shown exactly once no matter how
//! many in-flight calls fail together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;
use healthsync_core::{HealthSyncError, Session};
use tracing::{debug, info};

/// What the user sees when any endpoint rejects the stored token.
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired or is invalid. Please log in again.";

/// Lock-free holder of the current session.
///
/// Reads vastly outnumber writes (every API call reads the token; only
/// login, logout, and expiry write), which is what `ArcSwapOption` is
/// built for.
#[derive(Debug)]
pub struct SessionGate {
    current: ArcSwapOption<Session>,
    expired: AtomicBool,
}

impl SessionGate {
    /// Creates an empty gate: nobody signed in, nothing expired.
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            expired: AtomicBool::new(false),
        }
    }

    /// Installs a session after login or registration. Clears any
    /// previous expiry so a later rejection is reported again.
    pub fn set(&self, session: Session) {
        info!(username = %session.username, role = %session.role, "session established");
        self.current.store(Some(Arc::new(session)));
        self.expired.store(false, Ordering::Relaxed);
    }

    /// Drops the session without marking it expired (logout).
    pub fn clear(&self) {
        debug!("session cleared");
        self.current.store(None);
    }

    /// The current session, if anyone is signed in.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    /// The current session, or the error every screen shows when an
    /// authenticated action is attempted while signed out.
    pub fn require(&self) -> Result<Arc<Session>, HealthSyncError> {
        self.current
            .load_full()
            .ok_or_else(|| HealthSyncError::Validation("Authentication token not found".into()))
    }

    /// Records that the server rejected the token and drops the session.
    ///
    /// Returns true only for the first caller since the last successful
    /// login, so concurrent failures produce a single expiry notice.
    pub fn expire(&self) -> bool {
        self.current.store(None);
        !self.expired.swap(true, Ordering::Relaxed)
    }

    /// True once a rejection has been recorded and not yet superseded by
    /// a new login.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
