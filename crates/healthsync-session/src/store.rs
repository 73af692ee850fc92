// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session persistence: one JSON document on disk.
//!
//! The session file is the only state HealthSync keeps between runs.
//! Login writes it, logout deletes it, and a rejected token deletes it
//! too, so the file on disk always mirrors whether the user is signed in.

use std::path::{Path, PathBuf};

use healthsync_core::{HealthSyncError, Session};
use tracing::{debug, warn};

/// Reads and writes the session file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store for the session file at `path`.
    ///
    /// The path normally comes from `[session].path` in the config; the
    /// file and its parent directories are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, if any.
    ///
    /// A missing file means nobody is signed in. A file that exists but
    /// does not parse is treated the same way, with a warning, so a
    /// corrupt file can always be recovered from by logging in again.
    pub async fn load(&self) -> Result<Option<Session>, HealthSyncError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(HealthSyncError::Session {
                    message: format!("failed to read session file {}: {e}", self.path.display()),
                    source: Some(Box::new(e)),
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file is corrupt, treating as signed out"
                );
                Ok(None)
            }
        }
    }

    /// Writes `session` to disk, creating parent directories as needed.
    pub async fn save(&self, session: &Session) -> Result<(), HealthSyncError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HealthSyncError::Session {
                    message: format!(
                        "failed to create session directory {}: {e}",
                        parent.display()
                    ),
                    source: Some(Box::new(e)),
                })?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|e| HealthSyncError::Session {
            message: format!("failed to serialize session: {e}"),
            source: Some(Box::new(e)),
        })?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| HealthSyncError::Session {
                message: format!("failed to write session file {}: {e}", self.path.display()),
                source: Some(Box::new(e)),
            })?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Deletes the session file. Deleting an absent file is not an error,
    /// so logging out twice is harmless.
    pub async fn clear(&self) -> Result<(), HealthSyncError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HealthSyncError::Session {
                message: format!("failed to delete session file {}: {e}", self.path.display()),
                source: Some(Box::new(e)),
            }),
        }
    }
}
