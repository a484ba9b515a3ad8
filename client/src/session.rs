use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Authenticated session, persisted between invocations. The file-based
/// store below is the single authoritative copy; login and logout are the
/// only writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    // Canonical field is `access_token`; older session files used a few
    // different spellings and are migrated on the next save.
    #[serde(alias = "token", alias = "accessToken", alias = "jobAgentToken")]
    pub access_token: String,
}

impl Session {
    pub fn logged(&self) -> bool {
        !self.access_token.is_empty()
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's home directory.
    pub fn default_path() -> Option<PathBuf> {
        home::home_dir().map(|dir| dir.join(".config").join("careerboost").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored session. A missing file means no session; an
    /// unreadable file is discarded rather than failing every command.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(mut session) => {
                session.access_token = normalize_token(&session.access_token);
                if session.access_token.is_empty() {
                    return Ok(None);
                }
                Ok(Some(session))
            }
            Err(error) => {
                warn!(%error, path = %self.path.display(), "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

// Tokens occasionally end up stored with the header scheme baked in.
fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))
        .unwrap_or(trimmed);
    trimmed.trim().to_owned()
}
