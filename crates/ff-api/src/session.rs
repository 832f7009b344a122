//! Session state and its on-disk lifecycle.
//!
//! The session is created at app start (restoring a cached token if one
//! exists) and torn down on logout. Views only ever read it; the auth flow is
//! the single writer. A session carries the path it was restored from;
//! sessions built with [`Session::new`] have no backing file and never touch
//! disk.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionData {
    pub access_token: Option<String>,
    pub email: Option<String>,
}

/// Shared, read-mostly session handle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
    file: Option<Arc<PathBuf>>,
}

impl Session {
    /// In-memory only: no backing file, sign-in and sign-out skip disk.
    pub fn new(data: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
            file: None,
        }
    }

    /// Restore from the default cached session file; an unreadable or missing
    /// file just means "signed out".
    pub fn restore() -> Self {
        match session_file_path() {
            Some(path) => Self::restore_from(path),
            None => Self::default(),
        }
    }

    /// Restore from `path` and keep persisting there.
    pub fn restore_from(path: PathBuf) -> Self {
        let data = std::fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_yaml::from_str(&text).ok())
            .unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(data)),
            file: Some(Arc::new(path)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .map(|d| d.access_token.is_some())
            .unwrap_or(false)
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|d| d.access_token.clone())
    }

    pub fn email(&self) -> Option<String> {
        self.inner.read().ok().and_then(|d| d.email.clone())
    }

    /// Record a fresh login and persist it for the next start.
    pub fn sign_in(&self, token: String, email: String) -> ApiResult<()> {
        {
            let mut data = self
                .inner
                .write()
                .map_err(|_| ApiError::SessionStore("session lock poisoned".to_string()))?;
            data.access_token = Some(token);
            data.email = Some(email);
        }
        self.persist()
    }

    /// Teardown: clear in-memory state and delete the cached file.
    pub fn sign_out(&self) -> ApiResult<()> {
        if let Ok(mut data) = self.inner.write() {
            *data = SessionData::default();
        }
        if let Some(path) = &self.file {
            if path.exists() {
                std::fs::remove_file(path.as_ref())
                    .map_err(|e| ApiError::SessionStore(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn persist(&self) -> ApiResult<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        let data = self
            .inner
            .read()
            .map_err(|_| ApiError::SessionStore("session lock poisoned".to_string()))?
            .clone();
        let text =
            serde_yaml::to_string(&data).map_err(|e| ApiError::SessionStore(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::SessionStore(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), text).map_err(|e| ApiError::SessionStore(e.to_string()))
    }
}

/// `$XDG_CONFIG_HOME/finflow/session.yaml`, falling back to `~/.config`.
fn session_file_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("finflow").join("session.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_signed_out() {
        let session = Session::new(SessionData::default());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn sign_in_updates_in_memory_state() {
        let session = Session::new(SessionData::default());
        session
            .sign_in("tok-123".to_string(), "ada@example.com".to_string())
            .expect("in-memory sign-in cannot fail");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        assert_eq!(session.email().as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn file_backed_session_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "finflow-session-{}.yaml",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let session = Session::restore_from(path.clone());
        assert!(!session.is_authenticated());
        session
            .sign_in("tok-456".to_string(), "grace@example.com".to_string())
            .expect("persist to temp file");

        let restored = Session::restore_from(path.clone());
        assert_eq!(restored.token().as_deref(), Some("tok-456"));
        assert_eq!(restored.email().as_deref(), Some("grace@example.com"));

        restored.sign_out().expect("remove temp file");
        assert!(!path.exists());
        assert!(!restored.is_authenticated());
    }
}
