//! Session management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::Storage;
use crate::AuthError;

/// Storage key the session is persisted under.
pub const DEFAULT_SESSION_KEY: &str = "medingen_user";

/// The persisted session object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Opaque bearer credential issued by the backend.
    pub access_token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl UserSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            username: None,
            user_id: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Name shown in the header menu.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }
}

/// Single-writer, many-reader holder of the current session.
///
/// Every gateway call reads it; only login/registration success and
/// the 401 handler write it. Last write wins.
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when logged out or unreadable.
    fn get(&self) -> Option<UserSession>;

    fn set(&self, session: &UserSession) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;

    /// Bearer token of the current session.
    fn token(&self) -> Option<String> {
        self.get()
            .map(|s| s.access_token)
            .filter(|t| !t.is_empty())
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Session store persisting a JSON-encoded [`UserSession`] under one storage key.
#[derive(Clone)]
pub struct StorageSessionStore {
    storage: Arc<dyn Storage>,
    key: String,
}

impl std::fmt::Debug for StorageSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSessionStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl StorageSessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SessionStore for StorageSessionStore {
    fn get(&self) -> Option<UserSession> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "error parsing stored session");
                None
            }
        }
    }

    fn set(&self, session: &UserSession) -> Result<(), AuthError> {
        let encoded = serde_json::to_string(session)?;
        self.storage.set(&self.key, &encoded)
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.storage.remove(&self.key)
    }
}
