//! Login and registration payloads.

use serde::{Deserialize, Serialize};

use crate::{AuthError, UserSession};

/// Username/password pair posted to `/login` and `/register`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject obviously incomplete forms before hitting the network.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidCredentials("password is required".to_string()));
        }
        Ok(())
    }
}

/// What the backend answers to a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl AuthPayload {
    /// Convert into the session object that gets persisted.
    pub fn into_session(self) -> Result<UserSession, AuthError> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        Ok(UserSession {
            access_token: token,
            username: self.username,
            user_id: self.user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("asha", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("asha"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(Credentials::new("", "pw").validate().is_err());
        assert!(Credentials::new("   ", "pw").validate().is_err());
        assert!(Credentials::new("asha", "").validate().is_err());
        assert!(Credentials::new("asha", "pw").validate().is_ok());
    }

    #[test]
    fn test_payload_into_session() {
        let payload: AuthPayload =
            serde_json::from_str(r#"{"token":"abc","username":"asha","user_id":4}"#).unwrap();
        let session = payload.into_session().unwrap();
        assert_eq!(session.access_token, "abc");
        assert_eq!(session.username.as_deref(), Some("asha"));
        assert_eq!(session.user_id, Some(4));
    }

    #[test]
    fn test_payload_without_token_is_rejected() {
        let payload: AuthPayload = serde_json::from_str(r#"{"username":"asha"}"#).unwrap();
        assert!(matches!(payload.into_session(), Err(AuthError::MissingToken)));
    }
}
