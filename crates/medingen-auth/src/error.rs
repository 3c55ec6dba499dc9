//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or password missing before the request was even sent.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backend accepted the login but did not issue a token.
    #[error("login response did not include an access token")]
    MissingToken,

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for AuthError {
    fn from(e: std::io::Error) -> Self {
        AuthError::Storage(e.to_string())
    }
}
