//! Gateway error types.

use medingen_auth::AuthError;
use medingen_catalog::CatalogError;
use medingen_data::FetchError;
use thiserror::Error;

/// Message carried by every 401 failure.
pub const AUTH_FAILED: &str = "Authentication failed";

/// The single failure channel of every gateway call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never got an HTTP response. Passed through unchanged.
    #[error(transparent)]
    Transport(FetchError),

    /// Non-2xx response other than 401.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 401 response. The session has already been cleared.
    #[error("Authentication failed")]
    Unauthorized,

    /// The body was not JSON, or not the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A record could not be turned into a view model.
    #[error(transparent)]
    Transform(#[from] CatalogError),

    /// Session storage failed.
    #[error(transparent)]
    Session(#[from] AuthError),

    /// Gateway configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::ParseError(detail) | FetchError::JsonError(detail) => {
                ApiError::InvalidResponse(detail)
            }
            FetchError::HttpError { status: 401, .. } => ApiError::Unauthorized,
            FetchError::HttpError { status, message } => ApiError::Http { status, message },
            other => ApiError::Transport(other),
        }
    }
}
