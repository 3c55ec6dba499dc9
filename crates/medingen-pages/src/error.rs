//! Page error types.

use medingen_catalog::{CatalogError, ProductId};
use medingen_gateway::ApiError;
use thiserror::Error;

/// Why a page could not be shown.
#[derive(Error, Debug)]
pub enum PageError {
    /// The backend answered but had nothing to show.
    #[error("{0}")]
    NoData(String),

    /// The initial load failed; `message` is the user-facing text.
    #[error("{message}")]
    LoadFailed {
        message: String,
        #[source]
        source: ApiError,
    },

    /// A gateway call outside the initial load failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A comparison or selection action was rejected.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No loaded medicine has this id.
    #[error("Medicine {0} is not loaded")]
    UnknownMedicine(ProductId),

    /// The load was aborted before it finished.
    #[error("Load cancelled")]
    Cancelled,
}

impl PageError {
    /// Whether the page should offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            PageError::LoadFailed { source, .. } | PageError::Api(source) => {
                !source.is_auth_failure()
            }
            _ => false,
        }
    }
}
