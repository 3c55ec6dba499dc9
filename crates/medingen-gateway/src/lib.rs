//! Backend gateway for the Medingen storefront.
//!
//! Translates the storefront's logical operations (list products, get a
//! product, reviews, salts, login, config) into HTTP requests against a
//! configurable base URL and returns either `ApiResponse { data }` or an
//! [`ApiError`]. Pages never build URLs or parse JSON themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medingen_auth::FileStorage;
//! use medingen_gateway::{Gateway, GatewayConfig};
//!
//! let config = GatewayConfig::from_env();
//! let storage = Arc::new(FileStorage::open(".medingen")?);
//! let session = Arc::new(config.session_store(storage));
//! let gateway = Gateway::new(&config, session)?;
//!
//! let page = gateway.list_medicines(&ProductQuery::new().with_per_page(50)).await?;
//! ```

mod client;
mod config;
mod envelope;
mod error;
pub mod redirect;

pub use client::{Gateway, SEARCH_PAGE_SIZE};
pub use config::{GatewayConfig, API_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use envelope::ApiResponse;
pub use error::{ApiError, AUTH_FAILED};
pub use redirect::{AuthRedirect, NoRedirect, ViewRedirect, LOGIN_PATH};
