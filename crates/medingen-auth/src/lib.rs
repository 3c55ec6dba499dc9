//! Client-side session handling for the Medingen storefront.
//!
//! The backend issues opaque bearer tokens; this crate only stores and
//! hands them out. It never validates or refreshes a token.

mod credentials;
mod error;
mod session;
pub mod storage;

pub use credentials::{AuthPayload, Credentials};
pub use error::AuthError;
pub use session::{SessionStore, StorageSessionStore, UserSession, DEFAULT_SESSION_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
