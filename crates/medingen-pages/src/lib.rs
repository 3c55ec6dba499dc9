//! Page flows for the Medingen storefront.
//!
//! Each page coordinates [`Gateway`](medingen_gateway::Gateway) calls with
//! the catalog transforms and exposes the resulting state:
//!
//! - [`ProductDetailLoader`] loads config and products, then alternatives
//!   and reviews for the selected medicine.
//! - [`AlternativeFinder`] runs the alternative retrieval strategies.
//! - [`AuthFlow`] drives the login/registration form.
//!
//! Loads can be wrapped with [`cancellable`] so page teardown discards
//! results that arrive late.
//!
//! ```rust,ignore
//! medingen_pages::telemetry::init_tracing("info")?;
//!
//! let loader = ProductDetailLoader::new(gateway);
//! let (load, _handle) = loader.start();
//! let page = load.await?;
//! println!("{} alternatives", page.alternatives().len());
//! ```

pub mod alternatives;
pub mod auth_flow;
mod error;
pub mod load;
pub mod product_detail;
pub mod telemetry;

pub use alternatives::{AlternativeFinder, DEFAULT_TARGET};
pub use auth_flow::{AuthFlow, AuthMode, MIN_REGISTER_PASSWORD};
pub use error::PageError;
pub use load::{cancellable, LoadHandle};
pub use product_detail::{ProductDetail, ProductDetailLoader, PRODUCT_PAGE_SIZE, RECENT_REVIEWS};
