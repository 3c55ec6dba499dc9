//! Medicine catalog domain for Medingen.
//!
//! Everything between the backend's raw JSON and what a page renders:
//!
//! - **Catalog**: raw product records, the [`Medicine`] view model, pricing, reviews
//! - **Search**: listing queries and paginated results
//! - **Compare**: alternative ranking and the comparison grid
//! - **Offers / Notifications**: storefront side panels
//!
//! # Example
//!
//! ```rust,ignore
//! use medingen_catalog::prelude::*;
//!
//! let raw: RawProduct = serde_json::from_str(r#"{"id":1,"price":"100","brand":"Acme"}"#)?;
//! let medicine = Medicine::from_backend(&raw, &TransformOptions::default())?;
//! assert_eq!(medicine.discounted_price(), 80.0);
//!
//! let alternatives = rank_alternatives(&medicine, &pool);
//! let grid = comparison_grid(&pool)?;
//! ```

pub mod app_config;
pub mod error;
pub mod ids;
pub mod notifications;
pub mod offers;

pub mod catalog;
pub mod compare;
pub mod search;

pub use app_config::AppConfig;
pub use catalog::{Medicine, RawProduct, TransformOptions};
pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::app_config::AppConfig;
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        filled_stars, transform_batch, BackendProduct, DiscountPolicy, DiscountTier, FaqEntry,
        FallbackPolicy, ListField, Medicine, PriceComparison, RawProduct, RawProductPage, Review,
        ReviewList, ReviewStats, Salt, SaltList, TransformOptions,
    };

    // Compare
    pub use crate::compare::{
        comparison_grid, rank_alternatives, top_rated, Alternative, AlternativeReason,
        AlternativeSet, ComparisonSelection, COMPARISON_LIMIT,
    };

    // Search
    pub use crate::search::{Paginated, Pagination, ProductQuery, ReviewQuery};

    // Side panels
    pub use crate::notifications::{
        Notification, NotificationCenter, NotificationFilter, NotificationKind,
    };
    pub use crate::offers::{Offer, OfferBoard};
}
