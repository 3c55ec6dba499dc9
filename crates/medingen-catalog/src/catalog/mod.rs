//! Medicine catalog module.
//!
//! Raw backend records, the canonical [`Medicine`] view model, and the
//! pricing and review helpers the view model is built from.

mod lenient;
pub mod list_field;
mod medicine;
pub mod pricing;
mod record;
mod review;

pub use list_field::{normalize_list, FallbackPolicy, ListField};
pub use medicine::{
    transform_batch, BackendProduct, FaqEntry, Medicine, TransformOptions, DEFAULT_MANUFACTURER,
    DEFAULT_NAME,
};
pub use pricing::{
    discounted_price, round_half_up, savings_percent, DiscountPolicy, DiscountTier,
    PriceComparison,
};
pub use record::{RawPageEnvelope, RawProduct, RawProductPage, RawValue, Salt, SaltList};
pub use review::{filled_stars, star_row, Review, ReviewList, ReviewStats, MAX_STARS};
