//! Listing queries and paginated results.

mod query;
mod results;

pub use query::{ProductQuery, ReviewQuery, DEFAULT_PER_PAGE};
pub use results::{Paginated, Pagination};
