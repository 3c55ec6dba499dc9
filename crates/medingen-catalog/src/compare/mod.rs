//! Alternatives and comparison.

mod alternatives;
mod grid;

pub use alternatives::{
    merge_strategies, rank_alternatives, Alternative, AlternativeReason, AlternativeSet,
    ALL_PRODUCTS_PAGE_SIZE, STRATEGY_PAGE_SIZE,
};
pub use grid::{comparison_grid, top_rated, ComparisonSelection, COMPARISON_LIMIT};
