//! Catalog error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised while building or manipulating view models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A required backend field was absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A required backend field was present but unusable.
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The comparison selection already holds its maximum.
    #[error("Comparison is full ({0} medicines)")]
    SelectionFull(usize),

    /// The medicine is already part of the comparison.
    #[error("Medicine {0} is already selected for comparison")]
    AlreadySelected(ProductId),

    /// An operation needed at least one product.
    #[error("No products available")]
    EmptyPool,
}
