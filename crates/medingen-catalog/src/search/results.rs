//! Paginated listings.

use serde::{Deserialize, Serialize};

use crate::catalog::{transform_batch, Medicine, RawProductPage, TransformOptions};
use crate::error::CatalogError;

/// Pagination info, camelCased for the presentation layer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub pages: u64,
    /// Current page (1-indexed).
    pub current_page: u64,
    /// Items per page.
    pub per_page: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Pagination for a single page holding every item.
    pub fn single_page(len: usize) -> Self {
        let len = len as u64;
        Self {
            total: len,
            pages: 1,
            current_page: 1,
            per_page: len,
            has_next: false,
            has_prev: false,
        }
    }

    pub fn is_first(&self) -> bool {
        !self.has_prev
    }

    pub fn is_last(&self) -> bool {
        !self.has_next
    }
}

/// A page of transformed items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    #[serde(rename = "products")]
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Pagination::default())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Paginated<Medicine> {
    /// Transform a `/products/` payload. A bare array is read as one page
    /// holding every product; absent envelope fields read as zero/false.
    pub fn from_backend(
        page: &RawProductPage,
        options: &TransformOptions,
    ) -> Result<Self, CatalogError> {
        let items = transform_batch(page.products(), options)?;
        let pagination = match page {
            RawProductPage::Bare(products) => Pagination::single_page(products.len()),
            RawProductPage::Page(envelope) => Pagination {
                total: envelope.total.unwrap_or(0),
                pages: envelope.pages.unwrap_or(0),
                current_page: envelope.current_page.unwrap_or(0),
                per_page: envelope.per_page.unwrap_or(0),
                has_next: envelope.has_next.unwrap_or(false),
                has_prev: envelope.has_prev.unwrap_or(false),
            },
        };
        Ok(Self::new(items, pagination))
    }
}
