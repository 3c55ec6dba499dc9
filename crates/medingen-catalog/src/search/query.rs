//! Query builders for the listing endpoints.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Page size the backend uses when none is given.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Query for `/products/`. Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Free-text search.
    pub search: Option<String>,
    pub category: Option<String>,
    pub generic_name: Option<String>,
    /// Product to leave out of the results.
    pub exclude_id: Option<ProductId>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.search = Some(q);
        }
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_generic_name(mut self, generic_name: impl Into<String>) -> Self {
        self.generic_name = Some(generic_name.into());
        self
    }

    pub fn excluding(mut self, id: ProductId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    /// Set pagination. Page is at least 1, page size at least 1.
    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page.max(1));
        self.per_page = Some(per_page.max(1));
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.max(1));
        self
    }

    /// Query-string pairs in a fixed order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category".to_string(), category.clone()));
        }
        if let Some(generic_name) = &self.generic_name {
            params.push(("generic_name".to_string(), generic_name.clone()));
        }
        if let Some(id) = self.exclude_id {
            params.push(("exclude_id".to_string(), id.to_string()));
        }
        params
    }
}

/// Query for `/reviews/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQuery {
    pub product_id: Option<ProductId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ReviewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_product(id: ProductId) -> Self {
        Self {
            product_id: Some(id),
            ..Self::default()
        }
    }

    /// Most recent reviews across all products.
    pub fn recent(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page.max(1)),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.product_id {
            params.push(("product_id".to_string(), id.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(ProductQuery::new().to_params().is_empty());
    }

    #[test]
    fn test_product_query_params_order() {
        let q = ProductQuery::new()
            .excluding(ProductId::new(3))
            .with_category("Analgesic")
            .with_pagination(0, 100);
        assert_eq!(
            pairs(&q.to_params()),
            vec![
                ("page", "1"),
                ("per_page", "100"),
                ("category", "Analgesic"),
                ("exclude_id", "3"),
            ]
        );
    }

    #[test]
    fn test_blank_search_ignored() {
        assert!(ProductQuery::new().with_search("  ").search.is_none());
        assert_eq!(
            ProductQuery::new().with_search("dolo").search.as_deref(),
            Some("dolo")
        );
    }

    #[test]
    fn test_review_queries() {
        assert_eq!(pairs(&ReviewQuery::recent(10).to_params()), vec![("per_page", "10")]);
        assert_eq!(
            pairs(&ReviewQuery::for_product(ProductId::new(4)).with_page(2).to_params()),
            vec![("product_id", "4"), ("page", "2")]
        );
    }
}
