//! Product detail page.
//!
//! Load order:
//!
//! 1. display config and the product list, concurrently;
//! 2. once products are known, alternatives for the first medicine and
//!    reviews, concurrently.
//!
//! A failed config load falls back to built-in messages. A failed product
//! load is a retryable [`PageError::LoadFailed`]; an empty catalog is
//! [`PageError::NoData`]. Alternatives and reviews degrade to empty lists.

use medingen_catalog::app_config::{
    DEFAULT_LOADING_FAILED, DEFAULT_NO_MEDICINES, LOADING_FAILED, NO_MEDICINES,
};
use medingen_catalog::catalog::{transform_batch, Review};
use medingen_catalog::compare::{
    comparison_grid, rank_alternatives, Alternative, ComparisonSelection,
};
use medingen_catalog::search::{ProductQuery, ReviewQuery};
use medingen_catalog::{AppConfig, Medicine, ProductId};
use medingen_gateway::{ApiError, Gateway};

use crate::alternatives::AlternativeFinder;
use crate::load::{cancellable, LoadHandle};
use crate::PageError;

/// Products fetched for the comparison pool.
pub const PRODUCT_PAGE_SIZE: u32 = 50;
/// Recent reviews shown on the page.
pub const RECENT_REVIEWS: u32 = 10;

/// Everything the product detail page renders.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    config: AppConfig,
    medicines: Vec<Medicine>,
    selected: Medicine,
    alternatives: Vec<Alternative>,
    reviews: Vec<Review>,
    grid: Vec<Medicine>,
    selection: ComparisonSelection,
}

impl ProductDetail {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The comparison pool, in backend order.
    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn selected(&self) -> &Medicine {
        &self.selected
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Top-rated medicines for the side-by-side grid.
    pub fn grid(&self) -> &[Medicine] {
        &self.grid
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    fn find(&self, id: ProductId) -> Option<&Medicine> {
        self.medicines
            .iter()
            .find(|m| m.id() == id)
            .or_else(|| {
                self.alternatives
                    .iter()
                    .map(Alternative::medicine)
                    .find(|m| m.id() == id)
            })
    }

    /// Make `id` the selected medicine. Alternatives are re-ranked against
    /// it: the new selection leaves the list and the previous one joins it.
    pub fn select_medicine(&mut self, id: ProductId) -> Result<(), PageError> {
        if self.selected.id() == id {
            return Ok(());
        }
        let next = self.find(id).cloned().ok_or(PageError::UnknownMedicine(id))?;

        let mut pool: Vec<Medicine> = self
            .alternatives
            .iter()
            .map(|a| a.medicine().clone())
            .collect();
        pool.push(self.selected.clone());

        self.alternatives = rank_alternatives(&next, &pool);
        self.selected = next;
        Ok(())
    }

    /// Add a loaded medicine to the user's comparison.
    pub fn add_to_comparison(&mut self, id: ProductId) -> Result<(), PageError> {
        let medicine = self.find(id).cloned().ok_or(PageError::UnknownMedicine(id))?;
        self.selection.add(medicine)?;
        Ok(())
    }

    pub fn remove_from_comparison(&mut self, id: ProductId) -> bool {
        self.selection.remove(id).is_some()
    }
}

/// Runs the product detail load sequence.
#[derive(Debug, Clone)]
pub struct ProductDetailLoader {
    gateway: Gateway,
    page_size: u32,
}

impl ProductDetailLoader {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            page_size: PRODUCT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Start a load that stops when the returned handle is dropped.
    pub fn start(
        &self,
    ) -> (
        impl std::future::Future<Output = Result<ProductDetail, PageError>> + '_,
        LoadHandle,
    ) {
        cancellable(self.load())
    }

    pub async fn load(&self) -> Result<ProductDetail, PageError> {
        let products_query = ProductQuery::new().with_per_page(self.page_size);
        let (config, products) = futures::join!(
            self.gateway.get_all_config(),
            self.gateway.list_products(&products_query),
        );

        let config = match config {
            Ok(response) => response.into_inner(),
            Err(e) => {
                tracing::warn!(error = %e, "config unavailable, using defaults");
                AppConfig::default()
            }
        };

        let medicines = products
            .and_then(|response| {
                let page = response.into_inner();
                transform_batch(page.products(), self.gateway.transform_options())
                    .map_err(ApiError::from)
            })
            .map_err(|source| {
                tracing::error!(error = %source, "error loading medicines");
                PageError::LoadFailed {
                    message: config.text(LOADING_FAILED, DEFAULT_LOADING_FAILED),
                    source,
                }
            })?;

        let Some(selected) = medicines.first().cloned() else {
            tracing::info!("backend returned no medicines");
            return Err(PageError::NoData(
                config.text(NO_MEDICINES, DEFAULT_NO_MEDICINES),
            ));
        };

        let finder = AlternativeFinder::all_products(self.gateway.clone());
        let (alternatives, reviews) = futures::join!(
            finder.find(&selected),
            self.load_reviews(selected.id()),
        );

        let grid = comparison_grid(&medicines)?;

        Ok(ProductDetail {
            config,
            medicines,
            selected,
            alternatives,
            reviews,
            grid,
            selection: ComparisonSelection::new(),
        })
    }

    /// Recent reviews, else the product's own reviews, else none.
    pub async fn load_reviews(&self, id: ProductId) -> Vec<Review> {
        match self.gateway.list_reviews(&ReviewQuery::recent(RECENT_REVIEWS)).await {
            Ok(response) => return response.into_inner().reviews,
            Err(e) => tracing::warn!(error = %e, "recent reviews unavailable, trying product reviews"),
        }
        match self.gateway.product_reviews(id).await {
            Ok(response) => response.into_inner().reviews,
            Err(e) => {
                tracing::warn!(product = %id, error = %e, "product reviews unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use medingen_auth::{MemoryStorage, StorageSessionStore};
    use medingen_catalog::CatalogError;
    use medingen_data::mock::MockTransport;
    use medingen_data::{FetchError, Method};
    use medingen_gateway::GatewayConfig;
    use serde_json::json;

    fn loader(mock: MockTransport) -> (ProductDetailLoader, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let session = Arc::new(StorageSessionStore::new(Arc::new(MemoryStorage::new())));
        let gateway = Gateway::with_transport(mock.clone(), &GatewayConfig::default(), session);
        (ProductDetailLoader::new(gateway), mock)
    }

    fn catalog() -> serde_json::Value {
        json!({"products": [
            {"id": 1, "name": "Dolo 650", "price": "30", "avg_rating": 4.1},
            {"id": 2, "name": "Crocin", "price": "25", "avg_rating": 4.6},
            {"id": 3, "name": "Calpol", "price": "40", "avg_rating": 3.9},
            {"id": 4, "name": "Pacimol", "price": "18", "avg_rating": 4.6},
            {"id": 5, "name": "Metacin", "price": "22", "avg_rating": 2.0}
        ]})
    }

    fn ids(items: &[Medicine]) -> Vec<i64> {
        items.iter().map(|m| m.id().get()).collect()
    }

    #[tokio::test]
    async fn test_full_load() {
        let (loader, mock) = loader(
            MockTransport::new()
                .respond(Method::Get, "/config/", 200, json!({"config": {}}))
                .respond(Method::Get, "/products/", 200, catalog())
                .respond(Method::Get, "/reviews/", 200, json!({"reviews": [{"id": 1, "rating": 5, "comment": "Good"}]})),
        );
        let page = loader.load().await.unwrap();

        assert_eq!(page.selected().id(), ProductId::new(1));
        assert_eq!(page.medicines().len(), 5);
        assert_eq!(ids(page.grid()), vec![2, 4, 1, 3]);
        assert_eq!(page.reviews().len(), 1);

        // Alternatives: everything but the selection, cheapest first
        let alt_ids: Vec<i64> = page.alternatives().iter().map(|a| a.id().get()).collect();
        assert_eq!(alt_ids, vec![4, 5, 2, 3]);

        let product_requests = mock.requests_to("/products/");
        assert_eq!(product_requests[0].query_pairs()[0].1, "50");
        assert_eq!(product_requests[1].query_pairs()[0].1, "1000");
        assert_eq!(mock.requests_to("/reviews/")[0].query_pairs()[0].1, "10");
    }

    #[tokio::test]
    async fn test_empty_catalog_is_no_data() {
        let (loader, _) = loader(
            MockTransport::new()
                .respond(Method::Get, "/config/", 200, json!({"config": {"error.no_medicines": "Catalog empty"}}))
                .respond(Method::Get, "/products/", 200, json!({"products": []})),
        );
        match loader.load().await {
            Err(PageError::NoData(message)) => assert_eq!(message, "Catalog empty"),
            other => panic!("expected NoData, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_product_failure_uses_default_message() {
        let (loader, _) = loader(
            MockTransport::new()
                .fail(Method::Get, "/config/", FetchError::Transport("down".into()))
                .fail(Method::Get, "/products/", FetchError::Transport("down".into())),
        );
        let err = loader.load().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), DEFAULT_LOADING_FAILED);
    }

    #[tokio::test]
    async fn test_reviews_fall_back_then_degrade() {
        let (fallback, mock) = loader(
            MockTransport::new()
                .respond(Method::Get, "/reviews/", 500, json!({"error": "boom"}))
                .respond(Method::Get, "/reviews/", 200, json!({"reviews": [{"id": 4, "rating": 3}]})),
        );
        let reviews = fallback.load_reviews(ProductId::new(8)).await;
        assert_eq!(reviews.len(), 1);
        let second = &mock.requests_to("/reviews/")[1];
        assert_eq!(second.query_pairs()[0], ("product_id".to_string(), "8".to_string()));

        let (failing, _) = loader(MockTransport::new().respond(Method::Get, "/reviews/", 500, json!({})));
        assert!(failing.load_reviews(ProductId::new(8)).await.is_empty());
    }

    #[tokio::test]
    async fn test_select_medicine_rebases_alternatives() {
        let (loader, _) = loader(
            MockTransport::new()
                .respond(Method::Get, "/products/", 200, catalog())
                .respond(Method::Get, "/reviews/", 200, json!({"reviews": []})),
        );
        let mut page = loader.load().await.unwrap();

        page.select_medicine(ProductId::new(3)).unwrap();
        assert_eq!(page.selected().id(), ProductId::new(3));

        let alt_ids: Vec<i64> = page.alternatives().iter().map(|a| a.id().get()).collect();
        assert_eq!(alt_ids, vec![4, 5, 2, 1]);
        // 18 vs 40 => 55% cheaper
        assert_eq!(page.alternatives()[0].savings_percent(), 55);

        assert!(matches!(
            page.select_medicine(ProductId::new(99)),
            Err(PageError::UnknownMedicine(_))
        ));
    }

    #[tokio::test]
    async fn test_comparison_selection() {
        let (loader, _) = loader(MockTransport::new().respond(Method::Get, "/products/", 200, catalog()));
        let mut page = loader.load().await.unwrap();

        for id in 1..=4 {
            page.add_to_comparison(ProductId::new(id)).unwrap();
        }
        assert!(matches!(
            page.add_to_comparison(ProductId::new(5)),
            Err(PageError::Catalog(CatalogError::SelectionFull(4)))
        ));
        assert!(page.remove_from_comparison(ProductId::new(2)));
        assert!(matches!(
            page.add_to_comparison(ProductId::new(1)),
            Err(PageError::Catalog(CatalogError::AlreadySelected(_)))
        ));
        page.add_to_comparison(ProductId::new(5)).unwrap();
    }

    #[tokio::test]
    async fn test_dropped_handle_cancels_load() {
        let (loader, _) = loader(MockTransport::new().respond(Method::Get, "/products/", 200, catalog()));
        let (load, handle) = loader.start();
        drop(handle);
        assert!(matches!(load.await, Err(PageError::Cancelled)));
    }
}
