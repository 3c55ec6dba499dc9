//! The backend gateway.

use std::sync::Arc;

use futures::future::join_all;
use medingen_auth::{AuthPayload, Credentials, SessionStore};
use medingen_catalog::catalog::{
    RawProduct, RawProductPage, Review, ReviewList, ReviewStats, Salt, SaltList,
};
use medingen_catalog::search::{Paginated, ProductQuery, ReviewQuery};
use medingen_catalog::{AppConfig, Medicine, ProductId, ReviewId, SaltId, TransformOptions};
use medingen_data::{ClientRequestBuilder, FetchClient, Method, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::redirect::{AuthRedirect, NoRedirect};
use crate::{ApiError, ApiResponse, GatewayConfig};

/// Page size for category and generic-name searches.
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Typed access to the storefront backend.
///
/// Every call attaches the stored bearer token when there is one. A 401
/// clears the session and triggers the login redirect before failing.
/// Calls share no mutable state and may run concurrently.
#[derive(Clone)]
pub struct Gateway {
    http: FetchClient,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn AuthRedirect>,
    transform: TransformOptions,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("http", &self.http)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Gateway over real HTTP.
    pub fn new(config: &GatewayConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeout()).map_err(ApiError::Transport)?;
        Ok(Self::with_transport(Arc::new(transport), config, session))
    }

    /// Gateway over any transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        config: &GatewayConfig,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        let http = FetchClient::new(transport)
            .with_base_url(config.base_url.clone())
            .with_default_header(http::header::CONTENT_TYPE.as_str(), "application/json");
        Self {
            http,
            session,
            redirect: Arc::new(NoRedirect),
            transform: config.transform.clone(),
        }
    }

    pub fn with_redirect(mut self, redirect: Arc<dyn AuthRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn transform_options(&self) -> &TransformOptions {
        &self.transform
    }

    // === Core ===

    fn request(&self, method: Method, path: &str) -> ClientRequestBuilder {
        let request = self.http.request(method, path);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let method = request.as_request().method();
        let path = request.as_request().path();
        tracing::debug!(%method, %path, "backend request");

        let response = request.send().await.map_err(ApiError::Transport)?;

        if response.is_unauthorized() {
            tracing::warn!(%path, "401 from backend, clearing session");
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "failed to clear session");
            }
            self.redirect.redirect_to_login();
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let status = response.status;
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("HTTP {}", status));
            tracing::warn!(%path, status, %message, "backend error");
            return Err(ApiError::Http { status, message });
        }

        match response.json::<T>() {
            Ok(data) => Ok(ApiResponse::new(data)),
            Err(e) => {
                tracing::error!(%path, error = %e, "error parsing JSON response");
                Err(ApiError::InvalidResponse(e.to_string()))
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.fetch(self.request(Method::Get, path).query(params))
            .await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = self
            .request(Method::Post, path)
            .json(body)
            .map_err(ApiError::from)?;
        self.fetch(request).await
    }

    // === Products ===

    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ApiResponse<RawProductPage>, ApiError> {
        self.get("/products/", query.to_params()).await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ApiResponse<RawProduct>, ApiError> {
        self.get(&format!("/products/{}", id), Vec::new()).await
    }

    /// Free-text search; `search` overrides any search already in `params`.
    pub async fn search_medicines(
        &self,
        search: &str,
        params: ProductQuery,
    ) -> Result<ApiResponse<RawProductPage>, ApiError> {
        let query = ProductQuery {
            search: Some(search.to_string()),
            ..params
        };
        self.list_products(&query).await
    }

    /// Products other than `id`.
    pub async fn alternatives(
        &self,
        id: ProductId,
        params: ProductQuery,
    ) -> Result<ApiResponse<RawProductPage>, ApiError> {
        self.list_products(&params.excluding(id)).await
    }

    pub async fn search_by_category(
        &self,
        category: &str,
    ) -> Result<ApiResponse<RawProductPage>, ApiError> {
        let query = ProductQuery::new()
            .with_category(category)
            .with_per_page(SEARCH_PAGE_SIZE);
        self.list_products(&query).await
    }

    pub async fn search_by_generic(
        &self,
        generic_name: &str,
    ) -> Result<ApiResponse<RawProductPage>, ApiError> {
        let query = ProductQuery::new()
            .with_generic_name(generic_name)
            .with_per_page(SEARCH_PAGE_SIZE);
        self.list_products(&query).await
    }

    /// Fetch several products concurrently. Results keep the order of
    /// `ids`; the first failure in that order is returned.
    pub async fn compare_medicines(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ApiResponse<RawProduct>>, ApiError> {
        join_all(ids.iter().map(|id| self.get_product(*id)))
            .await
            .into_iter()
            .collect()
    }

    /// `list_products`, transformed into view models.
    pub async fn list_medicines(
        &self,
        query: &ProductQuery,
    ) -> Result<ApiResponse<Paginated<Medicine>>, ApiError> {
        let page = self.list_products(query).await?.into_inner();
        Ok(ApiResponse::new(Paginated::from_backend(&page, &self.transform)?))
    }

    /// `get_product`, transformed into a view model.
    pub async fn get_medicine(&self, id: ProductId) -> Result<ApiResponse<Medicine>, ApiError> {
        let raw = self.get_product(id).await?.into_inner();
        Ok(ApiResponse::new(Medicine::from_backend(&raw, &self.transform)?))
    }

    // === Salts ===

    pub async fn list_salts(
        &self,
        product_id: Option<ProductId>,
    ) -> Result<ApiResponse<Vec<Salt>>, ApiError> {
        let params = product_id
            .map(|id| vec![("product_id".to_string(), id.to_string())])
            .unwrap_or_default();
        let salts: ApiResponse<SaltList> = self.get("/salts/", params).await?;
        Ok(salts.map(SaltList::into_salts))
    }

    pub async fn get_salt(&self, id: SaltId) -> Result<ApiResponse<Salt>, ApiError> {
        self.get(&format!("/salts/{}", id), Vec::new()).await
    }

    // === Reviews ===

    pub async fn list_reviews(&self, query: &ReviewQuery) -> Result<ApiResponse<ReviewList>, ApiError> {
        self.get("/reviews/", query.to_params()).await
    }

    pub async fn product_reviews(&self, id: ProductId) -> Result<ApiResponse<ReviewList>, ApiError> {
        self.list_reviews(&ReviewQuery::for_product(id)).await
    }

    pub async fn get_review(&self, id: ReviewId) -> Result<ApiResponse<Review>, ApiError> {
        self.get(&format!("/reviews/{}", id), Vec::new()).await
    }

    pub async fn review_stats(
        &self,
        product_id: ProductId,
    ) -> Result<ApiResponse<ReviewStats>, ApiError> {
        self.get(&format!("/reviews/stats/{}", product_id), Vec::new()).await
    }

    // === Users ===

    /// POST `/login`. Storing the returned token is the caller's job.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse<AuthPayload>, ApiError> {
        self.post("/login", credentials).await
    }

    /// POST `/register`. Storing the returned token is the caller's job.
    pub async fn register(
        &self,
        credentials: &Credentials,
    ) -> Result<ApiResponse<AuthPayload>, ApiError> {
        self.post("/register", credentials).await
    }

    // === Configuration ===

    pub async fn get_all_config(&self) -> Result<ApiResponse<AppConfig>, ApiError> {
        let payload: ApiResponse<serde_json::Value> = self.get("/config/", Vec::new()).await?;
        app_config(payload)
    }

    pub async fn get_config(&self, key: &str) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.get(&format!("/config/{}", key), Vec::new()).await
    }

    pub async fn config_by_category(&self, category: &str) -> Result<ApiResponse<AppConfig>, ApiError> {
        let payload: ApiResponse<serde_json::Value> = self
            .get(&format!("/config/by-category/{}", category), Vec::new())
            .await?;
        app_config(payload)
    }
}

fn app_config(payload: ApiResponse<serde_json::Value>) -> Result<ApiResponse<AppConfig>, ApiError> {
    AppConfig::from_payload(payload.into_inner())
        .map(ApiResponse::new)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}
