//! HTTP client utilities for the Medingen storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`] with
//! automatic JSON handling. Production code uses [`ReqwestTransport`];
//! tests script responses with `MockTransport` (feature `mock`).
//!
//! # Example
//!
//! ```rust,ignore
//! use medingen_data::{FetchClient, ReqwestTransport};
//! use std::{sync::Arc, time::Duration};
//!
//! let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(10))?);
//! let client = FetchClient::new(transport)
//!     .with_base_url("http://localhost:5000/api")
//!     .with_default_header("Content-Type", "application/json");
//!
//! let page: serde_json::Value = client
//!     .get("/products/")
//!     .query_param("per_page", 50)
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod request;
mod response;
mod transport;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Client bound to one backend: base URL, default headers and a transport.
///
/// Cloning is cheap; clones share the same transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Relative paths are joined onto `base_url`; absolute URLs pass through.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Header sent with every request built by this client.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let builder = RequestBuilder::new(method, full_url).headers(
            self.default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// Request under construction, sent through the client's transport.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append one query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query_param(key, value);
        self
    }

    /// Append a batch of query parameters.
    pub fn query<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        self.builder = self.builder.query(params);
        self
    }

    /// Serialize `value` as the body.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Inspect the request that would be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::trace!(method = %self.builder.method, url = %self.builder.url, "sending request");
        self.transport.send(self.builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    fn client(mock: MockTransport) -> (FetchClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let client = FetchClient::new(mock.clone())
            .with_base_url("http://localhost:5000/api/")
            .with_default_header("Content-Type", "application/json");
        (client, mock)
    }

    #[test]
    fn test_base_url_joined_without_double_slash() {
        let (client, _) = client(MockTransport::new());
        let req = client.get("/products/12");
        assert_eq!(req.as_request().url(), "http://localhost:5000/api/products/12");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let (client, _) = client(MockTransport::new());
        let req = client.get("https://cdn.example.com/x.json");
        assert_eq!(req.as_request().url(), "https://cdn.example.com/x.json");
    }

    #[test]
    fn test_default_headers_applied() {
        let (client, _) = client(MockTransport::new());
        let req = client.post("/login");
        assert_eq!(
            req.as_request().header_value("content-type"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_send_goes_through_transport() {
        let (client, mock) = client(MockTransport::new().respond(
            Method::Get,
            "/products/",
            200,
            json!({"products": []}),
        ));

        let resp = client
            .get("/products/")
            .query_param("page", 1)
            .bearer_auth("abc")
            .send()
            .await
            .unwrap();
        assert!(resp.is_success());

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].query_pairs(), &[("page".to_string(), "1".to_string())]);
        assert_eq!(seen[0].header_value("Authorization"), Some("Bearer abc"));
    }
}
