//! HTTP request builder.

use crate::FetchError;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_http(self) -> http::Method {
        match self {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outbound request.
///
/// Headers are kept in a sorted map so that requests compare and log
/// deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header to the request, replacing any previous value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Append one query parameter. Order of insertion is preserved.
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a batch of query parameters.
    pub fn query<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert(CONTENT_TYPE.as_str().to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header(AUTHORIZATION.as_str(), format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header(ACCEPT.as_str(), content_type)
    }

    /// Set the Content-Type header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.header(CONTENT_TYPE.as_str(), content_type)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Base URL without the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Look up a header, ignoring ASCII case.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The URL with its form-encoded query string appended.
    pub fn full_url(&self) -> Result<String, FetchError> {
        let mut parsed =
            url::Url::parse(&self.url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !self.query.is_empty() {
            parsed
                .query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(parsed.into())
    }

    /// Path component of the target URL, used for logging and routing in tests.
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_encodes_query_in_insertion_order() {
        let req = RequestBuilder::new(Method::Get, "http://localhost:5000/api/products/")
            .query_param("search", "para cetamol")
            .query_param("per_page", 50);
        assert_eq!(
            req.full_url().unwrap(),
            "http://localhost:5000/api/products/?search=para+cetamol&per_page=50"
        );
    }

    #[test]
    fn test_full_url_without_query_is_unchanged() {
        let req = RequestBuilder::new(Method::Get, "http://localhost:5000/api/products/7");
        assert_eq!(req.full_url().unwrap(), "http://localhost:5000/api/products/7");
    }

    #[test]
    fn test_full_url_rejects_relative_url() {
        let req = RequestBuilder::new(Method::Get, "/products/");
        assert!(matches!(req.full_url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_bearer_auth_header() {
        let req = RequestBuilder::new(Method::Get, "http://x/").bearer_auth("tok-1");
        assert_eq!(req.header_value("authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "http://x/login")
            .json(&serde_json::json!({"username": "asha"}))
            .unwrap();
        assert_eq!(req.header_value("Content-Type"), Some("application/json"));
        assert_eq!(req.body_bytes().unwrap(), br#"{"username":"asha"}"#);
    }

    #[test]
    fn test_path_strips_host_and_query() {
        let req = RequestBuilder::new(Method::Get, "http://localhost:5000/api/reviews/stats/3");
        assert_eq!(req.path(), "/api/reviews/stats/3");
    }
}
