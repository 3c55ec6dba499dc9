//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response, Transport};

/// What a scripted route answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(Response),
    Fail(FetchError),
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
}

/// A `Transport` that replays canned replies and records every request.
///
/// Routes match on method and on the request path ending with the route
/// path, so `/products/` matches `http://host/api/products/?page=2`.
/// A route with several replies hands them out in order and keeps
/// repeating the last one. Unmatched requests get a 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.reply(method, path, MockReply::Respond(Response::json_body(status, &body)))
    }

    /// Answer `method path` with a raw, possibly non-JSON body.
    pub fn respond_raw(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        let response = Response::new(status, Default::default(), body.as_bytes().to_vec());
        self.reply(method, path, MockReply::Respond(response))
    }

    /// Fail `method path` at the transport level.
    pub fn fail(self, method: Method, path: &str, error: FetchError) -> Self {
        self.reply(method, path, MockReply::Fail(error))
    }

    fn reply(self, method: Method, path: &str, reply: MockReply) -> Self {
        if let Ok(mut routes) = self.routes.lock() {
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path: path.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Requests whose path ends with `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RequestBuilder> {
        self.requests()
            .into_iter()
            .filter(|r| r.path().ends_with(path))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let path = request.path();
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        let reply = {
            let mut routes = self
                .routes
                .lock()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            // Longest matching route wins so `/reviews/stats/1` beats `/1`.
            let route = routes
                .iter_mut()
                .filter(|r| r.method == request.method && path.ends_with(&r.path))
                .max_by_key(|r| r.path.len());
            match route {
                Some(route) if route.replies.len() > 1 => route.replies.pop_front(),
                Some(route) => route.replies.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(MockReply::Respond(response)) => Ok(response),
            Some(MockReply::Fail(error)) => Err(error),
            None => Ok(Response::json_body(
                404,
                &serde_json::json!({ "error": format!("no mock route for {} {}", request.method, path) }),
            )),
        }
    }
}
