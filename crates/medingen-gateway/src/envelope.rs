//! Success envelope.

use serde::{Deserialize, Serialize};

/// A successful gateway result: the parsed payload under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse { data: f(self.data) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"data":[1,2]}"#);
        assert_eq!(response.map(|v| v.len()).into_inner(), 2);
    }
}
