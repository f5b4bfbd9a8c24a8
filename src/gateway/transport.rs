//! The network seam of the gateway.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Status and decoded body of an HTTP response.
///
/// An empty or non-JSON body is [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Sends one request to the catalog API.
///
/// `path` is relative to the API base and may carry a query string.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if `base_url` does not parse, or
    /// [`TransportError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        url::Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let url = url::Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;
        debug!(method = method.as_str(), %url, "Sending request");

        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify)?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        debug!(status, "Received response");
        Ok(TransportResponse { status, body })
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let transport =
            HttpTransport::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpTransport::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(204, Value::Null).is_success());
        assert!(!TransportResponse::new(404, Value::Null).is_success());
    }
}
