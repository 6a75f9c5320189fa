//! HTTP transport seam.
//!
//! The client talks to the API only through [`Transport`]. Implement it
//! for your HTTP stack, or enable the `http` feature for a `reqwest`
//! implementation. The crypto core never depends on this module.

use async_trait::async_trait;
use thiserror::Error;

/// Header list, in send order.
pub type Headers = Vec<(String, String)>;

/// Transport-level failure (connection, TLS, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// What the client needs from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `Content-Length` when the server sent one.
    pub content_length: Option<u64>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            status,
            content_length: Some(body.len() as u64),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// No body, either by `Content-Length: 0` or by an empty payload.
    pub fn is_empty(&self) -> bool {
        self.content_length == Some(0) || self.body.is_empty()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError>;

    /// `body` is sent byte-for-byte; request signatures are computed over it.
    async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> Result<HttpResponse, TransportError>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

#[cfg(feature = "http")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "http")]
mod reqwest_transport {
    use super::{HttpResponse, Transport, TransportError};
    use async_trait::async_trait;

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn apply(
        mut req: reqwest::RequestBuilder,
        headers: &[(String, String)],
    ) -> reqwest::RequestBuilder {
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req
    }

    async fn into_response(resp: reqwest::Response) -> Result<HttpResponse, TransportError> {
        let status = resp.status().as_u16();
        let content_length = resp.content_length();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse {
            status,
            content_length,
            body,
        })
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, TransportError> {
            let resp = apply(self.client.get(url), headers)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            into_response(resp).await
        }

        async fn post(
            &self,
            url: &str,
            headers: &[(String, String)],
            body: String,
        ) -> Result<HttpResponse, TransportError> {
            let resp = apply(self.client.post(url), headers)
                .body(body)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            into_response(resp).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_length_or_body() {
        assert!(HttpResponse::new(200, "").is_empty());
        let mut r = HttpResponse::new(200, "[]");
        assert!(!r.is_empty());
        r.content_length = Some(0);
        assert!(r.is_empty());
    }

    #[test]
    fn success_is_2xx() {
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
        assert!(!HttpResponse::new(502, "").is_success());
    }
}
