//! HTTP transport for script runs.
//!
//! Features:
//! - One JSON POST per run, no retries
//! - HTTP/2 when the server negotiates it, HTTP/1.1 otherwise
//! - TLS 1.3 via rustls
//! - Configurable connect and request timeouts

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::error::TransportError;
use crate::protocol::{HttpReply, ScriptRequest};

/// Sends a script to a server and returns the raw reply.
///
/// An `Err` means no HTTP response was received at all. Any HTTP status,
/// including 4xx and 5xx, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_script(
        &self,
        url: &str,
        request: &ScriptRequest,
    ) -> Result<HttpReply, TransportError>;
}

/// reqwest-backed [`Transport`].
pub struct ScriptClient {
    client: Client,
}

impl ScriptClient {
    /// Create a client with default timeouts.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeouts(Duration::from_secs(10), None)
    }

    /// Create a client from user settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::with_timeouts(settings.connect_timeout(), settings.timeout())
    }

    pub fn with_timeouts(connect: Duration, total: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            // HTTP/2 flow control sized from measured bandwidth
            .http2_adaptive_window(true)
            .tcp_nodelay(true)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("luapad/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(total) = total {
            builder = builder.timeout(total);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ScriptClient {
    #[instrument(skip(self, request), fields(url = %url, namespace = %request.namespace))]
    async fn post_script(
        &self,
        url: &str,
        request: &ScriptRequest,
    ) -> Result<HttpReply, TransportError> {
        let target = url::Url::parse(url)
            .map_err(|e| TransportError::new(format!("invalid URL '{url}': {e}")))?;

        debug!(bytes = request.script.len(), "Posting script");
        let response = self
            .client
            .post(target)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(request).map_err(|e| TransportError::from_chain(&e))?)
            .send()
            .await
            .map_err(|e| TransportError::from_chain(&e))?;

        let status = response.status();
        info!(status = %status, version = ?response.version(), "Response received");

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_chain(&e))?;

        Ok(HttpReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ScriptRequest {
        ScriptRequest {
            script: "--!\n".to_string(),
            namespace: "global".to_string(),
        }
    }

    #[tokio::test]
    async fn invalid_url_is_a_transport_error() {
        let client = ScriptClient::new().unwrap();
        let err = client.post_script("not a url", &request()).await.unwrap_err();
        assert!(err.message.starts_with("invalid URL 'not a url'"));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ScriptClient::new().unwrap();
        let result = client
            .post_script(&format!("http://{addr}/"), &request())
            .await;
        assert!(result.is_err());
    }
}
