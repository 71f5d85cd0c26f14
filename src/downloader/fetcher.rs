use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

/// Status and body of a completed GET request.
///
/// Non-2xx responses are still returned as a `FetchedResponse`; deciding what a
/// failed status means is up to the caller.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub body: Bytes,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP seam used by the resolver and the download proxy.
///
/// Implementations issue exactly one request per call and never retry.
/// Transport failures (connect, TLS, timeout) are reported as
/// [`AppError::NetworkError`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> AppResult<FetchedResponse>;
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a client honouring the configured timeout and user agent.
    ///
    /// Redirects are not followed: a 3xx comes back as a non-2xx response, so one
    /// call is one request and a download cannot be steered off the allowed prefix.
    pub fn from_config(config: &ResolvedConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> AppResult<FetchedResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(url = url, "Request timed out");
            }
            AppError::NetworkError(format!("GET {url} failed: {e}"))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(url = url, status = status, bytes = body.len(), "Fetched");

        Ok(FetchedResponse { status, body })
    }
}
