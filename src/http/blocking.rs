use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::Transport;
use crate::utils::error::{Result, ScraperError};

/// Blocking facade over the async `reqwest` client. The transport owns a
/// dedicated current-thread runtime so callers never touch async code; the
/// runtime lives as long as the transport and is disposed with it.
pub struct ReqwestTransport {
    runtime: Runtime,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ScraperError::Unexpected(format!("Failed to start retrieval runtime: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9,id;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ScraperError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { runtime, client })
    }

    async fn fetch_async(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_request_error(url, timeout, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Retrieval(format!("HTTP error {status} for {url}")));
        }

        // Server-declared charset, lossy UTF-8 substitution on bad bytes.
        response
            .text()
            .await
            .map_err(|e| ScraperError::Retrieval(format!("Failed to decode response from {url}: {e}")))
    }
}

impl Transport for ReqwestTransport {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        debug!(%url, "fetching over HTTP");
        self.runtime.block_on(self.fetch_async(url, timeout))
    }
}

fn classify_request_error(url: &str, timeout: Duration, error: &reqwest::Error) -> ScraperError {
    if error.is_timeout() {
        ScraperError::Retrieval(format!(
            "Request timeout after {}s for {url}",
            timeout.as_secs()
        ))
    } else if error.is_connect() {
        ScraperError::Retrieval(format!("Connection error for {url}: {error}"))
    } else {
        ScraperError::Retrieval(format!("Request failed for {url}: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_construction() {
        let transport = ReqwestTransport::new("HargaScraper/1.0");
        assert!(transport.is_ok());
    }

    #[test]
    fn test_unroutable_url_maps_to_retrieval_error() {
        let transport = ReqwestTransport::new("HargaScraper/1.0").unwrap();
        let err = transport
            .fetch("http://127.0.0.1:1", Duration::from_millis(500))
            .unwrap_err();
        assert!(matches!(err, ScraperError::Retrieval(_)));
    }
}
