// Retrieval layer: a resilient client over pluggable one-shot transports.
mod blocking;
mod browser;

pub use blocking::ReqwestTransport;
pub use browser::{BrowserSession, BrowserTransport};

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::utils::error::{Result, ScraperError};

/// One fetch attempt. Implementations do not retry; the client owns that.
pub trait Transport: Send {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Resilient retrieval over a transport: a rate-limit floor between
/// requests, a fixed number of attempts with a fixed delay in between, and
/// the last failure surfaced after exhaustion.
///
/// One instance serializes its own outbound requests; sharing it across
/// threads needs external synchronization.
pub struct HttpClient {
    transport: Box<dyn Transport>,
    max_retries: u32,
    retry_delay: Duration,
    min_request_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    pub fn new(transport: Box<dyn Transport>, config: &HttpConfig) -> Self {
        Self {
            transport,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            min_request_interval: Duration::from_millis(config.min_request_interval_ms),
            last_request: Mutex::new(None),
        }
    }

    pub fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        self.rate_limit();

        let mut last_error = ScraperError::Retrieval(format!("No attempts made for {url}"));
        for attempt in 1..=self.max_retries {
            match self.attempt(url, timeout) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    if attempt < self.max_retries {
                        warn!(
                            attempt,
                            max_retries = self.max_retries,
                            "request failed, retrying in {:?}: {e}",
                            self.retry_delay
                        );
                        std::thread::sleep(self.retry_delay);
                    }
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    fn attempt(&self, url: &str, timeout: Duration) -> Result<String> {
        let body = self.transport.fetch(url, timeout)?;
        if body.is_empty() {
            return Err(ScraperError::Retrieval(format!("Empty response from {url}")));
        }
        debug!(len = body.len(), %url, "fetched");
        Ok(body)
    }

    fn rate_limit(&self) {
        let mut last = self.lock_last_request();
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_request_interval {
                let wait = self.min_request_interval - elapsed;
                debug!(?wait, "rate limiting before next request");
                std::thread::sleep(wait);
            }
        }
        *last = Some(Instant::now());
    }

    fn lock_last_request(&self) -> MutexGuard<'_, Option<Instant>> {
        match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
