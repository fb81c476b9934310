use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::Transport;
use crate::utils::error::{Result, ScraperError};

struct BrowserState {
    // Kept alive for the tab; dropping it ends the Chrome process.
    _browser: Browser,
    tab: Arc<Tab>,
}

/// Browser-automation transport for JavaScript-heavy pages.
///
/// The browser process and its single tab are launched on first use and
/// reused across requests. `close` disposes them explicitly; the next fetch
/// relaunches. Navigation and timeout failures surface as the same
/// retrieval errors the plain transport produces, so callers stay
/// transport-agnostic. Not safe for concurrent use.
pub struct BrowserTransport {
    state: Mutex<Option<BrowserState>>,
    user_agent: String,
    chrome_path: Option<String>,
}

impl BrowserTransport {
    pub fn new(user_agent: impl Into<String>, chrome_path: Option<String>) -> Self {
        Self {
            state: Mutex::new(None),
            user_agent: user_agent.into(),
            chrome_path,
        }
    }

    fn launch(&self) -> Result<BrowserState> {
        let mut launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-extensions"),
            ])
            .build()
            .map_err(|e| ScraperError::Retrieval(format!("Failed to create launch options: {e}")))?;

        if let Some(chrome_path) = &self.chrome_path {
            launch_options.path = Some(std::path::PathBuf::from(chrome_path));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| ScraperError::Retrieval(format!("Failed to launch browser: {e}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScraperError::Retrieval(format!("Failed to open tab: {e}")))?;
        tab.set_user_agent(&self.user_agent, None, None)
            .map_err(|e| ScraperError::Retrieval(format!("Failed to set user agent: {e}")))?;

        info!("launched browser for JavaScript-backed retrieval");
        Ok(BrowserState {
            _browser: browser,
            tab,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, Option<BrowserState>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Shuts the browser down. Safe to call more than once; the next fetch
    /// starts a fresh browser.
    pub fn close(&self) {
        let mut state = self.lock_state();
        if state.take().is_some() {
            debug!("closed browser transport");
        }
    }

    fn ensure_launched(&self, guard: &mut Option<BrowserState>) -> Result<()> {
        if guard.is_none() {
            *guard = Some(self.launch()?);
        }
        Ok(())
    }
}

impl Transport for BrowserTransport {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        let mut guard = self.lock_state();
        self.ensure_launched(&mut guard)?;

        let outcome = match guard.as_ref() {
            Some(state) => navigate_and_read(&state.tab, url, timeout),
            None => Err(ScraperError::Unexpected(format!(
                "Browser unavailable for {url}"
            ))),
        };

        match outcome {
            Ok(content) => Ok(content),
            Err(e) => {
                // A wedged tab poisons every later request; relaunch next time.
                warn!(%url, "browser fetch failed, discarding session: {e}");
                *guard = None;
                Err(e)
            }
        }
    }
}

fn navigate_and_read(tab: &Tab, url: &str, timeout: Duration) -> Result<String> {
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .map_err(|e| ScraperError::Retrieval(format!("Navigation failed for {url}: {e}")))?;
    tab.wait_until_navigated()
        .map_err(|e| ScraperError::Retrieval(format!("Page load failed for {url}: {e}")))?;

    let content = tab
        .get_content()
        .map_err(|e| ScraperError::Retrieval(format!("Failed to read page content for {url}: {e}")))?;

    Ok(content)
}

/// Scoped browser session for batch scraping: the browser is launched once
/// on open, reused for every fetch, and torn down when the session is
/// dropped, including during unwinding.
pub struct BrowserSession {
    transport: BrowserTransport,
}

impl BrowserSession {
    pub fn open(user_agent: impl Into<String>, chrome_path: Option<String>) -> Result<Self> {
        let transport = BrowserTransport::new(user_agent, chrome_path);
        {
            let mut guard = transport.lock_state();
            let state = transport.launch()?;
            *guard = Some(state);
        }
        Ok(Self { transport })
    }

    pub fn transport(&self) -> &BrowserTransport {
        &self.transport
    }
}

impl Transport for BrowserSession {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        self.transport.fetch(url, timeout)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.transport.close();
    }
}
