//! Thin wrapper around headless Chrome.
//!
//! Exposes the four capabilities the scrape loop needs: launch a session,
//! open a page, navigate + wait for a selector, and read the rendered
//! HTML. Session teardown rides on `Drop`.

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for the headless browser
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Navigation timeout
    pub timeout: Duration,
    pub disable_images: bool,
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            timeout: Duration::from_secs(30),
            disable_images: true,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

/// Errors from browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),
}

impl BrowserError {
    /// True for the bounded-wait deadline, which the scrape loop treats
    /// as end-of-list rather than a failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::Timeout(_))
    }
}

/// One headless Chrome process
pub struct BrowserClient {
    browser: Browser,
}

impl BrowserClient {
    pub fn new() -> Result<Self, BrowserError> {
        Self::with_config(BrowserConfig::default())
    }

    pub fn with_config(config: BrowserConfig) -> Result<Self, BrowserError> {
        use std::ffi::OsStr;

        // Owned strings first so the OsStr args borrow from them
        let images_arg = if config.disable_images {
            Some("--blink-settings=imagesEnabled=false".to_string())
        } else {
            None
        };
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-setuid-sandbox"),
        ];
        if let Some(ref img) = images_arg {
            args.push(OsStr::new(img));
        }
        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Open a new page (tab). The caller reuses it across navigations.
    pub fn new_page(&self) -> Result<Page, BrowserError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        Ok(Page { tab })
    }
}

impl Drop for BrowserClient {
    fn drop(&mut self) {
        log::debug!("Browser client dropped");
    }
}

/// A single tab, reused across navigations within one scrape session
pub struct Page {
    tab: Arc<Tab>,
}

impl Page {
    /// Navigate to a URL and wait for the navigation to settle
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        log::debug!("Browser navigating to: {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for an element matching the CSS selector, bounded by `timeout`.
    ///
    /// Polls `document.querySelector` in the page; evaluation hiccups
    /// count as "not there yet". Only the deadline produces
    /// `BrowserError::Timeout`.
    pub fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        let start = Instant::now();
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            selector.replace('\'', "\\'")
        );

        loop {
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for selector: {}",
                    selector
                )));
            }

            if let Ok(result) = self.tab.evaluate(&script, false) {
                if let Some(value) = result.value {
                    if value.as_bool() == Some(true) {
                        return Ok(());
                    }
                }
            }

            std::thread::sleep(Duration::from_millis(100));
        }
    }

    /// Rendered HTML of the current page
    pub fn content(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }
}
