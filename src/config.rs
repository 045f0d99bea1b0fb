use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Run Chrome in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Navigation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Disable image loading for faster page loads
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Custom user agent; None keeps Chrome's default
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_user_agent() -> Option<String> {
    Some(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
            .to_string(),
    )
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            disable_images: true,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }
}

impl BrowserSettings {
    /// Build the browser layer's configuration from these settings
    pub fn to_browser_config(&self) -> crate::browser::BrowserConfig {
        crate::browser::BrowserConfig {
            headless: self.headless,
            timeout: Duration::from_secs(self.timeout_secs),
            disable_images: self.disable_images,
            user_agent: self.user_agent.clone(),
            ..crate::browser::BrowserConfig::default()
        }
    }
}
