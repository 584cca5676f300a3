use std::time::Duration;

use crate::browser::AutofillBrowser;
use crate::error::Result;

pub struct BrowserConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// Default timeout for operations like `wait_for_selector` (default: 30s).
    pub default_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chrome_path: None,
            default_timeout: Duration::from_secs(30),
        }
    }
}

impl BrowserConfig {
    /// Defaults overridden by `AUTOFILL_HEADLESS`, `AUTOFILL_CHROME_PATH` and
    /// `AUTOFILL_TIMEOUT_SECS` when they are set and parse.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            headless: std::env::var("AUTOFILL_HEADLESS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.headless),
            chrome_path: std::env::var("AUTOFILL_CHROME_PATH").ok().or(default.chrome_path),
            default_timeout: std::env::var("AUTOFILL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.default_timeout),
            ..default
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    /// Start from [`BrowserConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            config: BrowserConfig::from_env(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set the default timeout for operations like `wait_for_selector`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.default_timeout = timeout;
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }

    pub async fn build(self) -> Result<AutofillBrowser> {
        AutofillBrowser::launch(self.build_config()).await
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
