use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;

use crate::config::{BrowserBuilder, BrowserConfig};
use crate::error::{Error, Result};
use crate::page::Page;

/// Chrome flags that cut startup time without affecting form behaviour.
/// chromiumoxide adds the `--` prefix itself.
const LAUNCH_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "mute-audio",
    "no-first-run",
    "no-default-browser-check",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// A launched Chromium instance whose pages can be auto-filled.
pub struct AutofillBrowser {
    browser: CrBrowser,
    default_timeout: std::time::Duration,
    _handler_task: tokio::task::JoinHandle<()>,
}

impl AutofillBrowser {
    /// Create a new BrowserBuilder for configuring and launching a browser.
    pub fn builder() -> BrowserBuilder {
        BrowserBuilder::new()
    }

    /// Launch a browser instance with the given configuration.
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in LAUNCH_ARGS {
            builder = builder.arg(*arg);
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cr_config = builder
            .build()
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::LaunchError(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler error");
                }
            }
        });

        tracing::info!(headless = config.headless, "browser launched");

        Ok(Self {
            browser,
            default_timeout: config.default_timeout,
            _handler_task: handler_task,
        })
    }

    /// Open a new page (tab) navigated to the given URL.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        let cr_page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?;

        Ok(Page::new(cr_page, self.default_timeout))
    }
}
