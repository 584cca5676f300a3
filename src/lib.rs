pub mod browser;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod page;
pub mod settings;

pub use browser::AutofillBrowser;
pub use config::BrowserConfig;
pub use error::{Error, Result};
pub use form::{classify, Category, Field, FillReport, FormFiller, FormSnapshot};
pub use page::Page;
pub use settings::{FillMode, FillSettings, ManualRule, SettingsStore};
