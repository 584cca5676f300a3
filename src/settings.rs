use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::form::classifier::Category;

/// How fields are chosen during a fill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Classifier-driven.
    #[default]
    Auto,
    /// Driven by user-declared substring rules.
    Manual,
}

/// A user-declared search substring for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManualRule {
    pub enabled: bool,
    /// Matched as a literal, case-insensitive substring of the field signature.
    pub text: String,
}

impl ManualRule {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            text: text.into(),
        }
    }

    /// Disabled rules and rules with no search text never match.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.text.is_empty()
    }
}

/// One rule per category, iterated in category order.
pub type ManualConfig = BTreeMap<Category, ManualRule>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillSettings {
    pub mode: FillMode,
    #[serde(deserialize_with = "deserialize_manual_config")]
    pub manual_config: ManualConfig,
}

/// Entries whose key is not a known category, or whose rule does not parse,
/// are dropped instead of failing the whole record.
fn deserialize_manual_config<'de, D>(
    deserializer: D,
) -> std::result::Result<ManualConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let mut config = ManualConfig::new();
    for (key, value) in raw {
        let parsed = serde_json::from_value::<Category>(serde_json::Value::String(key.clone()));
        let category = match parsed {
            Ok(category) => category,
            Err(_) => {
                tracing::debug!(key = %key, "skipping manual rule for unknown category");
                continue;
            }
        };
        match serde_json::from_value::<ManualRule>(value) {
            Ok(rule) => {
                config.insert(category, rule);
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "skipping malformed manual rule");
            }
        }
    }
    Ok(config)
}

impl FillSettings {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn manual() -> Self {
        Self {
            mode: FillMode::Manual,
            manual_config: ManualConfig::new(),
        }
    }

    /// Add (or replace) the rule for `category`.
    pub fn with_rule(mut self, category: Category, rule: ManualRule) -> Self {
        self.manual_config.insert(category, rule);
        self
    }

    /// Enabled rules with non-empty search text, in category order.
    pub fn active_rules(&self) -> impl Iterator<Item = (Category, &ManualRule)> {
        self.manual_config
            .iter()
            .filter(|(_, rule)| rule.is_active())
            .map(|(category, rule)| (*category, rule))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// On-disk layout: a key-value record holding the `settings` entry.
#[derive(Debug, Default, Deserialize, Serialize)]
struct StoredRecord {
    #[serde(default)]
    settings: Option<FillSettings>,
}

/// JSON file holding the persisted fill settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored settings, `None` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<FillSettings>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: StoredRecord = serde_json::from_str(&raw)?;
        Ok(record.settings)
    }

    /// Read the stored settings, falling back to the defaults when the file is
    /// missing or malformed.
    pub fn load(&self) -> FillSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no stored settings, using defaults");
                FillSettings::default()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable settings, using defaults");
                FillSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &FillSettings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let record = StoredRecord {
            settings: Some(settings.clone()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        tracing::debug!(path = %self.path.display(), mode = ?settings.mode, "settings saved");
        Ok(())
    }
}
