//! Application configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use storage::KvConfig;

use crate::Result;

/// Top-level configuration for [`crate::App`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Fallback language, as a language name (`"French"`) or a locale (`"fr-CA"`)
    pub default_language: String,
    /// Default region for phone number validation
    pub region_code: String,
    /// How long the report undo affordance stays up, in milliseconds
    pub undo_window_ms: u64,
    /// Settings store
    pub kv: KvConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: i18n::DEFAULT_LANGUAGE.to_string(),
            region_code: "US".to_string(),
            undo_window_ms: duration_ms(app_state::DEFAULT_UNDO_WINDOW),
            kv: KvConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a configuration storing settings at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { kv: KvConfig::new(path), ..Default::default() }
    }

    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the fallback language
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Set the phone validation region
    pub fn region_code(mut self, region: impl Into<String>) -> Self {
        self.region_code = region.into();
        self
    }

    /// Set the undo window
    pub fn undo_window(mut self, window: Duration) -> Self {
        self.undo_window_ms = duration_ms(window);
        self
    }

    /// Set the settings store configuration
    pub fn kv(mut self, kv: KvConfig) -> Self {
        self.kv = kv;
        self
    }

    /// The undo window as a duration
    pub fn undo_window_duration(&self) -> Duration {
        Duration::from_millis(self.undo_window_ms)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
