use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::combo::debounce::{MAX_DELAY, MIN_DELAY};

/// Configuration from stockroom.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Default: http://localhost:8080
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default: 10
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Quiet period before a lookup fires. Clamped to 300..=500.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Rows shown in the dropdown before it scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            debounce_ms: default_debounce_ms(),
            max_visible: default_max_visible(),
            placeholder: default_placeholder(),
        }
    }
}

impl AutocompleteConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms).clamp(MIN_DELAY, MAX_DELAY)
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_visible() -> usize {
    8
}

fn default_placeholder() -> String {
    crate::combo::DEFAULT_PLACEHOLDER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides keyed by theme slot, e.g. `text = "#B0AAFF"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
