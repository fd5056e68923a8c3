//! Session configuration.
//!
//! Every field has a default, so a JSON document only needs the keys it
//! overrides:
//!
//! ```json
//! { "settle_delay_ms": 150, "modal_return": "derived" }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{NavError, Result};
use crate::logging::LogLevel;

/// Layer that `close_modal` lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalReturn {
    /// Always `Room`, even when the modal was opened straight from `Base`.
    #[default]
    Room,
    /// `Room` when a room is active underneath, `Base` otherwise.
    Derived,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Delay before deferred scroll/focus work runs after an overlay opens.
    pub settle_delay_ms: u64,
    pub focus_trap_enabled: bool,
    pub audio_enabled: bool,
    pub modal_return: ModalReturn,
    /// Width limit applied to the breadcrumb shown by the view.
    pub breadcrumb_max_width: Option<usize>,
    /// Section keys known to the page, in document order. Opening a room
    /// whose section key is not listed logs `section_unknown`; an empty list
    /// disables the check.
    pub sections: Vec<String>,
    /// Interval between metrics snapshots. Zero disables snapshots.
    pub metrics_interval_ms: u64,
    pub log_level: LogLevel,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
            focus_trap_enabled: true,
            audio_enabled: true,
            modal_return: ModalReturn::Room,
            breadcrumb_max_width: None,
            sections: ["system", "ai-core", "hardware", "lab"]
                .into_iter()
                .map(String::from)
                .collect(),
            metrics_interval_ms: 5_000,
            log_level: LogLevel::Info,
        }
    }
}

impl NavigationConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.breadcrumb_max_width == Some(0) {
            return Err(NavError::InvalidConfig(
                "breadcrumb_max_width must be greater than zero".to_string(),
            ));
        }
        if self.sections.iter().any(|s| s.trim().is_empty()) {
            return Err(NavError::InvalidConfig(
                "section keys must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_interval_ms)
    }
}
