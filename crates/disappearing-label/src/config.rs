//! Label configuration.
//!
//! A [`LabelConfig`] can be built in code, or loaded from TOML:
//!
//! ```toml
//! timeout_ms = 3500
//! is_visible = false
//! message = "Saved"
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::path::Path;
use std::time::Duration;

use disappearing_label_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`DisappearingLabel`](crate::DisappearingLabel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// How long the message stays up after insertion or pointer-leave, in
    /// milliseconds.
    pub timeout_ms: u64,
    /// Whether the label starts visible.
    ///
    /// A label that starts visible ignores insertion and only begins
    /// counting down after the pointer leaves it.
    pub is_visible: bool,
    /// The text to display.
    pub message: String,
}

impl LabelConfig {
    /// Default hide timeout in milliseconds.
    pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

    /// Default message text.
    pub const DEFAULT_MESSAGE: &'static str = "Hi ho, Kermit the Frog here!";

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded label config");
        Ok(config)
    }

    /// Serialize to a pretty-printed TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the invariants the widget relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.message.trim().is_empty() {
            return Err(ConfigError::EmptyMessage);
        }
        Ok(())
    }

    /// The timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the timeout using builder pattern.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the initial visibility using builder pattern.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Set the message using builder pattern.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
            is_visible: false,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}
