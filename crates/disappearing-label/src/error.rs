//! Error types for the widget crate.

use std::path::PathBuf;

use disappearing_label_core::{CoreError, ObjectId};
use thiserror::Error;

/// The main error type for widget and host operations.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The widget host rejected an operation.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    /// The core runtime rejected an operation.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Errors raised while loading or validating a [`LabelConfig`](crate::LabelConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or has unknown keys.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The timeout must be a positive number of milliseconds.
    #[error("Timeout must be greater than zero")]
    InvalidTimeout,
    /// The message has no visible text.
    #[error("Message must not be empty")]
    EmptyMessage,
}

/// Errors raised by the [`WidgetHost`](crate::WidgetHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HostError {
    /// No widget with this id is inserted in the host.
    #[error("No widget with id {0:?} is inserted")]
    UnknownWidget(ObjectId),
}

/// A specialized Result type for widget and host operations.
pub type Result<T> = std::result::Result<T, LabelError>;
