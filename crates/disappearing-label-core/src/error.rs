//! Error types for the core runtime.

use thiserror::Error;

/// The main error type for core runtime operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
    /// Time can only be stepped on an event loop driven by a manual clock.
    #[error("The event loop is not driven by a manual clock")]
    ClockNotManual,
}

/// Timer-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The timer ID is invalid, has already fired, or was stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Object registry errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// The object ID is not (or no longer) registered.
    #[error("Invalid or destroyed object ID")]
    InvalidObjectId,
}

/// A specialized Result type for core runtime operations.
pub type Result<T> = std::result::Result<T, CoreError>;
