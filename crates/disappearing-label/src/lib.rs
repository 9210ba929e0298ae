//! A label that shows a message when inserted and hides it after a timeout.
//!
//! [`DisappearingLabel`] is a small widget built on the
//! [`disappearing_label_core`] runtime. When the label is inserted into a
//! [`WidgetHost`] it shows its message and starts a countdown. Hovering the
//! label cancels the countdown; leaving it restarts the full timeout. Removing
//! the label cancels any pending hide.
//!
//! # Getting Started
//!
//! ```
//! use std::time::Duration;
//! use disappearing_label::{DisappearingLabel, LabelConfig, WidgetHost};
//! use disappearing_label_core::ManualClock;
//!
//! let config = LabelConfig::from_toml_str(r#"
//!     timeout_ms = 1500
//!     message = "Copied to clipboard"
//! "#).unwrap();
//! config.validate().unwrap();
//!
//! let mut host = WidgetHost::with_manual_clock(ManualClock::new());
//! let id = host.insert(DisappearingLabel::from_config(host.timer_host(), &config));
//!
//! host.advance(Duration::from_millis(1500)).unwrap();
//! assert!(!host.widget::<DisappearingLabel>(id).unwrap().is_visible());
//! ```
//!
//! # Features
//!
//! - `tokio`: drive a [`WidgetHost`] from a tokio runtime with
//!   `WidgetHost::run_for`.

pub mod config;
mod error;
pub mod host;
pub mod widget;

pub use config::LabelConfig;
pub use error::{ConfigError, HostError, LabelError, Result};
#[cfg(feature = "tokio")]
pub use host::TokioClock;
pub use host::WidgetHost;
pub use widget::widgets::{DisappearingLabel, LabelState};
pub use widget::{
    DestroyEvent, EnterEvent, EventBase, InsertEvent, LeaveEvent, Point, Rect, Size, TimerEvent,
    Widget, WidgetBase, WidgetEvent,
};
