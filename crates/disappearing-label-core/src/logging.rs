//! Logging facilities.
//!
//! Everything is instrumented with the `tracing` crate. The library never
//! installs a subscriber; applications (and tests that want output) do:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("disappearing_label_core::timer=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "disappearing_label_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "disappearing_label_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "disappearing_label_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "disappearing_label_core::signal";
    /// Object registry target.
    pub const OBJECT: &str = "disappearing_label_core::object";
    /// Widget state transitions.
    pub const WIDGET: &str = "disappearing_label::widget";
    /// Widget host dispatch.
    pub const HOST: &str = "disappearing_label::host";
    /// Configuration loading.
    pub const CONFIG: &str = "disappearing_label::config";
}

/// A guard that records the duration of an operation as a tracing span.
///
/// ```ignore
/// let _span = PerfSpan::new("advance");
/// // ... timed work ...
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span; it closes when the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "disappearing_label::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
