//! Time sources for the event loop.
//!
//! Timers never call `Instant::now()` directly; they read the current time
//! from a [`Clock`]. Production code uses [`SystemClock`]. Tests use
//! [`ManualClock`], which only moves when told to, so timer expiry can be
//! stepped through deterministically.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use disappearing_label_core::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_millis(1500));
//! assert_eq!(clock.now() - start, Duration::from_millis(1500));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Where a deadline lands when `now + duration` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// `now + duration`, saturating to a far-future instant on overflow.
pub fn instant_after(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only advances when explicitly moved forward.
///
/// Clones share the same underlying time, so a test can keep one handle while
/// the event loop holds another.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    current: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a manual clock frozen at the present instant.
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            current: Arc::new(Mutex::new(origin)),
        }
    }

    /// Move the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current = instant_after(*current, duration);
    }

    /// Move the clock forward to `instant`.
    ///
    /// Instants earlier than the current time are ignored; the clock never
    /// runs backwards.
    pub fn advance_to(&self, instant: Instant) {
        let mut current = self.current.lock();
        if instant > *current {
            *current = instant;
        }
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.current.lock() - self.origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

static_assertions::assert_impl_all!(ManualClock: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(a, b);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(750));
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_manual_clock_never_runs_backwards() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_secs(5));
        clock.advance_to(start + Duration::from_secs(2));
        assert_eq!(clock.elapsed(), Duration::from_secs(5));

        clock.advance_to(start + Duration::from_secs(7));
        assert_eq!(clock.elapsed(), Duration::from_secs(7));
    }

    #[test]
    fn test_instant_after_saturates() {
        let now = Instant::now();
        assert_eq!(instant_after(now, Duration::from_millis(5)), now + Duration::from_millis(5));
        assert_eq!(instant_after(now, Duration::MAX), now + FAR_FUTURE);

        let clock = ManualClock::new();
        clock.advance(Duration::MAX);
        assert_eq!(clock.elapsed(), FAR_FUTURE);
    }

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(10));
        assert_eq!(clock.elapsed(), Duration::from_millis(10));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
