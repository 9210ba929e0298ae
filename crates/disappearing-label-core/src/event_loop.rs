//! The single-threaded event loop that owns all timers.
//!
//! Widgets never hold timers directly. They ask a [`TimerHost`] to start a
//! one-shot timer on their behalf and keep only the returned [`TimerId`].
//! When the timer expires, the loop reports a [`FiredTimer`] naming the
//! owning object, and the host delivers it to that widget as an event on
//! the same queue as pointer input. A handler therefore never runs
//! concurrently with a timer expiry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::{instant_after, Clock, ManualClock, SystemClock};
use crate::error::{CoreError, Result, TimerError};
use crate::logging::{targets, PerfSpan};
use crate::object::ObjectId;
use crate::timer::{TimerId, TimerManager};

/// The shortest timer an [`EventLoop`] will start; shorter requests are
/// raised to it.
pub const MIN_TIMER_DURATION: Duration = Duration::from_millis(1);

/// Starts and stops timers on behalf of objects.
///
/// This is the seam between widgets and whatever drives time: the
/// [`EventLoop`] in production and tests, or any other scheduler a host
/// framework provides.
pub trait TimerHost: Send + Sync {
    /// Start a one-shot timer owned by `owner`.
    ///
    /// The [`EventLoop`] raises durations below [`MIN_TIMER_DURATION`] to it.
    fn start_timer(&self, owner: ObjectId, duration: Duration) -> TimerId;

    /// Stop a pending timer.
    fn stop_timer(&self, id: TimerId) -> std::result::Result<(), TimerError>;

    /// Whether a timer is still pending.
    fn is_timer_active(&self, id: TimerId) -> bool;
}

/// A timer that expired, with the object it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    /// The timer that fired.
    pub id: TimerId,
    /// The object that started it.
    pub owner: ObjectId,
}

enum LoopClock {
    System(SystemClock),
    Manual(ManualClock),
    Custom(Arc<dyn Clock>),
}

impl LoopClock {
    fn now(&self) -> Instant {
        match self {
            Self::System(clock) => clock.now(),
            Self::Manual(clock) => clock.now(),
            Self::Custom(clock) => clock.now(),
        }
    }
}

#[derive(Default)]
struct LoopState {
    timers: TimerManager,
    owners: HashMap<TimerId, ObjectId>,
}

/// Owns the timer queue and the clock it is measured against.
pub struct EventLoop {
    clock: LoopClock,
    state: Mutex<LoopState>,
}

impl EventLoop {
    /// An event loop on the wall clock.
    pub fn new() -> Self {
        Self::from_clock(LoopClock::System(SystemClock))
    }

    /// An event loop whose time only moves through [`advance`](Self::advance).
    pub fn with_manual_clock(clock: ManualClock) -> Self {
        Self::from_clock(LoopClock::Manual(clock))
    }

    /// An event loop on an arbitrary clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::from_clock(LoopClock::Custom(Arc::new(clock)))
    }

    fn from_clock(clock: LoopClock) -> Self {
        Self {
            clock,
            state: Mutex::new(LoopState::default()),
        }
    }

    /// The loop's current time.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Stop every pending timer owned by `owner`. Returns how many were stopped.
    pub fn remove_timers_for(&self, owner: ObjectId) -> usize {
        let mut state = self.state.lock();
        let ids: Vec<TimerId> = state
            .owners
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(id, _)| *id)
            .collect();

        for id in &ids {
            state.owners.remove(id);
            let _ = state.timers.stop(*id);
        }

        if !ids.is_empty() {
            tracing::debug!(target: targets::EVENT_LOOP, ?owner, count = ids.len(), "removed timers for owner");
        }
        ids.len()
    }

    /// Number of pending timers.
    pub fn active_timer_count(&self) -> usize {
        self.state.lock().timers.active_count()
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.lock().timers.next_deadline()
    }

    /// Time until the next timer is due, measured on the loop's clock.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.now();
        self.state.lock().timers.time_until_next(now)
    }

    /// Collect every timer that is due at the loop's current time.
    pub fn process_expired(&self) -> Vec<FiredTimer> {
        let now = self.now();
        let mut state = self.state.lock();
        let expired = state.timers.process_expired(now);

        expired
            .into_iter()
            .filter_map(|id| {
                let owner = state.owners.remove(&id)?;
                Some(FiredTimer { id, owner })
            })
            .collect()
    }

    /// Move a manual clock forward by `duration`, firing timers on the way.
    ///
    /// Each due timer fires with the clock set to its own deadline, and
    /// `dispatch` runs before the next deadline is examined. Timers started
    /// by `dispatch` fire within the same call if they fall inside the window.
    /// The clock finishes exactly `duration` past where it started.
    ///
    /// Fails if the loop does not run on a [`ManualClock`].
    pub fn advance<F>(&self, duration: Duration, mut dispatch: F) -> Result<usize>
    where
        F: FnMut(FiredTimer),
    {
        let LoopClock::Manual(clock) = &self.clock else {
            return Err(CoreError::ClockNotManual);
        };
        let _span = PerfSpan::new("advance");

        let target = instant_after(clock.now(), duration);
        let mut fired_count = 0;

        while let Some(deadline) = self.next_deadline() {
            if deadline > target {
                break;
            }
            clock.advance_to(deadline);
            for fired in self.process_expired() {
                fired_count += 1;
                dispatch(fired);
            }
        }

        clock.advance_to(target);
        tracing::trace!(target: targets::EVENT_LOOP, ?duration, fired_count, "advanced manual clock");
        Ok(fired_count)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHost for EventLoop {
    fn start_timer(&self, owner: ObjectId, duration: Duration) -> TimerId {
        let duration = duration.max(MIN_TIMER_DURATION);
        let now = self.now();
        let mut state = self.state.lock();
        let id = state.timers.start_one_shot(now, duration);
        state.owners.insert(id, owner);
        id
    }

    fn stop_timer(&self, id: TimerId) -> std::result::Result<(), TimerError> {
        let mut state = self.state.lock();
        state.owners.remove(&id);
        state.timers.stop(id)
    }

    fn is_timer_active(&self, id: TimerId) -> bool {
        self.state.lock().timers.is_active(id)
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.clock {
            LoopClock::System(_) => "system",
            LoopClock::Manual(_) => "manual",
            LoopClock::Custom(_) => "custom",
        };
        f.debug_struct("EventLoop")
            .field("clock", &kind)
            .field("active_timers", &self.active_timer_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(EventLoop: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, ObjectBase};

    struct Owner {
        base: ObjectBase,
    }

    impl Owner {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }
    }

    impl Object for Owner {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn manual_loop() -> (EventLoop, ManualClock) {
        let clock = ManualClock::new();
        (EventLoop::with_manual_clock(clock.clone()), clock)
    }

    #[test]
    fn test_timer_reports_owner() {
        let (event_loop, _clock) = manual_loop();
        let owner = Owner::new();
        let id = event_loop.start_timer(owner.object_id(), ms(100));

        assert!(event_loop.is_timer_active(id));

        let mut fired = Vec::new();
        let count = event_loop.advance(ms(100), |t| fired.push(t)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(fired, vec![FiredTimer { id, owner: owner.object_id() }]);
        assert!(!event_loop.is_timer_active(id));
    }

    #[test]
    fn test_advance_fires_at_each_deadline() {
        let (event_loop, clock) = manual_loop();
        let owner = Owner::new();
        event_loop.start_timer(owner.object_id(), ms(300));
        event_loop.start_timer(owner.object_id(), ms(100));

        let mut seen_at = Vec::new();
        event_loop
            .advance(ms(1000), |_| seen_at.push(clock.elapsed()))
            .unwrap();

        assert_eq!(seen_at, vec![ms(100), ms(300)]);
        assert_eq!(clock.elapsed(), ms(1000));
    }

    #[test]
    fn test_timer_started_during_dispatch_fires_in_window() {
        let (event_loop, clock) = manual_loop();
        let owner = Owner::new();
        let owner_id = owner.object_id();
        event_loop.start_timer(owner_id, ms(100));

        let mut seen_at = Vec::new();
        event_loop
            .advance(ms(450), |_| {
                seen_at.push(clock.elapsed());
                event_loop.start_timer(owner_id, ms(100));
            })
            .unwrap();

        assert_eq!(seen_at, vec![ms(100), ms(200), ms(300), ms(400)]);
        assert_eq!(event_loop.active_timer_count(), 1);
    }

    #[test]
    fn test_zero_duration_rearm_terminates() {
        let (event_loop, clock) = manual_loop();
        let owner = Owner::new();
        let owner_id = owner.object_id();
        event_loop.start_timer(owner_id, Duration::ZERO);

        let count = event_loop
            .advance(ms(5), |_| {
                event_loop.start_timer(owner_id, Duration::ZERO);
            })
            .unwrap();

        assert_eq!(count, 5);
        assert_eq!(clock.elapsed(), ms(5));
        assert_eq!(event_loop.active_timer_count(), 1);
    }

    #[test]
    fn test_advance_by_max_duration() {
        let (event_loop, clock) = manual_loop();
        let owner = Owner::new();
        event_loop.start_timer(owner.object_id(), ms(100));

        assert_eq!(event_loop.advance(Duration::MAX, |_| {}).unwrap(), 1);
        assert!(clock.elapsed() > Duration::from_secs(60 * 60 * 24 * 365));

        // Saturated again from the far-future point.
        assert_eq!(event_loop.advance(Duration::MAX, |_| {}).unwrap(), 0);
    }

    #[test]
    fn test_stop_timer() {
        let (event_loop, _clock) = manual_loop();
        let owner = Owner::new();
        let id = event_loop.start_timer(owner.object_id(), ms(50));

        assert!(event_loop.stop_timer(id).is_ok());
        assert_eq!(event_loop.stop_timer(id), Err(TimerError::InvalidTimerId));
        assert_eq!(event_loop.advance(ms(100), |_| {}).unwrap(), 0);
    }

    #[test]
    fn test_remove_timers_for_owner() {
        let (event_loop, _clock) = manual_loop();
        let a = Owner::new();
        let b = Owner::new();
        event_loop.start_timer(a.object_id(), ms(10));
        event_loop.start_timer(a.object_id(), ms(20));
        let kept = event_loop.start_timer(b.object_id(), ms(30));

        assert_eq!(event_loop.remove_timers_for(a.object_id()), 2);
        assert_eq!(event_loop.active_timer_count(), 1);

        let mut fired = Vec::new();
        event_loop.advance(ms(100), |t| fired.push(t.id)).unwrap();
        assert_eq!(fired, vec![kept]);
    }

    #[test]
    fn test_time_until_next() {
        let (event_loop, clock) = manual_loop();
        let owner = Owner::new();
        assert_eq!(event_loop.time_until_next(), None);

        event_loop.start_timer(owner.object_id(), ms(500));
        clock.advance(ms(200));
        assert_eq!(event_loop.time_until_next(), Some(ms(300)));
    }

    #[test]
    fn test_advance_requires_manual_clock() {
        let event_loop = EventLoop::new();
        assert_eq!(
            event_loop.advance(ms(10), |_| {}),
            Err(CoreError::ClockNotManual)
        );
    }

    #[test]
    fn test_process_expired_on_custom_clock() {
        let clock = ManualClock::new();
        let event_loop = EventLoop::with_clock(clock.clone());
        let owner = Owner::new();
        let id = event_loop.start_timer(owner.object_id(), ms(5));

        assert!(event_loop.process_expired().is_empty());
        clock.advance(ms(5));
        assert_eq!(
            event_loop.process_expired(),
            vec![FiredTimer { id, owner: owner.object_id() }]
        );
    }
}
