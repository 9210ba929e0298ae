//! One-shot timer queue.
//!
//! Timers are stored in a slot map and indexed by a min-heap of deadlines.
//! Stopping a timer removes it from the slot map only; its heap entry is
//! discarded lazily the next time the queue is inspected.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::clock::instant_after;
use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    ///
    /// Ids are never reused while the timer manager is alive, so a stale id
    /// held after its timer fired or was stopped compares unequal to every
    /// newer timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by deadline, then start order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Instant,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages pending one-shot timers.
#[derive(Debug)]
pub struct TimerManager {
    /// Pending timers; a timer is live while its key is present.
    timers: SlotMap<TimerId, ()>,
    queue: BinaryHeap<TimerQueueEntry>,
    next_sequence: u64,
}

impl TimerManager {
    /// Create an empty timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Start a one-shot timer that fires `duration` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, duration: Duration) -> TimerId {
        let deadline = instant_after(now, duration);
        let id = self.timers.insert(());
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            deadline,
            sequence,
        });

        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a pending timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }


    /// The earliest pending deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Time from `now` until the next timer fires.
    ///
    /// Returns `Duration::ZERO` if a timer is already overdue and `None` if
    /// nothing is pending.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// in firing order.
    #[tracing::instrument(skip(self), target = "disappearing_label_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.deadline > now {
                break;
            }
            self.queue.pop();

            if self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(start, ms(100));

        assert!(timers.process_expired(start + ms(99)).is_empty());
        assert_eq!(timers.process_expired(start + ms(100)), vec![id]);
        assert!(timers.process_expired(start + ms(500)).is_empty());
        assert!(!timers.is_active(id));
    }

    #[test]
    fn test_stop_prevents_firing() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(start, ms(100));

        assert!(timers.stop(id).is_ok());
        assert!(timers.process_expired(start + ms(200)).is_empty());
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
    }

    #[test]
    fn test_firing_order() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let late = timers.start_one_shot(start, ms(300));
        let early = timers.start_one_shot(start, ms(100));
        let tie = timers.start_one_shot(start, ms(100));

        assert_eq!(timers.process_expired(start + ms(300)), vec![early, tie, late]);
    }

    #[test]
    fn test_next_deadline_skips_stopped() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let first = timers.start_one_shot(start, ms(50));
        timers.start_one_shot(start, ms(80));

        assert_eq!(timers.next_deadline(), Some(start + ms(50)));
        timers.stop(first).unwrap();
        assert_eq!(timers.next_deadline(), Some(start + ms(80)));
        assert_eq!(timers.time_until_next(start + ms(30)), Some(ms(50)));
        assert_eq!(timers.time_until_next(start + ms(90)), Some(Duration::ZERO));
    }

    #[test]
    fn test_active_count() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        assert_eq!(timers.active_count(), 0);
        assert_eq!(timers.next_deadline(), None);

        let a = timers.start_one_shot(start, ms(10));
        timers.start_one_shot(start, ms(20));
        assert_eq!(timers.active_count(), 2);

        timers.process_expired(start + ms(10));
        assert_eq!(timers.active_count(), 1);
        assert!(!timers.is_active(a));
    }

    #[test]
    fn test_overflowing_duration_saturates() {
        let start = Instant::now();
        let mut timers = TimerManager::new();
        let id = timers.start_one_shot(start, Duration::MAX);

        let deadline = timers.next_deadline().unwrap();
        assert!(deadline > start + Duration::from_secs(60 * 60 * 24 * 365));
        assert!(timers.process_expired(start + Duration::from_secs(60 * 60 * 24 * 365)).is_empty());
        assert!(timers.is_active(id));
    }
}
