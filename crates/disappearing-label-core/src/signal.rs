//! Signal/slot notifications.
//!
//! A [`Signal`] holds a set of connected slots (closures). Emitting the signal
//! calls every slot, in connection order, with a reference to the argument.
//! The widget uses this to publish visibility changes to whatever renders it.
//!
//! Slots are invoked directly on the emitting thread. The connection list is
//! snapshotted before invocation, so a slot may connect or disconnect other
//! slots without deadlocking; such changes take effect on the next emit.
//!
//! # Example
//!
//! ```
//! use disappearing_label_core::Signal;
//!
//! let visible_changed = Signal::<bool>::new();
//! let id = visible_changed.connect(|visible| println!("visible: {visible}"));
//! visible_changed.emit(true);
//! visible_changed.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one signal-slot connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type Connections<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal with any number of connected slots.
pub struct Signal<Args> {
    connections: Arc<Connections<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Returns an id that can later be passed to
    /// [`disconnect`](Self::disconnect).
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard drops.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id,
        }
    }

    /// Disconnect a slot. Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Temporarily suppress emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// Disconnects its slot when dropped.
///
/// The guard does not keep the signal alive; if the signal is dropped first,
/// dropping the guard does nothing.
pub struct ConnectionGuard<Args> {
    connections: Weak<Connections<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.lock().remove(self.id);
        }
    }
}

static_assertions::assert_impl_all!(Signal<bool>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let counter = Arc::new(AtomicI32::new(0));

        let counter_clone = counter.clone();
        let id = signal.connect(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(2);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<bool>::new();
        let counter = Arc::new(AtomicI32::new(0));

        let counter_clone = counter.clone();
        signal.connect(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(true);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(false);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard() {
        let signal = Signal::<i32>::new();
        let counter = Arc::new(AtomicI32::new(0));
        {
            let counter_clone = counter.clone();
            let _guard = signal.connect_scoped(move |&n| {
                counter_clone.fetch_add(n, Ordering::SeqCst);
            });
            signal.emit(42);
        }
        signal.emit(43);
        assert_eq!(counter.load(Ordering::SeqCst), 42);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_outliving_signal() {
        let signal = Signal::<i32>::new();
        let guard = signal.connect_scoped(|_| {});
        drop(signal);
        drop(guard);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicI32::new(0));

        let inner = signal.clone();
        let calls_clone = calls.clone();
        signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            inner.disconnect_all();
        });

        signal.emit(());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
