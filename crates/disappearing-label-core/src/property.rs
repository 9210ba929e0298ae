//! Reactive properties.
//!
//! `Property<T>` wraps a value and reports whether a write actually changed
//! it, so the owner emits its change signal only on real transitions:
//!
//! ```
//! use disappearing_label_core::{Property, Signal};
//!
//! struct Flag {
//!     value: Property<bool>,
//!     changed: Signal<bool>,
//! }
//!
//! impl Flag {
//!     fn set(&self, value: bool) {
//!         if self.value.set(value) {
//!             self.changed.emit(value);
//!         }
//!     }
//! }
//!
//! let flag = Flag { value: Property::new(false), changed: Signal::new() };
//! flag.set(true);
//! assert!(flag.value.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let prop = Property::new(42);
        assert!(!prop.set(42));
        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_with_borrows() {
        let prop = Property::new(String::from("hello"));
        assert_eq!(prop.with(|s| s.len()), 5);
    }

    #[test]
    fn test_set_silent() {
        let prop = Property::new(false);
        prop.set_silent(true);
        assert!(prop.get());
        assert!(!prop.set(true));
    }
}
