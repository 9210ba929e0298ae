//! Core systems for the disappearing label.
//!
//! This crate provides the runtime the widget is built on:
//!
//! - **Clock**: wall-clock and manually stepped time sources
//! - **Timers**: a one-shot timer queue keyed by deadline
//! - **Event Loop**: timer ownership and stepwise time advancement
//! - **Object Model**: stable object ids
//! - **Signal/Slot System**: change notification
//! - **Property System**: values with change detection
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use disappearing_label_core::{EventLoop, ManualClock, Object, ObjectBase, ObjectId, TimerHost};
//!
//! struct Blinker {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Blinker {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let clock = ManualClock::new();
//! let event_loop = EventLoop::with_manual_clock(clock.clone());
//! let blinker = Blinker { base: ObjectBase::new::<Blinker>() };
//!
//! let timer = event_loop.start_timer(blinker.object_id(), Duration::from_millis(500));
//! let fired = event_loop
//!     .advance(Duration::from_secs(1), |fired| assert_eq!(fired.id, timer))
//!     .unwrap();
//! assert_eq!(fired, 1);
//! ```

pub mod clock;
mod error;
pub mod event_loop;
pub mod logging;
pub mod object;
pub mod property;
pub mod signal;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ObjectError, Result, TimerError};
pub use event_loop::{EventLoop, FiredTimer, MIN_TIMER_DURATION, TimerHost};
pub use logging::PerfSpan;
pub use object::{Object, ObjectBase, ObjectId};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
