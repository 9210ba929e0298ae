//! DisappearingLabel widget implementation.
//!
//! This module provides [`DisappearingLabel`], a label that shows its message
//! when it is inserted into a host, hides it again after a timeout, and holds
//! the message up for as long as the pointer rests on it.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use disappearing_label::{DisappearingLabel, WidgetHost};
//! use disappearing_label_core::ManualClock;
//!
//! let mut host = WidgetHost::with_manual_clock(ManualClock::new());
//! let label = DisappearingLabel::new(host.timer_host())
//!     .with_message("Saved")
//!     .with_timeout(Duration::from_millis(2000));
//! let id = host.insert(label);
//!
//! assert!(host.widget::<DisappearingLabel>(id).unwrap().is_visible());
//! host.advance(Duration::from_millis(3000)).unwrap();
//! assert!(!host.widget::<DisappearingLabel>(id).unwrap().is_visible());
//! ```
//!
//! # Behavior
//!
//! ```text
//!   Hidden --insert--> VisibleCountingDown --timer--> Hidden
//!                        |          ^
//!                    enter|          |leave
//!                        v          |
//!                       VisibleHovered
//!
//!   any state --destroy--> Disposed
//! ```
//!
//! Every pointer crossing cancels and, on leave, restarts the countdown, so at
//! most one hide is ever pending and the full timeout always runs from the
//! most recent leave.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use disappearing_label_core::logging::targets;
use disappearing_label_core::{
    MIN_TIMER_DURATION, Object, ObjectId, Property, Signal, TimerHost, TimerId,
};

use crate::config::LabelConfig;
use crate::widget::{Widget, WidgetBase, WidgetEvent};

// ============================================================================
// LabelState
// ============================================================================

/// Where a [`DisappearingLabel`] is in its show/hide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelState {
    /// The message is not shown.
    Hidden,
    /// The message is shown and a hide is pending.
    VisibleCountingDown,
    /// The message is shown and held up by the pointer.
    VisibleHovered,
    /// The message is shown with no hide pending and the pointer elsewhere.
    ///
    /// Reached by a label configured to start visible, or by cancelling the
    /// countdown directly. The message stays up until the pointer passes
    /// over it.
    VisibleIdle,
    /// The label has been destroyed; it ignores all further events.
    Disposed,
}

impl fmt::Display for LabelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::VisibleCountingDown => "visible (counting down)",
            Self::VisibleHovered => "visible (hovered)",
            Self::VisibleIdle => "visible",
            Self::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

// ============================================================================
// DisappearingLabel
// ============================================================================

/// A label that auto-hides after a timeout unless hovered.
///
/// # Signals
///
/// - [`state_changed`](DisappearingLabel::state_changed): emitted on every state transition
/// - [`message_changed`](DisappearingLabel::message_changed): emitted when the text changes
/// - `widget_base().visible_changed`: emitted when the message is shown or hidden
pub struct DisappearingLabel {
    base: WidgetBase,

    /// The text to display.
    message: Property<String>,

    /// How long the message stays up after insertion or pointer-leave.
    timeout: Duration,

    /// The pending hide, if any.
    pending_timer: Option<TimerId>,

    /// Set on destroy; every handler is a no-op afterwards.
    disposed: bool,

    /// Signal emitted when the state changes.
    pub state_changed: Signal<LabelState>,

    /// Signal emitted when the message changes.
    pub message_changed: Signal<String>,
}

impl DisappearingLabel {
    /// Create a hidden label with the default message and timeout.
    pub fn new(timers: Arc<dyn TimerHost>) -> Self {
        Self {
            base: WidgetBase::new::<Self>(timers),
            message: Property::new(LabelConfig::DEFAULT_MESSAGE.to_string()),
            timeout: Duration::from_millis(LabelConfig::DEFAULT_TIMEOUT_MS),
            pending_timer: None,
            disposed: false,
            state_changed: Signal::new(),
            message_changed: Signal::new(),
        }
    }

    /// Create a label from a configuration.
    ///
    /// The configuration is expected to have passed
    /// [`LabelConfig::validate`]; a zero timeout is raised to one millisecond.
    pub fn from_config(timers: Arc<dyn TimerHost>, config: &LabelConfig) -> Self {
        Self::new(timers)
            .with_timeout(config.timeout())
            .with_message(config.message.clone())
            .with_visible(config.is_visible)
    }

    /// Set the timeout using builder pattern.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Set the message using builder pattern.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message.set_silent(message.into());
        self
    }

    /// Set the initial visibility using builder pattern.
    ///
    /// This does not schedule a hide.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.base.set_visible(visible);
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// The current message.
    pub fn message(&self) -> String {
        self.message.get()
    }

    /// Replace the message.
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.message.set(message.clone()) {
            self.message_changed.emit(message);
        }
    }

    /// The hide timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Change the hide timeout. Applies to the next countdown; a hide that is
    /// already pending keeps its deadline.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout.max(MIN_TIMER_DURATION);
    }

    /// Whether the message is shown.
    pub fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    /// The pending hide timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending_timer
    }

    /// Whether the label has been destroyed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The current state.
    pub fn state(&self) -> LabelState {
        if self.disposed {
            LabelState::Disposed
        } else if !self.base.is_visible() {
            LabelState::Hidden
        } else if self.pending_timer.is_some() {
            LabelState::VisibleCountingDown
        } else if self.base.is_hovered() {
            LabelState::VisibleHovered
        } else {
            LabelState::VisibleIdle
        }
    }

    // =========================================================================
    // Visibility / Timer Control
    // =========================================================================

    /// Show the message and start the countdown.
    ///
    /// Does nothing if the message is already shown.
    pub fn show(&mut self) {
        self.transition(|label| {
            if label.base.is_visible() {
                return;
            }
            label.base.set_visible(true);
            label.schedule_hide_inner();
        });
    }

    /// Hide the message now and cancel any pending hide.
    pub fn hide(&mut self) {
        self.transition(|label| {
            label.cancel_pending_inner();
            label.base.set_visible(false);
        });
    }

    /// Restart the countdown: cancel any pending hide and start a new one of
    /// the full timeout.
    pub fn schedule_hide(&mut self) {
        self.transition(Self::schedule_hide_inner);
    }

    /// Cancel the pending hide. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let mut cancelled = false;
        self.transition(|label| cancelled = label.cancel_pending_inner());
        cancelled
    }

    fn schedule_hide_inner(&mut self) {
        self.cancel_pending_inner();
        let id = self.base.start_timer(self.timeout);
        tracing::trace!(target: targets::WIDGET, object_id = ?self.object_id(), timer = ?id, timeout = ?self.timeout, "hide scheduled");
        self.pending_timer = Some(id);
    }

    fn cancel_pending_inner(&mut self) -> bool {
        let Some(id) = self.pending_timer.take() else {
            return false;
        };
        self.base.stop_timer(id);
        tracing::trace!(target: targets::WIDGET, object_id = ?self.object_id(), timer = ?id, "hide cancelled");
        true
    }

    /// Run a mutation unless disposed, emitting `state_changed` if the state
    /// differs afterwards.
    fn transition<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        if self.disposed {
            return;
        }
        let before = self.state();
        f(self);
        let after = self.state();
        if before != after {
            tracing::debug!(target: targets::WIDGET, object_id = ?self.object_id(), from = %before, to = %after, "label state changed");
            self.state_changed.emit(after);
        }
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn handle_insert(&mut self) -> bool {
        self.show();
        true
    }

    fn handle_enter(&mut self) -> bool {
        self.transition(|label| {
            label.base.set_hovered(true);
            label.cancel_pending_inner();
        });
        true
    }

    fn handle_leave(&mut self) -> bool {
        self.transition(|label| {
            label.base.set_hovered(false);
            if label.base.is_visible() {
                label.schedule_hide_inner();
            }
        });
        true
    }

    fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.pending_timer != Some(id) {
            return false;
        }
        self.transition(|label| {
            label.pending_timer = None;
            label.base.set_visible(false);
        });
        true
    }

    fn handle_destroy(&mut self) -> bool {
        self.transition(|label| {
            label.cancel_pending_inner();
            label.disposed = true;
        });
        true
    }
}

impl Drop for DisappearingLabel {
    fn drop(&mut self) {
        if let Some(id) = self.pending_timer.take() {
            self.base.stop_timer(id);
        }
    }
}

impl fmt::Debug for DisappearingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisappearingLabel")
            .field("object_id", &self.object_id())
            .field("state", &self.state())
            .field("timeout", &self.timeout)
            .field("message", &self.message())
            .finish()
    }
}

impl Object for DisappearingLabel {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for DisappearingLabel {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if self.disposed {
            return false;
        }
        let handled = match event {
            WidgetEvent::Insert(_) => self.handle_insert(),
            WidgetEvent::Destroy(_) => self.handle_destroy(),
            WidgetEvent::Enter(_) => self.handle_enter(),
            WidgetEvent::Leave(_) => self.handle_leave(),
            WidgetEvent::Timer(e) => self.handle_timer(e.id),
        };
        if handled {
            event.accept();
        }
        handled
    }
}

// Ensure DisappearingLabel is Send + Sync
static_assertions::assert_impl_all!(DisappearingLabel: Send, Sync);
