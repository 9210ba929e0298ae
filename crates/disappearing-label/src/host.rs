//! The widget host.
//!
//! [`WidgetHost`] stands in for the view framework a widget lives in. It owns
//! inserted widgets, delivers their lifecycle hooks, turns raw pointer
//! positions into enter/leave crossings, and routes expired timers back to
//! the widgets that started them. Every event is delivered to completion
//! before the next one, which is what lets widgets treat timer expiry and
//! pointer input as mutually exclusive.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use disappearing_label::{DisappearingLabel, Point, Rect, Widget, WidgetHost};
//! use disappearing_label_core::ManualClock;
//!
//! let mut host = WidgetHost::with_manual_clock(ManualClock::new());
//! let mut label = DisappearingLabel::new(host.timer_host());
//! label.set_geometry(Rect::new(0.0, 0.0, 200.0, 24.0));
//! let id = host.insert(label);
//!
//! // Hovering holds the message up indefinitely.
//! host.pointer_moved(Point::new(10.0, 10.0));
//! host.advance(Duration::from_secs(60)).unwrap();
//! assert!(host.widget::<DisappearingLabel>(id).unwrap().is_visible());
//!
//! // Leaving restarts the countdown.
//! host.pointer_moved(Point::new(500.0, 500.0));
//! host.advance(Duration::from_secs(2)).unwrap();
//! assert!(!host.widget::<DisappearingLabel>(id).unwrap().is_visible());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use disappearing_label_core::logging::targets;
use disappearing_label_core::object::type_name_of;
use disappearing_label_core::{EventLoop, ManualClock, ObjectId, TimerHost};

use crate::error::{HostError, Result};
use crate::widget::{
    DestroyEvent, EnterEvent, InsertEvent, LeaveEvent, Point, TimerEvent, Widget, WidgetEvent,
};

/// Owns widgets and delivers events to them.
pub struct WidgetHost {
    event_loop: Arc<EventLoop>,
    widgets: HashMap<ObjectId, Box<dyn Widget>>,
    /// Insertion order; later widgets are on top for hit testing.
    order: Vec<ObjectId>,
    hovered: Option<ObjectId>,
}

impl WidgetHost {
    /// A host on the wall clock.
    pub fn new() -> Self {
        Self::with_event_loop(Arc::new(EventLoop::new()))
    }

    /// A host whose time only moves through [`advance`](Self::advance).
    pub fn with_manual_clock(clock: ManualClock) -> Self {
        Self::with_event_loop(Arc::new(EventLoop::with_manual_clock(clock)))
    }

    /// A host on an existing event loop.
    pub fn with_event_loop(event_loop: Arc<EventLoop>) -> Self {
        Self {
            event_loop,
            widgets: HashMap::new(),
            order: Vec::new(),
            hovered: None,
        }
    }

    /// The event loop timers run on.
    pub fn event_loop(&self) -> &Arc<EventLoop> {
        &self.event_loop
    }

    /// A timer host handle to construct widgets with.
    pub fn timer_host(&self) -> Arc<dyn TimerHost> {
        self.event_loop.clone()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Take ownership of a widget and deliver its insert event.
    pub fn insert<W: Widget>(&mut self, widget: W) -> ObjectId {
        let id = widget.object_id();
        self.widgets.insert(id, Box::new(widget));
        self.order.push(id);
        tracing::debug!(target: targets::HOST, ?id, "widget inserted");

        let mut event = WidgetEvent::Insert(InsertEvent::new());
        let _ = deliver(&mut self.widgets, id, &mut event);
        id
    }

    /// Deliver the destroy event, stop the widget's timers, and hand the
    /// widget back.
    pub fn remove(&mut self, id: ObjectId) -> std::result::Result<Box<dyn Widget>, HostError> {
        let mut widget = self.widgets.remove(&id).ok_or(HostError::UnknownWidget(id))?;
        self.order.retain(|w| *w != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }

        widget.event(&mut WidgetEvent::Destroy(DestroyEvent::new()));
        self.event_loop.remove_timers_for(id);
        tracing::debug!(target: targets::HOST, ?id, "widget removed");
        Ok(widget)
    }

    /// Whether a widget is inserted.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of inserted widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether no widgets are inserted.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Inserted widget ids, bottom to top.
    pub fn widget_ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Borrow an inserted widget as its concrete type.
    pub fn widget<T: Widget>(&self, id: ObjectId) -> Option<&T> {
        let widget: &dyn Any = &**self.widgets.get(&id)?;
        widget.downcast_ref::<T>()
    }

    /// Mutably borrow an inserted widget as its concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: ObjectId) -> Option<&mut T> {
        let widget: &mut dyn Any = &mut **self.widgets.get_mut(&id)?;
        widget.downcast_mut::<T>()
    }

    // =========================================================================
    // Event Delivery
    // =========================================================================

    /// Deliver an event directly to a widget.
    pub fn send_event(
        &mut self,
        id: ObjectId,
        event: &mut WidgetEvent,
    ) -> std::result::Result<bool, HostError> {
        deliver(&mut self.widgets, id, event)
    }

    /// The widget currently under the pointer.
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Track the pointer at `pos` (host coordinates).
    ///
    /// Delivers `Leave` to the previously hovered widget and `Enter` to the
    /// newly hovered one when the topmost visible widget under the pointer
    /// changes. Returns the hovered widget.
    pub fn pointer_moved(&mut self, pos: Point) -> Option<ObjectId> {
        let target = self.order.iter().rev().copied().find(|id| {
            self.widgets
                .get(id)
                .is_some_and(|w| w.is_visible() && w.geometry().contains(pos))
        });

        if target == self.hovered {
            return target;
        }

        if let Some(previous) = self.hovered.take() {
            let mut event = WidgetEvent::Leave(LeaveEvent::new());
            let _ = deliver(&mut self.widgets, previous, &mut event);
        }

        if let Some(next) = target {
            let local_pos = self
                .widgets
                .get(&next)
                .map_or(pos, |w| w.geometry().to_local(pos));
            let mut event = WidgetEvent::Enter(EnterEvent::new(local_pos));
            let _ = deliver(&mut self.widgets, next, &mut event);
            self.hovered = Some(next);
        }

        target
    }

    /// The pointer left the host entirely.
    pub fn pointer_left_window(&mut self) {
        if let Some(previous) = self.hovered.take() {
            let mut event = WidgetEvent::Leave(LeaveEvent::new());
            let _ = deliver(&mut self.widgets, previous, &mut event);
        }
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Step a manual clock forward, delivering timers as they come due.
    ///
    /// Returns the number of timers that fired.
    pub fn advance(&mut self, duration: Duration) -> Result<usize> {
        let event_loop = Arc::clone(&self.event_loop);
        let widgets = &mut self.widgets;
        let fired = event_loop.advance(duration, |fired| {
            let mut event = WidgetEvent::Timer(TimerEvent::new(fired.id));
            let _ = deliver(widgets, fired.owner, &mut event);
        })?;
        Ok(fired)
    }

    /// Deliver every timer that is already due. Returns how many fired.
    pub fn process_expired(&mut self) -> usize {
        let fired = self.event_loop.process_expired();
        for timer in &fired {
            let mut event = WidgetEvent::Timer(TimerEvent::new(timer.id));
            let _ = deliver(&mut self.widgets, timer.owner, &mut event);
        }
        fired.len()
    }
}

fn deliver(
    widgets: &mut HashMap<ObjectId, Box<dyn Widget>>,
    id: ObjectId,
    event: &mut WidgetEvent,
) -> std::result::Result<bool, HostError> {
    let Some(widget) = widgets.get_mut(&id) else {
        tracing::trace!(target: targets::HOST, ?id, kind = event.kind(), "dropping event for unknown widget");
        return Err(HostError::UnknownWidget(id));
    };
    let handled = widget.event(event);
    tracing::trace!(
        target: targets::HOST,
        ?id,
        widget_type = type_name_of(id).unwrap_or("<unregistered>"),
        kind = event.kind(),
        handled,
        "event delivered"
    );
    Ok(handled)
}

impl Default for WidgetHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WidgetHost {
    fn drop(&mut self) {
        for id in std::mem::take(&mut self.order).into_iter().rev() {
            if let Some(mut widget) = self.widgets.remove(&id) {
                widget.event(&mut WidgetEvent::Destroy(DestroyEvent::new()));
                self.event_loop.remove_timers_for(id);
            }
        }
    }
}

impl fmt::Debug for WidgetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHost")
            .field("event_loop", &self.event_loop)
            .field("widgets", &self.order)
            .field("hovered", &self.hovered)
            .finish()
    }
}

// ============================================================================
// Async Driver
// ============================================================================

/// A clock that reads tokio's time, so paused-time tests move it too.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[cfg(feature = "tokio")]
impl disappearing_label_core::Clock for TokioClock {
    fn now(&self) -> std::time::Instant {
        tokio::time::Instant::now().into_std()
    }
}

#[cfg(feature = "tokio")]
impl WidgetHost {
    /// A host on tokio's clock.
    pub fn with_tokio_clock() -> Self {
        Self::with_event_loop(Arc::new(EventLoop::with_clock(TokioClock)))
    }

    /// Sleep through `duration`, waking at each timer deadline to deliver
    /// expired timers. Returns how many fired.
    pub async fn run_for(&mut self, duration: Duration) -> usize {
        let start = tokio::time::Instant::now().into_std();
        let end = tokio::time::Instant::from_std(
            disappearing_label_core::clock::instant_after(start, duration),
        );
        let mut fired = 0;

        loop {
            fired += self.process_expired();
            if tokio::time::Instant::now() >= end {
                break;
            }
            let wake = self
                .event_loop
                .next_deadline()
                .map(tokio::time::Instant::from_std)
                .map_or(end, |deadline| deadline.min(end));
            tokio::time::sleep_until(wake).await;
        }

        fired
    }
}
