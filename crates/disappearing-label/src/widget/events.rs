//! Widget event types.
//!
//! Lifecycle hooks, pointer crossings and timer expiry all reach a widget
//! through the same [`WidgetEvent`] enum and the same
//! [`Widget::event`](super::Widget::event) entry point. The host delivers
//! them one at a time, so a handler never observes another event mid-flight.

use disappearing_label_core::TimerId;

use super::geometry::Point;

/// Common data for all widget events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Mark the event as handled.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Insert event, sent once when the widget is added to a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertEvent {
    /// Base event data.
    pub base: EventBase,
}

impl InsertEvent {
    /// Create a new insert event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Destroy event, sent once when the widget is removed from its host.
///
/// No further events are delivered afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestroyEvent {
    /// Base event data.
    pub base: EventBase,
}

impl DestroyEvent {
    /// Create a new destroy event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Enter event, sent when the pointer moves into the widget's bounds.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// Where the pointer entered, in widget-local coordinates.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Leave event, sent when the pointer moves out of the widget's bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Timer event, sent when a widget-owned timer fires.
///
/// Handlers must compare `id` with the timer they are waiting on; an event
/// for a timer that has since been replaced is stale and should be ignored.
#[derive(Debug, Clone, Copy)]
pub struct TimerEvent {
    /// Base event data.
    pub base: EventBase,
    /// The timer that fired.
    pub id: TimerId,
}

impl TimerEvent {
    /// Create a new timer event.
    pub fn new(id: TimerId) -> Self {
        Self {
            base: EventBase::new(),
            id,
        }
    }
}

/// All events a widget can receive.
#[derive(Debug, Clone, Copy)]
pub enum WidgetEvent {
    /// The widget was inserted into a host.
    Insert(InsertEvent),
    /// The widget is being removed from its host.
    Destroy(DestroyEvent),
    /// The pointer entered the widget.
    Enter(EnterEvent),
    /// The pointer left the widget.
    Leave(LeaveEvent),
    /// A widget-owned timer fired.
    Timer(TimerEvent),
}

impl WidgetEvent {
    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// A short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Destroy(_) => "destroy",
            Self::Enter(_) => "enter",
            Self::Leave(_) => "leave",
            Self::Timer(_) => "timer",
        }
    }

    fn base(&self) -> &EventBase {
        match self {
            Self::Insert(e) => &e.base,
            Self::Destroy(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::Timer(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::Insert(e) => &mut e.base,
            Self::Destroy(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::Timer(e) => &mut e.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept() {
        let mut event = WidgetEvent::Leave(LeaveEvent::new());
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
    }

    #[test]
    fn test_kind() {
        assert_eq!(WidgetEvent::Insert(InsertEvent::new()).kind(), "insert");
        assert_eq!(WidgetEvent::Enter(EnterEvent::new(Point::ZERO)).kind(), "enter");
    }
}
