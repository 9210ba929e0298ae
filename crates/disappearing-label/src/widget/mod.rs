//! Widget system.
//!
//! A widget is an [`Object`] that embeds a [`WidgetBase`] and reacts to
//! [`WidgetEvent`]s. The [`WidgetHost`](crate::WidgetHost) owns inserted
//! widgets and is the only thing that calls [`Widget::event`].

mod base;
pub mod events;
pub mod geometry;
pub mod widgets;

use disappearing_label_core::Object;

pub use base::WidgetBase;
pub use events::{
    DestroyEvent, EnterEvent, EventBase, InsertEvent, LeaveEvent, TimerEvent, WidgetEvent,
};
pub use geometry::{Point, Rect, Size};

/// The interface every widget implements.
pub trait Widget: Object + Send + Sync {
    /// The widget's shared state.
    fn widget_base(&self) -> &WidgetBase;

    /// The widget's shared state, mutably.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Handle an event. Returns `true` if the event was handled.
    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let _ = event;
        false
    }

    /// Whether the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// The widget's rectangle in host coordinates.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Move or resize the widget.
    fn set_geometry(&mut self, geometry: Rect) {
        self.widget_base_mut().set_geometry(geometry);
    }
}
