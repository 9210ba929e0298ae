//! State shared by every widget.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use disappearing_label_core::{Object, ObjectBase, ObjectId, Signal, TimerHost, TimerId};

use super::geometry::Rect;

/// Identity, geometry, visibility and timer access for a widget.
///
/// Concrete widgets embed a `WidgetBase` and expose it through
/// [`Widget::widget_base`](super::Widget::widget_base).
pub struct WidgetBase {
    object_base: ObjectBase,
    geometry: Rect,
    visible: bool,
    hovered: bool,
    timers: Arc<dyn TimerHost>,

    /// Emitted with the new value whenever visibility changes.
    pub visible_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a widget base for a widget of type `T`.
    ///
    /// Widgets start hidden; `timers` starts and stops the widget's timers.
    pub fn new<T: Object + 'static>(timers: Arc<dyn TimerHost>) -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            geometry: Rect::ZERO,
            visible: false,
            hovered: false,
            timers,
            visible_changed: Signal::new(),
        }
    }

    /// The widget's object id.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// The widget's rectangle in host coordinates.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Move or resize the widget.
    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    /// Whether the widget is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set visibility, emitting [`visible_changed`](Self::visible_changed)
    /// if it changed. Returns whether it changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.visible_changed.emit(visible);
        true
    }

    /// Whether the pointer is over the widget.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Start a one-shot timer owned by this widget.
    pub fn start_timer(&self, duration: Duration) -> TimerId {
        self.timers.start_timer(self.object_id(), duration)
    }

    /// Stop a timer. Returns `true` if it was still pending.
    pub fn stop_timer(&self, id: TimerId) -> bool {
        self.timers.stop_timer(id).is_ok()
    }

    /// Whether a timer is still pending.
    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.timers.is_timer_active(id)
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("object_id", &self.object_id())
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}
