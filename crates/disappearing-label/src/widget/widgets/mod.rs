//! Concrete widgets.

mod disappearing_label;

pub use disappearing_label::{DisappearingLabel, LabelState};
