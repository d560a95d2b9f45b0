//! Counter UI - a counter widget with a floor-guarded error state
//! 
//! Built on a small retained widget toolkit: widgets describe themselves as a
//! render tree, Taffy lays that tree out, and an [`App`] routes input back to
//! the widgets. With the `desktop` feature the same app runs in a winit window
//! drawn with wgpu.

pub mod core;
pub mod widgets;
pub mod render;
pub mod layout;
pub mod style;
pub mod app;
pub mod counter;
pub mod error;

pub use app::{App, AppConfig, WindowConfig};
pub use counter::{Command, CounterState, CounterWidget, FloorViolation};
pub use error::UiError;
pub use widgets::*;
pub use style::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::{App, AppConfig, WindowConfig};
    pub use crate::counter::{test_ids, Command, CounterState, CounterWidget};
    pub use crate::widgets::*;
    pub use crate::style::*;
    pub use crate::core::{Widget, State, Context, Event, Key};
    pub use crate::render::ViewNode;
}
