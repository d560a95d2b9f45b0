//! Core types and traits for the widget toolkit

mod widget;
mod state;
pub mod context;
mod events;

pub use widget::*;
pub use state::*;
pub use context::*;
pub use events::*;
