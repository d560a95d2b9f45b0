//! The counter widget: a display, increment/decrement buttons and a
//! floor-guarded error message.

mod state;
mod widget;

pub use state::*;
pub use widget::*;

/// `data-test` tags of the elements the counter renders
pub mod test_ids {
    pub const APP: &str = "component-app";
    pub const DISPLAY: &str = "counter-display";
    pub const INCREMENT: &str = "increment-button";
    pub const DECREMENT: &str = "decrement-button";
    pub const ERROR: &str = "error-message";
}
