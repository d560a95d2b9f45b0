//! Render tree, draw primitives and GPU rendering with wgpu

mod view;
mod primitives;
#[cfg(feature = "desktop")]
mod gpu;

pub use view::*;
pub use primitives::*;
#[cfg(feature = "desktop")]
pub use gpu::*;
