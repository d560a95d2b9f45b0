//! Error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    
    #[error("no element tagged {0:?} is rendered")]
    UnknownTarget(String),
    
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::tree::TaffyError),
    
    #[error("failed to serialize render tree: {0}")]
    Serialize(#[from] serde_json::Error),
    
    #[cfg(feature = "desktop")]
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    
    #[cfg(feature = "desktop")]
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    
    #[cfg(feature = "desktop")]
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    
    #[cfg(feature = "desktop")]
    #[error("surface reports no usable texture format")]
    UnsupportedSurface,
    
    #[cfg(feature = "desktop")]
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    
    #[cfg(feature = "desktop")]
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
