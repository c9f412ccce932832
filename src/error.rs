//! Error types for driftfield.
//!
//! Configuration, GPU initialization and the windowed runner each get their
//! own enum; [`RunError`] wraps the others for the binary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`crate::AppConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of its allowed domain.
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    /// Theme name not recognized.
    #[error("Unknown theme `{0}` (expected `glass` or `default`)")]
    UnknownTheme(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("GPU surface reports no supported formats")]
    NoSurfaceFormat,
    /// The surface reported no composite alpha modes.
    #[error("GPU surface reports no composite alpha modes")]
    NoAlphaMode,
}

/// Errors that can occur when running the windowed particle field.
#[derive(Error, Debug)]
pub enum RunError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Configuration was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for driftfield operations.
pub type Result<T, E = RunError> = std::result::Result<T, E>;
