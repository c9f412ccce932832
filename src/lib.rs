//! # driftfield
//!
//! A decorative particle field: slowly drifting glowing points joined by
//! faint lines whenever two of them come close.
//!
//! The crate splits into a simulator that owns the particles, a renderer
//! that draws one frame onto any [`Canvas`], and a frame loop that keeps
//! requesting the next refresh until it is cancelled. The `driftfield`
//! binary wires them to a winit window and a wgpu surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), 900, 600);
//! let renderer = FrameRenderer::default();
//! let mut canvas = RecordingCanvas::new();
//!
//! let stats = renderer.render_frame(&mut field, Theme::Glass, &mut canvas);
//! assert_eq!(stats.particles, 36);
//! ```
//!
//! ## Frame anatomy
//!
//! Every frame, in order:
//! 1. clear the surface and wash it with the theme tint
//! 2. step each particle, then draw it as a small radial glow
//! 3. stroke a line between every pair closer than the connection threshold,
//!    fading linearly with distance
//!
//! Motion is per frame, not per second: particles move by their velocity
//! once per display refresh.
//!
//! ## Visibility
//!
//! [`ParticleField::set_hidden`] freezes the field while the window is not
//! visible and restores each particle's velocity when it comes back.

pub mod canvas;
pub mod color;
pub mod config;
pub mod effects;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod gpu;
pub mod particle;
pub mod renderer;
pub mod theme;
pub mod time;
mod window;

pub use canvas::{Canvas, DrawCommand, LineStyle, Paint, RecordingCanvas};
pub use config::{AppConfig, ConnectionConfig, FieldConfig, ParallaxConfig, SampleRange, WindowConfig};
pub use error::{ConfigError, GpuError, RunError};
pub use field::ParticleField;
pub use frame_loop::{CancelHandle, FrameLoop, FrameScheduler};
pub use glam::{Vec2, Vec4};
pub use particle::{Bounds, Particle};
pub use renderer::{connection_alpha, connections, Connection, FrameRenderer, FrameStats};
pub use theme::Theme;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, LineStyle, Paint, RecordingCanvas};
    pub use crate::config::{AppConfig, ConnectionConfig, FieldConfig, ParallaxConfig};
    pub use crate::effects::{Parallax, Reveal, Tilt};
    pub use crate::field::ParticleField;
    pub use crate::frame_loop::{CancelHandle, FrameLoop, FrameScheduler};
    pub use crate::renderer::{FrameRenderer, FrameStats};
    pub use crate::theme::Theme;
    pub use crate::{Vec2, Vec4};
}
