//! Typed configuration for the particle field and its runner.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! theme = "glass"
//!
//! [field]
//! min_particles = 40
//! seed = 7
//!
//! [connections]
//! threshold = 100.0
//! ```

use std::path::Path;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::color::rgba;
use crate::error::ConfigError;
use crate::theme::Theme;

/// Half-open sampling interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(ConfigError::invalid(
                field,
                format!("range [{}, {}) is empty", self.min, self.max),
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(ConfigError::invalid(
                field,
                format!("range [{}, {}) is too wide to sample", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Particle population, reset distribution and bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Viewport area (px²) per extra particle.
    pub density_area: u64,
    /// Particles present even on a zero-area viewport.
    pub min_particles: usize,
    /// Distance outside the viewport a particle may drift before respawning.
    pub margin: f32,
    /// Full width of the velocity range; components are drawn from ±speed/2.
    pub speed: f32,
    pub size: SampleRange,
    pub alpha: SampleRange,
    /// Hue in degrees.
    pub hue: SampleRange,
    /// Fixed PRNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_area: 90_000,
            min_particles: 30,
            margin: 20.0,
            speed: 0.35,
            size: SampleRange::new(0.8, 3.0),
            alpha: SampleRange::new(0.15, 0.65),
            hue: SampleRange::new(230.0, 310.0),
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Number of particles for a viewport: `floor(w * h / density_area) + min_particles`.
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        let area = width as u64 * height as u64;
        (area / self.density_area.max(1)) as usize + self.min_particles
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density_area == 0 {
            return Err(ConfigError::invalid("field.density_area", "must be positive"));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::invalid("field.margin", "must be finite and zero or positive"));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::invalid("field.speed", "must be finite and zero or positive"));
        }
        self.size.validate("field.size")?;
        if self.size.min <= 0.0 {
            return Err(ConfigError::invalid("field.size", "radius must be positive"));
        }
        self.alpha.validate("field.alpha")?;
        if self.alpha.min < 0.0 || self.alpha.max > 1.0 {
            return Err(ConfigError::invalid("field.alpha", "must lie within [0, 1]"));
        }
        self.hue.validate("field.hue")?;
        Ok(())
    }
}

/// Proximity lines drawn between particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Pairs at or beyond this distance (px) are not connected.
    pub threshold: f32,
    /// Line opacity at distance zero.
    pub max_alpha: f32,
    /// Opacity lost between distance zero and the threshold.
    pub falloff: f32,
    pub color: Vec4,
    /// Stroke width in px.
    pub width: f32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            threshold: 120.0,
            max_alpha: 0.12,
            falloff: 0.11,
            color: rgba(200, 220, 255, 0.7),
            width: 0.6,
        }
    }
}

impl ConnectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::invalid("connections.threshold", "must be finite and positive"));
        }
        if !(self.width > 0.0) {
            return Err(ConfigError::invalid("connections.width", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.max_alpha) {
            return Err(ConfigError::invalid("connections.max_alpha", "must lie within [0, 1]"));
        }
        // a negative falloff would make lines brighten with distance
        if !(self.falloff.is_finite() && self.falloff >= 0.0) {
            return Err(ConfigError::invalid("connections.falloff", "must be finite and zero or positive"));
        }
        Ok(())
    }
}

/// Cursor and scroll parallax applied to the particle layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Fraction of the cursor/scroll motion the layer follows.
    pub depth: f32,
    /// Easing factor per frame toward the cursor target.
    pub speed: f32,
}

impl ParallaxConfig {
    pub const DEFAULT_DEPTH: f32 = 0.03;
    pub const DEFAULT_SPEED: f32 = 0.05;
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
            speed: Self::DEFAULT_SPEED,
        }
    }
}

/// Window the desktop runner opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Opaque color the surface is cleared to before the theme wash.
    pub backdrop: Vec4,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "driftfield".to_string(),
            width: 1280,
            height: 720,
            backdrop: rgba(6, 10, 22, 1.0),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub connections: ConnectionConfig,
    pub parallax: ParallaxConfig,
    pub theme: Theme,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window", "size must be non-zero"));
        }
        self.field.validate()?;
        self.connections.validate()?;
        Ok(())
    }
}
