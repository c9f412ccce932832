//! A single drifting particle.

use glam::Vec2;
use rand::Rng;

use crate::config::{FieldConfig, SampleRange};

/// Point mass with visual attributes, positioned in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
    /// Disc radius in pixels.
    pub size: f32,
    pub alpha: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Velocity set aside while the field is paused.
    saved_velocity: Option<Vec2>,
}

/// Viewport the particle lives in, plus how far it may stray outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Bounds {
    pub fn new(width: u32, height: u32, margin: f32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            margin,
        }
    }

    /// Whether `p` lies inside the viewport expanded by the margin.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= -self.margin
            && p.x <= self.width + self.margin
            && p.y >= -self.margin
            && p.y <= self.height + self.margin
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: SampleRange) -> f32 {
    if range.min < range.max {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}

impl Particle {
    /// A particle drawn from the reset distribution.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, config: &FieldConfig) -> Self {
        let mut particle = Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: 0.0,
            alpha: 0.0,
            hue: 0.0,
            saved_velocity: None,
        };
        particle.reset(rng, bounds, config);
        particle
    }

    /// Redraw every attribute from the reset distribution.
    ///
    /// Position is uniform over the viewport (not the margin), each velocity
    /// component uniform in `±speed/2`. A pending saved velocity is dropped.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &Bounds, config: &FieldConfig) {
        let half_speed = config.speed / 2.0;
        let velocity_range = SampleRange::new(-half_speed, half_speed);

        self.position = Vec2::new(
            sample(rng, SampleRange::new(0.0, bounds.width)),
            sample(rng, SampleRange::new(0.0, bounds.height)),
        );
        self.velocity = Vec2::new(sample(rng, velocity_range), sample(rng, velocity_range));
        self.size = sample(rng, config.size);
        self.alpha = sample(rng, config.alpha);
        self.hue = sample(rng, config.hue);
        self.saved_velocity = None;
    }

    /// Advance one frame. Returns `true` if the particle left the expanded
    /// bounds and was respawned.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &Bounds, config: &FieldConfig) -> bool {
        self.position += self.velocity;
        if bounds.contains(self.position) {
            return false;
        }
        let paused = self.is_paused();
        self.reset(rng, bounds, config);
        if paused {
            self.pause();
        }
        true
    }

    /// Stash the velocity and stop moving. No-op if already paused.
    pub fn pause(&mut self) {
        if self.saved_velocity.is_none() {
            self.saved_velocity = Some(self.velocity);
            self.velocity = Vec2::ZERO;
        }
    }

    /// Restore the stashed velocity, if any.
    pub fn resume(&mut self) {
        if let Some(velocity) = self.saved_velocity.take() {
            self.velocity = velocity;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.saved_velocity.is_some()
    }
}
