//! The particle field simulator.
//!
//! [`ParticleField`] owns every particle. Its population scales with the
//! viewport area, it advances one tick per frame, and it is rebuilt from
//! scratch whenever the viewport changes size.
//!
//! ```ignore
//! use driftfield::{FieldConfig, ParticleField};
//!
//! let mut field = ParticleField::new(FieldConfig::default(), 900, 600);
//! assert_eq!(field.len(), 36);
//!
//! field.step_each(|particle| println!("{:?}", particle.position));
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::particle::{Bounds, Particle};

/// Collection of drifting particles sized to a viewport.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: Bounds,
    width: u32,
    height: u32,
    paused: bool,
    rng: SmallRng,
}

impl ParticleField {
    /// Build a field for a `width` x `height` viewport.
    ///
    /// Uses `config.seed` when set, entropy otherwise.
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut field = Self {
            bounds: Bounds::new(width, height, config.margin),
            config,
            particles: Vec::new(),
            width,
            height,
            paused: false,
            rng,
        };
        field.rebuild();
        field
    }

    /// Discard every particle and repopulate for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.bounds = Bounds::new(width, height, self.config.margin);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let count = self.config.particle_count(self.width, self.height);
        let Self {
            particles,
            rng,
            bounds,
            config,
            ..
        } = self;

        particles.clear();
        particles.extend((0..count).map(|_| Particle::spawn(&mut *rng, bounds, config)));
        if self.paused {
            self.particles.iter_mut().for_each(Particle::pause);
        }

        tracing::debug!(
            count,
            width = self.width,
            height = self.height,
            paused = self.paused,
            "rebuilt particle field"
        );
    }

    /// Advance every particle one frame, in order.
    ///
    /// Returns how many particles were respawned after leaving the bounds.
    pub fn step(&mut self) -> usize {
        self.step_each(|_| {})
    }

    /// Advance every particle one frame, calling `visit` on each right after
    /// it has moved. The renderer uses this to draw in step order.
    pub fn step_each<F>(&mut self, mut visit: F) -> usize
    where
        F: FnMut(&Particle),
    {
        let mut respawned = 0;
        for particle in &mut self.particles {
            if particle.step(&mut self.rng, &self.bounds, &self.config) {
                respawned += 1;
            }
            visit(particle);
        }
        respawned
    }

    /// Freeze motion, keeping each velocity aside.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.particles.iter_mut().for_each(Particle::pause);
        tracing::info!(count = self.particles.len(), "particle field paused");
    }

    /// Restore the velocities saved by [`pause`](Self::pause).
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.particles.iter_mut().for_each(Particle::resume);
        tracing::info!(count = self.particles.len(), "particle field resumed");
    }

    /// Map the host's "page hidden" signal onto pause/resume.
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.pause();
        } else {
            self.resume();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for tests and scripted scenes.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn seeded(width: u32, height: u32) -> ParticleField {
        let config = FieldConfig {
            seed: Some(7),
            ..FieldConfig::default()
        };
        ParticleField::new(config, width, height)
    }

    #[test]
    fn test_count_scales_with_area() {
        assert_eq!(seeded(900, 600).len(), 36);
        assert_eq!(seeded(0, 0).len(), 30);
        assert_eq!(seeded(3000, 3000).len(), 130);
    }

    #[test]
    fn test_resize_rebuilds() {
        let mut field = seeded(900, 600);
        field.resize(1920, 1080);
        assert_eq!(field.len(), 53);
        assert_eq!(field.size(), (1920, 1080));
        for p in field.particles() {
            assert!(p.position.x < 1920.0 && p.position.y < 1080.0);
        }

        field.resize(320, 200);
        assert_eq!(field.len(), 30);
        for p in field.particles() {
            assert!(p.position.x < 320.0 && p.position.y < 200.0);
        }
    }

    #[test]
    fn test_step_preserves_count() {
        let mut field = seeded(900, 600);
        for _ in 0..500 {
            field.step();
        }
        assert_eq!(field.len(), 36);
        let bounds = *field.bounds();
        for p in field.particles() {
            assert!(bounds.contains(p.position));
        }
    }

    #[test]
    fn test_step_each_visits_in_order_after_moving() {
        let mut field = seeded(900, 600);
        let expected: Vec<Vec2> = field
            .particles()
            .iter()
            .map(|p| p.position + p.velocity)
            .collect();

        let mut visited = Vec::new();
        field.step_each(|p| visited.push(p.position));
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_step_reports_respawns() {
        let mut field = seeded(800, 600);
        field.particles_mut()[0].position = Vec2::new(-25.0, 10.0);
        field.particles_mut()[0].velocity = Vec2::ZERO;
        assert!(field.step() >= 1);
        assert!(field.particles()[0].position.x >= 0.0);
    }

    #[test]
    fn test_pause_then_resume_restores_velocities() {
        let mut field = seeded(900, 600);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();

        field.set_hidden(true);
        assert!(field.is_paused());
        assert!(field.particles().iter().all(|p| p.velocity == Vec2::ZERO));

        field.set_hidden(true);
        field.set_hidden(false);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_pause_freezes_positions() {
        let mut field = seeded(900, 600);
        field.pause();
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        for _ in 0..20 {
            field.step();
        }
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_while_paused_stays_paused() {
        let mut field = seeded(900, 600);
        field.pause();
        field.resize(1200, 900);
        assert!(field.particles().iter().all(|p| p.velocity == Vec2::ZERO));

        field.resume();
        assert!(field.particles().iter().any(|p| p.velocity != Vec2::ZERO));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = seeded(900, 600);
        let b = seeded(900, 600);
        assert_eq!(a.particles(), b.particles());
    }
}
