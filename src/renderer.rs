//! Frame renderer: background wash, glowing particles, proximity lines.

use glam::Vec2;

use crate::canvas::{Canvas, LineStyle, Paint};
use crate::color::{hsla, RadialGradient, TRANSPARENT};
use crate::config::ConnectionConfig;
use crate::field::ParticleField;
use crate::particle::Particle;
use crate::theme::Theme;

/// The glow gradient extends this many radii past the particle center,
/// though only the inner disc is painted.
const GLOW_SPREAD: f32 = 6.0;

/// Opacity of a connection line at `distance`.
///
/// Falls linearly from `max_alpha` by `falloff` over the threshold and is
/// never negative. At or beyond the threshold no line is drawn, so the
/// opacity is zero there.
pub fn connection_alpha(distance: f32, config: &ConnectionConfig) -> f32 {
    if !(distance < config.threshold) {
        return 0.0;
    }
    (config.max_alpha - (distance / config.threshold) * config.falloff).max(0.0)
}

/// A pair of particles close enough to be joined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Every unordered pair `(i, j)`, `i < j`, closer than `threshold`.
///
/// O(n²); fine for the tens of particles a viewport holds.
pub fn connections(particles: &[Particle], threshold: f32) -> impl Iterator<Item = Connection> + '_ {
    (0..particles.len()).flat_map(move |a| {
        let pa = particles[a].position;
        (a + 1..particles.len()).filter_map(move |b| {
            let distance = pa.distance(particles[b].position);
            (distance < threshold).then_some(Connection { a, b, distance })
        })
    })
}

/// Gradient fill for one particle's glow.
pub fn particle_paint(particle: &Particle) -> Paint {
    let gradient = RadialGradient::new(particle.position, particle.size * GLOW_SPREAD)
        .with_stop(0.0, hsla(particle.hue, 0.90, 0.65, particle.alpha))
        .with_stop(0.3, hsla(particle.hue, 0.85, 0.55, particle.alpha * 0.45))
        .with_stop(1.0, TRANSPARENT);
    Paint::Radial(gradient)
}

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub respawned: usize,
    pub connections: usize,
}

/// Draws one frame of the particle field per call.
///
/// Holds no per-frame state; everything that changes lives in the field.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    connections: ConnectionConfig,
}

impl FrameRenderer {
    pub fn new(connections: ConnectionConfig) -> Self {
        Self { connections }
    }

    pub fn connection_config(&self) -> &ConnectionConfig {
        &self.connections
    }

    /// Render one frame.
    ///
    /// Clears, washes the surface with the theme tint, steps and draws each
    /// particle in turn, then joins every close pair. Lines always land on
    /// top of this frame's particles.
    pub fn render_frame<C>(&self, field: &mut ParticleField, theme: Theme, canvas: &mut C) -> FrameStats
    where
        C: Canvas + ?Sized,
    {
        let (width, height) = field.size();
        let surface = Vec2::new(width as f32, height as f32);

        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, surface, theme.background_tint());

        let respawned = field.step_each(|particle| {
            canvas.fill_circle(particle.position, particle.size, &particle_paint(particle));
        });

        let connections = self.draw_connections(field.particles(), canvas);

        FrameStats {
            particles: field.len(),
            respawned,
            connections,
        }
    }

    fn draw_connections<C>(&self, particles: &[Particle], canvas: &mut C) -> usize
    where
        C: Canvas + ?Sized,
    {
        let mut drawn = 0;
        for Connection { a, b, distance } in connections(particles, self.connections.threshold) {
            let style = LineStyle {
                color: self.connections.color,
                width: self.connections.width,
                opacity: connection_alpha(distance, &self.connections),
            };
            canvas.stroke_line(particles[a].position, particles[b].position, &style);
            drawn += 1;
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::config::FieldConfig;

    fn field_with(positions: &[Vec2]) -> ParticleField {
        let config = FieldConfig {
            seed: Some(3),
            min_particles: positions.len(),
            ..FieldConfig::default()
        };
        // 100x100 keeps the area term at zero
        let mut field = ParticleField::new(config, 100, 100);
        for (particle, &position) in field.particles_mut().iter_mut().zip(positions) {
            particle.position = position;
            particle.velocity = Vec2::ZERO;
        }
        field
    }

    #[test]
    fn test_alpha_at_fifty_px() {
        let config = ConnectionConfig::default();
        let alpha = connection_alpha(50.0, &config);
        assert!((alpha - 0.074_166).abs() < 1e-4, "alpha = {alpha}");
    }

    #[test]
    fn test_alpha_zero_at_and_beyond_threshold() {
        let config = ConnectionConfig::default();
        assert_eq!(connection_alpha(120.0, &config), 0.0);
        assert_eq!(connection_alpha(130.0, &config), 0.0);
        assert_eq!(connection_alpha(f32::NAN, &config), 0.0);
    }

    #[test]
    fn test_alpha_monotonic() {
        let config = ConnectionConfig::default();
        let mut previous = connection_alpha(0.0, &config);
        assert!((previous - 0.12).abs() < 1e-6);
        for step in 1..=130 {
            let alpha = connection_alpha(step as f32, &config);
            assert!(alpha <= previous, "alpha rose at d = {step}");
            assert!(alpha >= 0.0);
            previous = alpha;
        }
    }

    #[test]
    fn test_connections_respect_threshold() {
        let field = field_with(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 40.0),
            Vec2::new(130.0, 0.0),
        ]);
        let found: Vec<Connection> = connections(field.particles(), 120.0).collect();

        assert_eq!(found.len(), 2);
        assert_eq!((found[0].a, found[0].b), (0, 1));
        assert!((found[0].distance - 50.0).abs() < 1e-4);
        // 0 <-> 2 is 130 px apart and never joined
        assert_eq!((found[1].a, found[1].b), (1, 2));
    }

    #[test]
    fn test_frame_order() {
        let mut field = field_with(&[Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)]);
        let mut canvas = RecordingCanvas::new();
        let stats = FrameRenderer::default().render_frame(&mut field, Theme::Glass, &mut canvas);

        assert_eq!(
            stats,
            FrameStats {
                particles: 2,
                respawned: 0,
                connections: 1,
            }
        );

        let commands = canvas.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(
            commands[1],
            DrawCommand::FillRect { color, size, .. }
                if color == Theme::Glass.background_tint() && size == Vec2::new(100.0, 100.0)
        ));
        assert!(matches!(commands[2], DrawCommand::FillCircle { .. }));
        assert!(matches!(commands[3], DrawCommand::FillCircle { .. }));
        assert!(matches!(commands[4], DrawCommand::StrokeLine { .. }));
    }

    #[test]
    fn test_line_style_follows_distance() {
        let mut field = field_with(&[Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0)]);
        let mut canvas = RecordingCanvas::new();
        let renderer = FrameRenderer::default();
        renderer.render_frame(&mut field, Theme::Default, &mut canvas);

        let (from, to, style) = canvas.lines().next().unwrap();
        assert_eq!(from, Vec2::new(0.0, 0.0));
        assert_eq!(to, Vec2::new(50.0, 0.0));
        assert!((style.opacity - 0.074_166).abs() < 1e-4);
        assert_eq!(style.width, 0.6);
        assert_eq!(style.color, renderer.connection_config().color);
    }

    #[test]
    fn test_particles_drawn_with_own_size_and_gradient() {
        let mut field = field_with(&[Vec2::new(40.0, 40.0)]);
        let particle = field.particles()[0].clone();
        let mut canvas = RecordingCanvas::new();
        FrameRenderer::default().render_frame(&mut field, Theme::Default, &mut canvas);

        let (center, radius, paint) = canvas.circles().next().unwrap();
        assert_eq!(center, particle.position);
        assert_eq!(radius, particle.size);
        match paint {
            Paint::Radial(gradient) => {
                assert_eq!(gradient.radius, particle.size * GLOW_SPREAD);
                assert_eq!(gradient.stops().len(), 3);
                assert!((gradient.sample(0.0).w - particle.alpha).abs() < 1e-6);
                assert!((gradient.sample(0.3).w - particle.alpha * 0.45).abs() < 1e-6);
                assert_eq!(gradient.sample(1.0), TRANSPARENT);
            }
            Paint::Solid(_) => panic!("particles use a radial glow"),
        }
    }

    #[test]
    fn test_frame_steps_particles() {
        let mut field = field_with(&[Vec2::new(50.0, 50.0)]);
        field.particles_mut()[0].velocity = Vec2::new(0.5, 0.25);
        let mut canvas = RecordingCanvas::new();
        FrameRenderer::default().render_frame(&mut field, Theme::Default, &mut canvas);

        let (center, _, _) = canvas.circles().next().unwrap();
        assert_eq!(center, Vec2::new(50.5, 50.25));
    }
}
