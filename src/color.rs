//! Color helpers and gradient sampling.
//!
//! Colors are straight-alpha RGBA in `Vec4`, components in 0.0-1.0, already
//! sRGB-encoded (the same space CSS color literals live in).

use glam::{Vec2, Vec4};

/// Build a color from 8-bit channels and a 0.0-1.0 alpha.
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Vec4 {
    Vec4::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a,
    )
}

/// Convert HSL plus alpha to RGBA.
///
/// * `h` - hue in degrees (any value, wrapped to 0-360)
/// * `s`, `l` - saturation and lightness in 0.0-1.0
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Vec4 {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec4::new(r + m, g + m, b + m, a)
}

/// Fully transparent black.
pub const TRANSPARENT: Vec4 = Vec4::ZERO;

/// A color at a normalized offset along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Vec4,
}

/// Circular gradient centered on a point, fading outward.
///
/// Offsets are normalized to `radius`: 0.0 is the center, 1.0 the outer
/// ring. Stops must be added in increasing offset order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            stops: Vec::with_capacity(3),
        }
    }

    /// Append a color stop.
    pub fn with_stop(mut self, offset: f32, color: Vec4) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at normalized offset `t`, linearly interpolated between the
    /// surrounding stops and clamped to the first/last stop.
    pub fn sample(&self, t: f32) -> Vec4 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return TRANSPARENT,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        last.color
    }

    /// Color at a pixel distance from the center.
    pub fn sample_at_distance(&self, distance: f32) -> Vec4 {
        if self.radius <= 0.0 {
            return self.sample(1.0);
        }
        self.sample(distance / self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_rgba_channels() {
        let c = rgba(255, 0, 51, 0.5);
        assert!(approx(c, Vec4::new(1.0, 0.0, 0.2, 0.5)));
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(approx(hsla(0.0, 1.0, 0.5, 1.0), Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert!(approx(hsla(120.0, 1.0, 0.5, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)));
        assert!(approx(hsla(240.0, 1.0, 0.5, 0.3), Vec4::new(0.0, 0.0, 1.0, 0.3)));
        assert!(approx(hsla(360.0, 1.0, 0.5, 1.0), hsla(0.0, 1.0, 0.5, 1.0)));
    }

    #[test]
    fn test_hsla_grey_when_unsaturated() {
        let grey = hsla(270.0, 0.0, 0.65, 1.0);
        assert!(approx(grey, Vec4::new(0.65, 0.65, 0.65, 1.0)));
    }

    #[test]
    fn test_gradient_sampling() {
        let white = Vec4::ONE;
        let gradient = RadialGradient::new(Vec2::ZERO, 10.0)
            .with_stop(0.0, white)
            .with_stop(1.0, TRANSPARENT);

        assert!(approx(gradient.sample(-1.0), white));
        assert!(approx(gradient.sample(0.5), Vec4::splat(0.5)));
        assert!(approx(gradient.sample(2.0), TRANSPARENT));
        assert!(approx(gradient.sample_at_distance(2.5), Vec4::splat(0.75)));
    }

    #[test]
    fn test_gradient_middle_stop() {
        let gradient = RadialGradient::new(Vec2::ZERO, 6.0)
            .with_stop(0.0, Vec4::new(1.0, 0.0, 0.0, 1.0))
            .with_stop(0.3, Vec4::new(0.0, 1.0, 0.0, 0.5))
            .with_stop(1.0, TRANSPARENT);

        assert!(approx(gradient.sample(0.3), Vec4::new(0.0, 1.0, 0.0, 0.5)));
        assert!(approx(gradient.sample(0.15), Vec4::new(0.5, 0.5, 0.0, 0.75)));
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let gradient = RadialGradient::new(Vec2::ZERO, 1.0);
        assert_eq!(gradient.sample(0.5), TRANSPARENT);
    }
}
