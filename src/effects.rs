//! Cursor- and scroll-driven layer effects.
//!
//! None of these touch the particle system. Each is a small transform
//! computed from the cursor position, the scroll offset, or an element's
//! visible fraction.

use glam::Vec2;

use crate::config::ParallaxConfig;

/// Pixels of travel at full cursor deflection and depth 1.0.
const PARALLAX_RANGE: f32 = 50.0;
/// Scroll parallax moves against the scroll direction at half rate.
const SCROLL_FACTOR: f32 = -0.5;

/// Parse a depth attribute, falling back to the default when missing or
/// not a finite number.
pub fn parse_depth(raw: Option<&str>) -> f32 {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|depth| depth.is_finite() && *depth != 0.0)
        .unwrap_or(ParallaxConfig::DEFAULT_DEPTH)
}

/// Map a cursor position to [-1, 1] on each axis, 0 at the viewport center.
pub fn normalized_cursor(cursor: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    (cursor / viewport - Vec2::splat(0.5)) * 2.0
}

/// Vertical layer offset for a scroll position.
pub fn scroll_offset(scroll: f32, depth: f32) -> f32 {
    scroll * depth * SCROLL_FACTOR
}

/// Smoothed cursor parallax.
///
/// The cursor sets a target; every frame the current value eases a fixed
/// fraction of the remaining distance toward it.
#[derive(Debug, Clone)]
pub struct Parallax {
    config: ParallaxConfig,
    target: Vec2,
    current: Vec2,
    scroll: f32,
    /// Largest reachable scroll position.
    scroll_extent: f32,
}

impl Parallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            scroll: 0.0,
            scroll_extent: f32::INFINITY,
        }
    }

    pub fn set_cursor(&mut self, cursor: Vec2, viewport: Vec2) {
        self.target = normalized_cursor(cursor, viewport);
    }

    /// Add a scroll delta (pixels, positive = content moves up). The
    /// position stays within `[0, scroll_extent]`.
    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll = (self.scroll + delta).clamp(0.0, self.scroll_extent);
        }
    }

    /// Cap the scroll position, e.g. at the viewport height.
    pub fn set_scroll_extent(&mut self, extent: f32) {
        self.scroll_extent = extent.max(0.0);
        self.scroll = self.scroll.min(self.scroll_extent);
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Ease one frame toward the target.
    pub fn advance(&mut self) {
        self.current += (self.target - self.current) * self.config.speed;
    }

    /// Cursor-only translation for the layer.
    pub fn cursor_offset(&self) -> Vec2 {
        self.current * self.config.depth * PARALLAX_RANGE
    }

    /// Cursor translation plus scroll parallax.
    pub fn offset(&self) -> Vec2 {
        self.cursor_offset() + Vec2::new(0.0, scroll_offset(self.scroll, self.config.depth))
    }
}

/// Axis-aligned element rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let rel = point - self.origin;
        rel.x >= 0.0 && rel.y >= 0.0 && rel.x <= self.size.x && rel.y <= self.size.y
    }
}

/// 3D tilt pose for an element under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Degrees around the horizontal axis.
    pub rotate_x: f32,
    /// Degrees around the vertical axis.
    pub rotate_y: f32,
    pub translate_z: f32,
    pub perspective: f32,
    pub shadow_offset: f32,
    pub shadow_blur: f32,
}

impl Tilt {
    const MAX_ROTATE_Y: f32 = 18.0;
    const MAX_ROTATE_X: f32 = 10.0;
    const LIFT: f32 = 4.0;
    const PERSPECTIVE: f32 = 1000.0;
    const BASE_BLUR: f32 = 20.0;

    /// Pose for a cursor over `rect`; `None` for an empty rect.
    pub fn from_cursor(cursor: Vec2, rect: &Rect) -> Option<Self> {
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return None;
        }
        let p = (cursor - rect.origin) / rect.size;
        let rotate_y = (p.x - 0.5) * Self::MAX_ROTATE_Y;
        let rotate_x = (0.5 - p.y) * Self::MAX_ROTATE_X;
        Some(Self {
            rotate_x,
            rotate_y,
            translate_z: Self::LIFT,
            perspective: Self::PERSPECTIVE,
            shadow_offset: rotate_x.abs() * 0.9,
            shadow_blur: Self::BASE_BLUR + rotate_y.abs(),
        })
    }

    /// Pose after the cursor leaves: no transform at all.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// One-shot visibility latch for fade-in elements.
#[derive(Debug, Clone)]
pub struct Reveal {
    threshold: f32,
    visible: Vec<bool>,
}

impl Reveal {
    /// Fraction of an element that must be on screen before it appears.
    pub const DEFAULT_THRESHOLD: f32 = 0.12;

    pub fn new(elements: usize) -> Self {
        Self::with_threshold(elements, Self::DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(elements: usize, threshold: f32) -> Self {
        Self {
            threshold,
            visible: vec![false; elements],
        }
    }

    /// Report an element's current intersection ratio. Returns `true` only
    /// on the observation that reveals it; revealed elements stay revealed.
    pub fn observe(&mut self, element: usize, ratio: f32) -> bool {
        match self.visible.get_mut(element) {
            Some(visible) if !*visible && ratio >= self.threshold && ratio > 0.0 => {
                *visible = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self, element: usize) -> bool {
        self.visible.get(element).copied().unwrap_or(false)
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.visible.iter().filter(|v| !**v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depth_fallback() {
        assert_eq!(parse_depth(Some("0.1")), 0.1);
        assert_eq!(parse_depth(Some(" 0.2 ")), 0.2);
        assert_eq!(parse_depth(Some("deep")), 0.03);
        assert_eq!(parse_depth(Some("NaN")), 0.03);
        assert_eq!(parse_depth(Some("0")), 0.03);
        assert_eq!(parse_depth(None), 0.03);
    }

    #[test]
    fn test_normalized_cursor() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(normalized_cursor(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(normalized_cursor(Vec2::ZERO, viewport), Vec2::new(-1.0, -1.0));
        assert_eq!(normalized_cursor(viewport, viewport), Vec2::ONE);
        assert_eq!(normalized_cursor(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_parallax_eases_toward_cursor() {
        let mut parallax = Parallax::new(ParallaxConfig::default());
        parallax.set_cursor(Vec2::new(800.0, 300.0), Vec2::new(800.0, 600.0));

        parallax.advance();
        assert!((parallax.cursor_offset().x - 0.05 * 0.03 * 50.0).abs() < 1e-6);
        assert_eq!(parallax.cursor_offset().y, 0.0);

        for _ in 0..1000 {
            parallax.advance();
        }
        // converges on full deflection: 1.0 * depth * 50
        assert!((parallax.cursor_offset().x - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_parallax() {
        assert!((scroll_offset(100.0, 0.03) + 1.5).abs() < 1e-6);

        let mut parallax = Parallax::new(ParallaxConfig::default());
        parallax.scroll_by(60.0);
        parallax.scroll_by(40.0);
        assert_eq!(parallax.scroll(), 100.0);
        assert!((parallax.offset().y + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_stays_within_extent() {
        let mut parallax = Parallax::new(ParallaxConfig::default());
        parallax.scroll_by(-250.0);
        assert_eq!(parallax.scroll(), 0.0);
        assert_eq!(parallax.offset().y, 0.0);

        parallax.set_scroll_extent(600.0);
        for _ in 0..100 {
            parallax.scroll_by(40.0);
        }
        assert_eq!(parallax.scroll(), 600.0);

        // shrinking the extent pulls the position back in
        parallax.set_scroll_extent(300.0);
        assert_eq!(parallax.scroll(), 300.0);

        parallax.scroll_by(f32::NAN);
        assert_eq!(parallax.scroll(), 300.0);
    }

    #[test]
    fn test_tilt_corners() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);

        let center = Tilt::from_cursor(Vec2::new(200.0, 150.0), &rect).unwrap();
        assert_eq!(center.rotate_x, 0.0);
        assert_eq!(center.rotate_y, 0.0);
        assert_eq!(center.shadow_blur, 20.0);
        assert_eq!(center.translate_z, 4.0);

        let top_right = Tilt::from_cursor(Vec2::new(300.0, 100.0), &rect).unwrap();
        assert_eq!(top_right.rotate_y, 9.0);
        assert_eq!(top_right.rotate_x, 5.0);
        assert!((top_right.shadow_offset - 4.5).abs() < 1e-6);
        assert_eq!(top_right.shadow_blur, 29.0);

        assert!(Tilt::from_cursor(Vec2::ZERO, &Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
        assert!(Tilt::identity().is_identity());
        assert!(rect.contains(Vec2::new(150.0, 150.0)));
        assert!(!rect.contains(Vec2::new(50.0, 150.0)));
    }

    #[test]
    fn test_reveal_latches_once() {
        let mut reveal = Reveal::new(2);
        assert_eq!(reveal.pending(), 2);

        assert!(!reveal.observe(0, 0.05));
        assert!(reveal.observe(0, 0.12));
        assert!(!reveal.observe(0, 0.9));
        assert!(reveal.is_visible(0));

        // leaving the viewport does not hide it again
        assert!(!reveal.observe(0, 0.0));
        assert!(reveal.is_visible(0));

        assert!(!reveal.observe(5, 1.0));
        assert_eq!(reveal.pending(), 1);
    }
}
