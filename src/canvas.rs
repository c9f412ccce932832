//! 2D drawing surface abstraction.
//!
//! The renderer talks to a [`Canvas`] only through a handful of raster
//! primitives. [`RecordingCanvas`] keeps them as an ordered display list;
//! the GPU backend in `gpu::GpuCanvas` tessellates them into triangles.

use glam::{Vec2, Vec4};

use crate::color::RadialGradient;

/// How a filled shape is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Vec4),
    Radial(RadialGradient),
}

impl Paint {
    /// Color at `point`, for paints that vary across the shape.
    pub fn color_at(&self, point: Vec2) -> Vec4 {
        match self {
            Paint::Solid(color) => *color,
            Paint::Radial(gradient) => gradient.sample_at_distance(point.distance(gradient.center)),
        }
    }
}

/// Stroke parameters for a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Vec4,
    /// Width in pixels.
    pub width: f32,
    /// Multiplied into the color's alpha (the canvas "global alpha").
    pub opacity: f32,
}

impl LineStyle {
    /// Effective color after applying `opacity`.
    pub fn resolved_color(&self) -> Vec4 {
        let mut color = self.color;
        color.w *= self.opacity;
        color
    }
}

/// A raster surface the frame renderer draws into.
pub trait Canvas {
    /// Erase the whole surface.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &LineStyle);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Vec4,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        style: LineStyle,
    },
}

/// Canvas that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, &Paint)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
            } => Some((*center, *radius, paint)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &LineStyle)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokeLine { from, to, style } => Some((*from, *to, style)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &LineStyle) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            style: *style,
        });
    }
}
