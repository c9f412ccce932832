//! CPU tessellation of canvas primitives into colored triangles.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::canvas::{Canvas, LineStyle, Paint};

const MIN_CIRCLE_SEGMENTS: usize = 12;
const MAX_CIRCLE_SEGMENTS: usize = 48;

/// One vertex in pixel space with a straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn new(position: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn circle_segments(radius: f32) -> usize {
    ((radius * 4.0).ceil() as usize).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

/// Canvas that builds a triangle list for [`super::GpuState::render`].
///
/// `clear` empties the list; the GPU pass clears the target to `backdrop`
/// before drawing it. Circles and lines are shifted by the layer
/// translation, full-surface rects are not.
#[derive(Debug, Clone)]
pub struct GpuCanvas {
    vertices: Vec<Vertex>,
    backdrop: Vec4,
    translation: Vec2,
}

impl GpuCanvas {
    pub fn new(backdrop: Vec4) -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            backdrop,
            translation: Vec2::ZERO,
        }
    }

    /// Offset applied to particle and line geometry (parallax).
    pub fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn backdrop(&self) -> Vec4 {
        self.backdrop
    }

    fn triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }

    fn quad(&mut self, corners: [Vec2; 4], color: Vec4) {
        let [a, b, c, d] = corners.map(|p| Vertex::new(p, color));
        self.triangle(a, b, c);
        self.triangle(a, c, d);
    }
}

impl Canvas for GpuCanvas {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4) {
        let max = origin + size;
        self.quad(
            [origin, Vec2::new(max.x, origin.y), max, Vec2::new(origin.x, max.y)],
            color,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        // a fan with the paint sampled at the center and on the rim; the
        // rasterizer interpolates in between
        let origin = center + self.translation;
        let inner = Vertex::new(origin, paint.color_at(center));
        let rim_color = paint.color_at(center + Vec2::new(radius, 0.0));
        let segments = circle_segments(radius);

        let points: Vec<Vec2> = (0..=segments)
            .map(|i| origin + Vec2::from_angle(TAU * i as f32 / segments as f32) * radius)
            .collect();
        for pair in points.windows(2) {
            self.triangle(
                inner,
                Vertex::new(pair[0], rim_color),
                Vertex::new(pair[1], rim_color),
            );
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &LineStyle) {
        let direction = to - from;
        let Some(along) = direction.try_normalize() else {
            return;
        };
        let half = along.perp() * (style.width * 0.5);
        let (from, to) = (from + self.translation, to + self.translation);
        self.quad(
            [from - half, to - half, to + half, from + half],
            style.resolved_color(),
        );
    }
}
