//! Benchmarks for the CPU side of a frame.
//!
//! The pairwise connection pass is O(n²) and dominates; these track how it
//! scales with viewport size.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driftfield::gpu::GpuCanvas;
use driftfield::prelude::*;

const VIEWPORTS: [(u32, u32); 4] = [(900, 600), (1920, 1080), (3840, 2160), (7680, 4320)];

fn seeded(width: u32, height: u32) -> ParticleField {
    let config = FieldConfig {
        seed: Some(1),
        ..FieldConfig::default()
    };
    ParticleField::new(config, width, height)
}

fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("connections");
    let threshold = ConnectionConfig::default().threshold;

    for (width, height) in VIEWPORTS {
        let field = seeded(width, height);
        group.bench_with_input(
            BenchmarkId::from_parameter(field.len()),
            &field,
            |b, field| b.iter(|| driftfield::connections(black_box(field.particles()), threshold).count()),
        );
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let renderer = FrameRenderer::default();

    for (width, height) in VIEWPORTS {
        let mut field = seeded(width, height);
        let mut canvas = RecordingCanvas::new();
        group.bench_function(BenchmarkId::new("recording", format!("{width}x{height}")), |b| {
            b.iter(|| {
                canvas.reset();
                black_box(renderer.render_frame(&mut field, Theme::Default, &mut canvas))
            })
        });

        let mut field = seeded(width, height);
        let mut canvas = GpuCanvas::new(Vec4::ZERO);
        group.bench_function(BenchmarkId::new("tessellate", format!("{width}x{height}")), |b| {
            b.iter(|| black_box(renderer.render_frame(&mut field, Theme::Default, &mut canvas)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_connections, bench_render_frame);
criterion_main!(benches);
