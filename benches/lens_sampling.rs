// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced::{Point, Size};
use image_rs::{Rgba, RgbaImage};
use magnify_glass::domain::lens::LensShape;
use magnify_glass::magnifier::{sampler, LensSettings, Magnifier, ViewSurface};
use std::hint::black_box;
use std::sync::Arc;

fn test_image() -> RgbaImage {
    RgbaImage::from_fn(1920, 1080, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]))
}

fn sampling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lens_sampling");
    let image = test_image();
    let rect = iced::Rectangle {
        x: 900.0,
        y: 500.0,
        width: 80.0,
        height: 80.0,
    };

    group.bench_function("sample_circle_160px", |b| {
        b.iter(|| black_box(sampler::sample_lens(&image, rect, 160, LensShape::Circle)));
    });

    group.bench_function("sample_square_400px", |b| {
        b.iter(|| black_box(sampler::sample_lens(&image, rect, 400, LensShape::Square)));
    });

    group.finish();
}

fn pointer_tracking_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_tracking");
    let surface =
        ViewSurface::with_pixels(Arc::new(test_image()), Size::new(1920.0, 1080.0)).into_shared();
    let mut magnifier = Magnifier::new(LensSettings::default());
    magnifier
        .attach(&surface)
        .expect("benchmark surface is laid out");
    magnifier.activate(Point::new(960.0, 540.0));

    let mut step = 0.0_f32;
    group.bench_function("move_and_render_frame", |b| {
        b.iter(|| {
            step = (step + 1.0) % 200.0;
            magnifier.on_pointer_move(Point::new(860.0 + step, 540.0));
            black_box(magnifier.on_frame())
        });
    });

    group.finish();
}

criterion_group!(benches, sampling_benchmark, pointer_tracking_benchmark);
criterion_main!(benches);
