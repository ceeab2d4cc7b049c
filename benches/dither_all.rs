use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use bench_utils::*;
use errdiffuse::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dither_all");
    let ditherer = ErrorDiffusion::new(ErrorDiffusionType::FloydSteinberg, web_safe::<u8>);

    for count in [1usize, 4, 16] {
        let frames: Vec<_> = (0..count).map(|_| random_rgb(100)).collect();

        group.bench_with_input(BenchmarkId::new("sequential", count), &frames, |b, frames| {
            b.iter_batched_ref(
                || frames.clone(),
                |frames| {
                    for frame in frames.iter_mut() {
                        ditherer.dither(frame).unwrap();
                    }
                    black_box(frames);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("parallel", count), &frames, |b, frames| {
            b.iter_batched_ref(
                || frames.clone(),
                |frames| {
                    ditherer.dither_all(frames).unwrap();
                    black_box(frames);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(dither_all, criterion_benchmark);
criterion_main!(dither_all);
