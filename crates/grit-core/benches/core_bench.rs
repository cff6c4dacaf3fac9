//! Criterion benchmarks for grit-core
//!
//! Run with: cargo bench -p grit-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use grit_core::{Distortion, Effect, ProcessContext, ProcessSpec, SmoothedValue};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_smoothed_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("SmoothedValue");

    group.bench_function("ramping", |b| {
        let mut value = SmoothedValue::<f32>::new(0.0);
        value.reset(SAMPLE_RATE, 0.02);
        let mut flip = false;
        b.iter(|| {
            if !value.is_smoothing() {
                flip = !flip;
                value.set_target_value(if flip { 1.0 } else { 0.0 });
            }
            black_box(value.get_next_value())
        });
    });

    group.bench_function("settled", |b| {
        let mut value = SmoothedValue::<f32>::new(0.5);
        value.reset(SAMPLE_RATE, 0.02);
        b.iter(|| black_box(value.get_next_value()));
    });

    group.finish();
}

fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Distortion");

    for &block_size in BLOCK_SIZES {
        let left = generate_test_signal(block_size);
        let right = left.clone();

        group.bench_with_input(
            BenchmarkId::new("stereo_f32", block_size),
            &block_size,
            |b, &size| {
                let mut dist = Distortion::<f32>::new();
                dist.prepare(&ProcessSpec::new(SAMPLE_RATE, size, 2));
                dist.set_drive(12.0);
                dist.set_threshold(0.5);
                let mut out_l = vec![0.0f32; size];
                let mut out_r = vec![0.0f32; size];

                b.iter(|| {
                    let inputs = [left.as_slice(), right.as_slice()];
                    let mut outputs = [out_l.as_mut_slice(), out_r.as_mut_slice()];
                    dist.process(ProcessContext::new(&inputs, &mut outputs));
                    black_box(&outputs);
                });
            },
        );

        let wide: Vec<f64> = left.iter().map(|&s| f64::from(s)).collect();
        group.bench_with_input(
            BenchmarkId::new("mono_f64", block_size),
            &block_size,
            |b, &size| {
                let mut dist = Distortion::<f64>::new();
                dist.prepare(&ProcessSpec::new(SAMPLE_RATE, size, 1));
                dist.set_drive(12.0);
                dist.set_threshold(0.5);
                let mut out = vec![0.0f64; size];

                b.iter(|| {
                    let inputs = [wide.as_slice()];
                    let mut outputs = [out.as_mut_slice()];
                    dist.process(ProcessContext::new(&inputs, &mut outputs));
                    black_box(&outputs);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_smoothed_value, bench_distortion);
criterion_main!(benches);
