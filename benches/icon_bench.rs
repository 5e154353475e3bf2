#![deny(warnings)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stash_icon::*;
use std::hint::black_box;

const SIZES: [usize; 3] = [48, 192, 1024];

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for size in SIZES {
        group
            .throughput(Throughput::Elements((size * size) as u64))
            .bench_with_input(BenchmarkId::from_parameter(size), &size, |b, size| {
                b.iter(|| render_icon(black_box(*size)))
            });
    }
    group.finish();
}

fn encode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.sample_size(10);
    for size in SIZES {
        let img = render_icon(size).expect("failed to render icon");
        group
            .throughput(Throughput::Bytes(img.data().len() as u64))
            .bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
                b.iter(|| encode(black_box(img)))
            });
    }
    group.finish();
}

criterion_group!(benches, render_benchmark, encode_benchmark);
criterion_main!(benches);
