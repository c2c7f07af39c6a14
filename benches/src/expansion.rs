use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cdict::prelude::*;

/// A sweep over `fields` keys with `width` values each
fn fan_out_sweep(fields: usize, width: i64) -> CDict {
    CDict::dict(
        (0..fields)
            .map(|i| (format!("k{}", i), Field::from(CDict::list(0..width))))
            .collect(),
    )
}

fn labelled(name: &str, width: i64) -> CDict {
    CDict::list((0..width).map(|i| {
        Item::from(
            Fields::new()
                .with(name, i)
                .with("name", Label::new(format!("{}{}", name, i))),
        )
    }))
}

/// Benchmark mapping fan-out throughput
fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for width in [4, 8, 16] {
        let sweep = fan_out_sweep(3, width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &sweep, |b, sweep| {
            b.iter(|| {
                for record in sweep.iter() {
                    black_box(record.ok());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark product iteration with label merging
fn bench_product_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_merge");

    for width in [10, 30, 100] {
        let product = labelled("a", width) * labelled("b", width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &product, |b, product| {
            b.iter(|| {
                for record in product.iter() {
                    black_box(record.ok());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark lockstep zip of aligned streams
fn bench_zip(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip");

    for len in [100, 1_000, 10_000] {
        let zipped =
            labelled("a", len) | CDict::dict(Fields::new().with("b", CDict::list(0..len)));
        group.bench_with_input(BenchmarkId::from_parameter(len), &zipped, |b, zipped| {
            b.iter(|| black_box(zipped.count().ok()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fan_out, bench_product_merge, bench_zip);
criterion_main!(benches);
