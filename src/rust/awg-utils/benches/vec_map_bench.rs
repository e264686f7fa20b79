// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use awg_utils::VecMap;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

// Step tables hold at most 32 entries, inserted in arbitrary order.
fn shuffled_keys(n: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..n).map(move |i| ((i * 13) % n, i))
}

macro_rules! make_benchmark_for_container {
    ($container:ident, $group:expr, $size:expr) => {
        $group.bench_with_input(
            BenchmarkId::new(stringify!($container), $size),
            &$size,
            |b, &size| {
                b.iter(|| {
                    let map: $container<_, _> = shuffled_keys(size).collect();
                    for (k, v) in map.iter() {
                        black_box((k, v));
                    }
                });
            },
        );
    };
}

fn bench_build_and_iterate(c: &mut Criterion) {
    let sizes = [8u32, 16, 32];

    let mut group = c.benchmark_group("build_and_iterate");

    for &size in &sizes {
        make_benchmark_for_container!(VecMap, group, size);
        make_benchmark_for_container!(BTreeMap, group, size);
    }

    group.finish();
}

criterion_group!(benches, bench_build_and_iterate);
criterion_main!(benches);
