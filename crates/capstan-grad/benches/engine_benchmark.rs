// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use capstan_grad::engine::GradientSearchEngine;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Separable distance objective: each byte is pulled toward a target
/// derived from its coordinate index.
fn distance_objective(x: &[u64]) -> u64 {
    x.iter()
        .enumerate()
        .map(|(i, w)| {
            let target = ((i as i64) * 37 + 11) & 0xFF;
            ((w & 0xFF) as i64 - target).unsigned_abs()
        })
        .sum()
}

/// Starting vector with deterministic, non-trivial low bytes and high bits
/// set so byte-lane preservation is exercised on every mutation.
fn starting_vector(n: usize) -> Vec<u64> {
    (0..n)
        .map(|i| 0xA5A5_0000_0000_0000u64 | (((i as u64) * 101 + 7) & 0xFF))
        .collect()
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize_distance");

    for n in [1usize, 4, 16, 64] {
        let x0 = starting_vector(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &x0, |b, x0| {
            let mut engine = GradientSearchEngine::preallocated(x0.len());
            let mut out = vec![0u64; x0.len()];
            b.iter(|| {
                let mut objective = |x: &[u64]| distance_objective(x);
                let outcome = engine.minimize(&mut objective, black_box(x0), &mut out);
                black_box(outcome.objective_value())
            });
        });
    }

    group.finish();
}

fn bench_descend_once(c: &mut Criterion) {
    let mut group = c.benchmark_group("descend_once_distance");

    for n in [4usize, 64] {
        let x0 = starting_vector(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &x0, |b, x0| {
            let mut engine = GradientSearchEngine::preallocated(x0.len());
            let mut out = vec![0u64; x0.len()];
            b.iter(|| {
                let mut objective = |x: &[u64]| distance_objective(x);
                black_box(engine.descend_once(&mut objective, black_box(x0), &mut out))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_minimize, bench_descend_once);
criterion_main!(benches);
