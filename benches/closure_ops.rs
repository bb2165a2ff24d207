//! Benchmarks for the closure engine's execution strategies.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use reach::{
    generate_simple_digraph, transitive_closure, transitive_closure_parallel, AdjacencyMatrix,
    GraphConfig,
};

/// Worst case for round-to-round information flow: every new pair is
/// discovered by composing a result from an earlier pivot.
fn path(n: usize) -> AdjacencyMatrix {
    let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    AdjacencyMatrix::from_edges(n, &edges)
}

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("transitive_closure");

    for n in [64usize, 128] {
        // A few graph families to avoid overfitting perf intuition to a toy
        // topology: a path, a sparse random digraph, a denser one.
        let sparse = generate_simple_digraph(GraphConfig {
            vertices: n,
            edges: n * 2,
            seed: 123,
        })
        .unwrap();
        let dense = generate_simple_digraph(GraphConfig {
            vertices: n,
            edges: n * (n - 1) / 4,
            seed: 123,
        })
        .unwrap();

        let graphs = [("path", path(n)), ("sparse", sparse), ("dense", dense)];

        for (name, g) in graphs {
            group.bench_with_input(
                BenchmarkId::new(format!("{name}/sequential"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let closed = transitive_closure(black_box(&g));
                        black_box(closed);
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("{name}/parallel"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let closed = transitive_closure_parallel(black_box(&g));
                        black_box(closed);
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_closure);
criterion_main!(benches);
