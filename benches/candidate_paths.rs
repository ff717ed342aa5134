use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qpo::{candidate_paths, has_property, oracle_candidate_paths, LabeledGraph};

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_paths");

    for n in [6, 7, 8] {
        let graph = LabeledGraph::complete(n);
        group.bench_with_input(BenchmarkId::new("pruned_dfs", n), &graph, |b, g| {
            b.iter(|| black_box(candidate_paths(g).count()));
        });
        group.bench_with_input(BenchmarkId::new("oracle", n), &graph, |b, g| {
            b.iter(|| black_box(oracle_candidate_paths(g).len()));
        });
    }

    group.finish();
}

fn bench_check(c: &mut Criterion) {
    // K10 holds, so every candidate path is visited.
    let complete = LabeledGraph::complete(10);
    c.bench_function("has_property_k10", |b| {
        b.iter(|| black_box(has_property(&complete).holds()));
    });

    // C12 fails early.
    let cycle = LabeledGraph::cycle(12);
    c.bench_function("has_property_c12", |b| {
        b.iter(|| black_box(has_property(&cycle).holds()));
    });
}

criterion_group!(benches, bench_enumeration, bench_check);
criterion_main!(benches);
