//! Ordering and generation benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use recordgen_bench::{chain, fan_out, lattice};
use recordgen_codegen::{Generator, ReferenceGraph, collect_all_schemas, topological_sort};
use std::hint::black_box;

fn benchmark_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for len in [16, 128, 512] {
        let (store, roots) = chain(len);
        group.bench_with_input(BenchmarkId::new("chain", len), &len, |b, _| {
            b.iter(|| ReferenceGraph::build(black_box(&store), black_box(&roots)))
        });
    }

    for width in [16, 128, 512] {
        let (store, roots) = fan_out(width);
        group.bench_with_input(BenchmarkId::new("fan_out", width), &width, |b, _| {
            b.iter(|| ReferenceGraph::build(black_box(&store), black_box(&roots)))
        });
    }

    group.finish();
}

fn benchmark_topological_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological_sort");

    for width in [4, 8, 16] {
        let (store, roots) = lattice(width, 8);
        let Ok(graph) = ReferenceGraph::build(&store, &roots) else {
            continue;
        };
        let Ok(all) = collect_all_schemas(&graph, &roots) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("lattice", width), &width, |b, _| {
            b.iter(|| topological_sort(black_box(&graph), black_box(&all)))
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let (store, roots) = chain(128);
    group.bench_function("chain_128", |b| {
        b.iter(|| Generator::new(black_box(&store)).render(black_box(&roots)))
    });

    let (store, roots) = lattice(8, 8);
    group.bench_function("lattice_8x8", |b| {
        b.iter(|| Generator::new(black_box(&store)).render(black_box(&roots)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_graph_build,
    benchmark_topological_sort,
    benchmark_render,
);
criterion_main!(benches);
