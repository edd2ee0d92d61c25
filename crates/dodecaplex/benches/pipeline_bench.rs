//! Criterion benches for orbit generation, solid assembly and the full run.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dodecaplex::api::{
    dodecaplex, dodecaplex_seeds, map_neighbors, partition_cells, run, signed_permutations,
    tetraplex, DistanceIndex, PipelineCfg,
};

fn bench_orbits(c: &mut Criterion) {
    let mut group = c.benchmark_group("orbit");
    for seed in dodecaplex_seeds() {
        group.bench_with_input(BenchmarkId::from_parameter(seed), &seed, |b, s| {
            b.iter(|| signed_permutations(black_box(s.magnitudes), s.even_only))
        });
    }
    group.finish();
}

fn bench_solids(c: &mut Criterion) {
    c.bench_function("solids/dodecaplex", |b| b.iter(|| dodecaplex()));
    c.bench_function("solids/tetraplex", |b| b.iter(|| tetraplex()));

    let verts = dodecaplex().map(|p| p.positions()).unwrap_or_default();
    let centers = tetraplex().map(|p| p.positions()).unwrap_or_default();
    let index = DistanceIndex::default();
    c.bench_function("solids/partition_cells", |b| {
        b.iter(|| partition_cells(black_box(&verts), black_box(&centers), &index))
    });
    c.bench_function("solids/map_neighbors", |b| {
        b.iter(|| map_neighbors(black_box(&centers), &index))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    let cfg = PipelineCfg::default();
    group.bench_function("run", |b| b.iter(|| run(black_box(&cfg))));
    group.finish();
}

criterion_group!(benches, bench_orbits, bench_solids, bench_pipeline);
criterion_main!(benches);
