//! Benchmarks for placement and the per-frame update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neurofield::prelude::*;

fn placed(count: usize) -> (Field, Scene, SmallRandom) {
    let config = FieldConfig::new().with_neuron_count(count).with_seed(1);
    let mut rng = SmallRandom::seeded(1);
    let mut scene = Scene::new();
    let mut field = Field::new(config);
    field
        .on_ready(&Resources::with_defaults(), &mut scene, &mut rng)
        .unwrap();
    (field, scene, rng)
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let resources = Resources::with_defaults();

    for count in [120, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut scene = Scene::new();
                let mut field = Field::new(FieldConfig::new().with_neuron_count(count));
                field
                    .on_ready(&resources, &mut scene, &mut SmallRandom::seeded(1))
                    .unwrap();
                black_box(scene.len())
            })
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for count in [120, 1_000, 10_000] {
        let (mut field, mut scene, mut rng) = placed(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(field.update(16.0, &mut rng, &mut scene)))
        });
    }

    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let neuron = NeuronConfig::default();
    c.bench_function("grid_scatter_10k", |b| {
        let grid = GridLayout::for_count(10_000, 5.0, 5.0);
        let mut rng = SmallRandom::seeded(3);
        b.iter(|| black_box(grid.scatter(0.5, &neuron, &mut rng)))
    });
}

criterion_group!(benches, bench_placement, bench_update, bench_grid);
criterion_main!(benches);
