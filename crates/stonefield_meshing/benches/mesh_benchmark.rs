//! Benchmark for chunk meshing.
//!
//! Run with: cargo bench --package stonefield_meshing --bench mesh_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stonefield_meshing::{AtlasLayout, Mesher, NeighborGrids};
use stonefield_procedural::{Extent3, NoiseField, NoiseSettings, TileClassifier, TileGrid, TileKind};

fn terrain_grid(seed: i64) -> TileGrid {
    let field = NoiseField::new(NoiseSettings {
        seed,
        ..NoiseSettings::default()
    });
    TileGrid::build(&field.sample_3d(Extent3::new(16, 16, 16)), &TileClassifier::stone(0.5))
}

fn benchmark_noise_chunk(c: &mut Criterion) {
    let mesher = Mesher::new(AtlasLayout::default());
    let grid = terrain_grid(42);

    c.bench_function("mesh_16x16x16_isolated", |b| {
        b.iter(|| black_box(mesher.build_mesh(black_box(&grid), &NeighborGrids::none())));
    });
}

fn benchmark_stitched_chunk(c: &mut Criterion) {
    let mesher = Mesher::new(AtlasLayout::default());
    let grid = terrain_grid(42);
    let left = terrain_grid(1);
    let right = terrain_grid(2);
    let back = terrain_grid(3);
    let front = terrain_grid(4);
    let neighbors = NeighborGrids {
        left: Some(&left),
        right: Some(&right),
        back: Some(&back),
        front: Some(&front),
    };

    c.bench_function("mesh_16x16x16_four_neighbors", |b| {
        b.iter(|| black_box(mesher.build_mesh(black_box(&grid), &neighbors)));
    });
}

fn benchmark_checkerboard_worst_case(c: &mut Criterion) {
    let mesher = Mesher::new(AtlasLayout::default());
    let grid = TileGrid::from_fn(Extent3::new(32, 32, 32), |x, y, z| {
        if (x + y + z) % 2 == 0 {
            TileKind::Stone
        } else {
            TileKind::Empty
        }
    });

    let mut group = c.benchmark_group("worst_case");
    group.sample_size(20);
    group.bench_function("checkerboard_32x32x32", |b| {
        b.iter(|| black_box(mesher.build_mesh(black_box(&grid), &NeighborGrids::none())));
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_noise_chunk,
    benchmark_stitched_chunk,
    benchmark_checkerboard_worst_case,
);

criterion_main!(benches);
