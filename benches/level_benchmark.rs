// benches/level_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sector_engine::demo_level::create_demo_level;
use sector_engine::engine_lib::{resolve_move, Level, Sector};
use sector_engine::rendering_lib::{render_level, FrameGeometry};
use rand::Rng;

const NUM_BENCH_POINTS: usize = 256;

/// A row of box rooms for scaling the per-frame cost.
fn create_grid_level(rooms: u32) -> Level {
    let sectors = (0..rooms)
        .map(|i| {
            let x = (i % 16) as f32 * 4.0;
            let z = (i / 16) as f32 * 4.0;
            Sector::rectangle(i as i32, i * 4, [x, z], [x + 4.0, z + 4.0], 0.0, 3.0)
        })
        .collect();
    Level::new("grid", "<bench>", sectors)
}

fn random_points(rng: &mut impl Rng, min: (f32, f32), max: (f32, f32)) -> Vec<(f32, f32)> {
    (0..NUM_BENCH_POINTS)
        .map(|_| (rng.gen_range(min.0..max.0), rng.gen_range(min.1..max.1)))
        .collect()
}

fn spatial_benchmark_fn(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let demo = create_demo_level();
    let grid = create_grid_level(256);
    let demo_points = random_points(&mut rng, (-5.0, -6.0), (19.0, 6.0));
    let grid_points = random_points(&mut rng, (0.0, 0.0), (64.0, 64.0));

    let mut group = c.benchmark_group("SpatialQueries");

    group.bench_function("find_containing_sector_demo", |b| {
        let mut point_iter = demo_points.iter().cycle();
        b.iter(|| {
            let &(x, z) = point_iter.next().unwrap();
            demo.find_containing_sector(black_box(x), black_box(z)).map(|s| s.id)
        })
    });

    group.bench_function("find_containing_sector_256_rooms", |b| {
        let mut point_iter = grid_points.iter().cycle();
        b.iter(|| {
            let &(x, z) = point_iter.next().unwrap();
            grid.find_containing_sector(black_box(x), black_box(z)).map(|s| s.id)
        })
    });

    group.bench_function("resolve_move_demo", |b| {
        let mut point_iter = demo_points.iter().cycle();
        b.iter(|| {
            let &(x, z) = point_iter.next().unwrap();
            resolve_move(&demo, black_box(x), black_box(z), black_box(0.0), black_box(0.0))
        })
    });
    group.finish();
}

fn mesher_benchmark_fn(c: &mut Criterion) {
    let demo = create_demo_level();
    let grid = create_grid_level(256);

    let mut group = c.benchmark_group("LevelMeshing");

    group.bench_function("render_level_demo", |b| {
        let mut geometry = FrameGeometry::with_capacity(60_000);
        b.iter(|| {
            render_level(black_box(&demo), &mut geometry);
            geometry.len()
        })
    });

    group.bench_function("render_level_256_rooms", |b| {
        let mut geometry = FrameGeometry::with_capacity(60_000);
        b.iter(|| {
            render_level(black_box(&grid), &mut geometry);
            geometry.len()
        })
    });
    group.finish();
}

criterion_group!(benches, spatial_benchmark_fn, mesher_benchmark_fn);
criterion_main!(benches);
