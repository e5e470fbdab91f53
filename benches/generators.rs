use criterion::{criterion_group, criterion_main, Criterion};
use perfect_maze::{
    generators,
    grid::WallGrid,
    maze::MazeBuilder,
    units::{Height, Width},
    utils::seeded_rng,
};

fn bench_recursive_backtracker_32(c: &mut Criterion) {
    let mut rng = seeded_rng(32);
    c.bench_function("recursive_backtracker_32", move |b| {
        b.iter(|| {
            let mut g = WallGrid::new(Width(32), Height(32)).unwrap();
            generators::recursive_backtracker(&mut g, &mut rng);
            g
        })
    });
}

fn bench_recursive_backtracker_256(c: &mut Criterion) {
    let mut rng = seeded_rng(256);
    c.bench_function("recursive_backtracker_256", move |b| {
        b.iter(|| {
            let mut g = WallGrid::new(Width(256), Height(256)).unwrap();
            generators::recursive_backtracker(&mut g, &mut rng);
            g
        })
    });
}

fn bench_maze_build_32(c: &mut Criterion) {
    let mut rng = seeded_rng(7);
    let builder = MazeBuilder::new(Width(32), Height(32));
    c.bench_function("maze_build_32", move |b| {
        b.iter(|| builder.build(&mut rng).unwrap())
    });
}

fn bench_grid_data_32(c: &mut Criterion) {
    let maze = MazeBuilder::new(Width(32), Height(32)).build(&mut seeded_rng(1)).unwrap();
    c.bench_function("grid_data_32", move |b| {
        b.iter(|| maze.grid_data())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_32,
    bench_recursive_backtracker_256,
    bench_maze_build_32,
    bench_grid_data_32
);
criterion_main!(benches);
