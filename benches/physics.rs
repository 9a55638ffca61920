//! Benchmarks for weft cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use weft::*;

fn bench_pattern(c: &mut Criterion, name: &str, pattern: GridPattern) {
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut cloth: Cloth = Cloth::new(ClothConfig { pattern, ..ClothConfig::default() });
            for _ in 0..60 {
                cloth.tick(10.0, 100.0, true, 0.1, 5);
            }
            cloth.particles()[0].position
        });
    });
}

fn bench_cloth_simulation(c: &mut Criterion) {
    bench_pattern(c, "square_60x60_60_ticks", GridPattern::Square);
    bench_pattern(c, "triangle_60x60_60_ticks", GridPattern::Triangle);
    bench_pattern(c, "hexagon_60x60_60_ticks", GridPattern::Hexagon);
}

fn bench_find_nearest(c: &mut Criterion) {
    let cloth: Cloth = Cloth::default();
    let probe = Vec3::new(550.0, 400.0, 200.0);
    c.bench_function("find_nearest_3600_particles", |b| {
        b.iter(|| cloth.find_nearest(probe, 30.0));
    });
}

criterion_group!(benches, bench_cloth_simulation, bench_find_nearest);
criterion_main!(benches);
