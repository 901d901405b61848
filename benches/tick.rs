//! Benchmarks for the per-frame engine passes.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tilefx::prelude::*;

const FRAME_MS: u64 = 16;

fn world() -> TileGrid {
    let mut world = TileGrid::new(400, 300, 8.0);
    world.fill_from_row(290, 1);
    world.set_wind(0.5);
    world
}

/// Engine preloaded with `count` long-lived particles spread over the world.
fn populated(count: usize) -> ParticleEngine {
    let mut engine = ParticleEngine::new(EngineConfig::default().with_seed(42));
    let trajectories = [
        TrajectoryKind::Fall,
        TrajectoryKind::Rise,
        TrajectoryKind::Chaotic,
        TrajectoryKind::LaserLine,
        TrajectoryKind::BallisticCurve,
        TrajectoryKind::Static,
    ];
    for i in 0..count {
        let kind = ParticleKind::DRAWABLE[i % ParticleKind::DRAWABLE.len()];
        let trajectory = trajectories[i % trajectories.len()];
        let position = Vec2::new((i % 3000) as f32, 100.0 + (i / 3000) as f32 * 40.0);
        engine.insert(
            Particle::new(kind, trajectory, position, 0, u64::MAX / 2)
                .with_speed(0.01)
                .with_angular_momentum(1.0)
                .with_scale_oscillation(ScaleOscillation::new(0.5, 1.5, 700)),
        );
    }
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    let world = world();

    for count in [1_000usize, 14_000, 30_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut engine = populated(count);
            let mut now_ms = 0;
            b.iter(|| {
                now_ms += FRAME_MS;
                engine.tick(black_box(now_ms), &world);
            })
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    let camera = Camera::new(Vec2::ZERO, Vec2::new(1920.0, 1080.0));

    group.bench_function("14000", |b| {
        let mut engine = populated(14_000);
        let mut renderer = RecordingRenderer::new(TextureRegistry::placeholder(8));
        b.iter(|| {
            renderer.reset();
            black_box(engine.draw(&camera, &mut renderer))
        })
    });

    group.finish();
}

fn bench_emission(c: &mut Criterion) {
    c.bench_function("rain_burst_120", |b| {
        let mut engine = ParticleEngine::new(EngineConfig::default().with_seed(7));
        let mut cloud = Cloud::rain(Vec2::new(100.0, 0.0), 0);
        for emitter in cloud.emitters_mut() {
            emitter.set_burst_size(120);
            emitter.set_rate_ms(0);
            emitter.set_cadence(Cadence::Fixed);
        }
        engine.register(shared(cloud));
        let mut now_ms = 0;
        b.iter(|| {
            now_ms += FRAME_MS;
            black_box(engine.run_emission(now_ms));
            engine.run_sweep(u64::MAX);
        })
    });
}

criterion_group!(benches, bench_tick, bench_draw, bench_emission);
criterion_main!(benches);
