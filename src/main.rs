//! # Headless stress run
//!
//! Fills a tile world with rain clouds, ember vents and a firing muzzle, then
//! ticks and draws for a number of frames and logs throughput.
//!
//! Run with: `RUST_LOG=info cargo run --release -- [target_particles] [frames]`

use log::info;
use std::time::{Duration, Instant};
use tilefx::prelude::*;

const FRAME_MS: u64 = 16;
const WORLD_WIDTH: u32 = 240;
const WORLD_HEIGHT: u32 = 135;
const TILE_SIZE: f32 = 8.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let target: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(14_000);
    let frames: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_200);

    info!("=== tilefx stress run ===");
    info!("Target particles: {}", target);
    info!("Frames: {} at {} ms", frames, FRAME_MS);

    let mut world = TileGrid::new(WORLD_WIDTH, WORLD_HEIGHT, TILE_SIZE);
    world.fill_from_row(WORLD_HEIGHT - 8, 1);
    world.set_wind(1.0);

    let mut engine = ParticleEngine::new(EngineConfig::default().with_initial_capacity(target * 2));
    let width_px = WORLD_WIDTH as f32 * TILE_SIZE;

    // Wide bursts keep the cloud count manageable.
    let clouds: Vec<_> = (0..(target / 400).max(1))
        .map(|i| {
            let x = (i as f32 + 0.5) * width_px / (target / 400).max(1) as f32;
            let mut cloud = Cloud::rain(Vec2::new(x, 16.0), 0);
            for emitter in cloud.emitters_mut() {
                emitter.set_burst_size(120);
                emitter.set_area_radius(60.0);
            }
            shared(cloud)
        })
        .collect();
    for cloud in &clouds {
        engine.register(cloud.clone());
    }

    let vents: Vec<_> = (0..4)
        .map(|i| {
            let x = (i as f32 + 0.5) * width_px / 4.0;
            shared(Hazard::embers(Vec2::new(x, 1000.0), 0, None))
        })
        .collect();
    for vent in &vents {
        engine.register(vent.clone());
    }

    let muzzle = shared(WeaponMuzzle::sparks(Vec2::new(32.0, 600.0), 0.0, 0));
    engine.register(muzzle.clone());

    let camera = Camera::new(Vec2::ZERO, Vec2::new(width_px, WORLD_HEIGHT as f32 * TILE_SIZE));
    let mut renderer = RecordingRenderer::new(TextureRegistry::placeholder(8));
    let mut clock = SimClock::fixed(FRAME_MS);

    let mut tick_time = Duration::ZERO;
    let mut draw_time = Duration::ZERO;
    let mut peak = 0;

    for frame in 1..=frames {
        let now_ms = clock.advance();

        // Fire a volley twice a second.
        if frame % 30 == 0 {
            muzzle.borrow_mut().fire();
        } else if frame % 30 == 1 {
            muzzle.borrow_mut().cease();
        }
        for cloud in &clouds {
            cloud.borrow_mut().move_by(Vec2::new(0.25, 0.0));
        }

        let start = Instant::now();
        engine.tick(now_ms, &world);
        tick_time += start.elapsed();

        renderer.reset();
        let start = Instant::now();
        engine.draw(&camera, &mut renderer);
        draw_time += start.elapsed();

        peak = peak.max(engine.particle_count());

        if frame % 60 == 0 {
            let stats = engine.stats();
            info!(
                "t={:>6} ms  particles={:>6}  spawned={:>4}  culled={:>4}  drawn={:>6}  batches={}",
                now_ms,
                stats.particles,
                stats.spawned,
                stats.culled,
                renderer.sprite_count(),
                renderer.submissions.len()
            );
        }
    }

    let frames_f = frames.max(1) as f64;
    let avg_tick_ms = tick_time.as_secs_f64() * 1000.0 / frames_f;
    let avg_draw_ms = draw_time.as_secs_f64() * 1000.0 / frames_f;
    info!("Peak particles: {}", peak);
    info!("Average tick: {:.3} ms, average draw: {:.3} ms", avg_tick_ms, avg_draw_ms);
    info!(
        "Frame budget used at 60 fps: {:.1}%",
        (avg_tick_ms + avg_draw_ms) / (1000.0 / 60.0) * 100.0
    );
}
