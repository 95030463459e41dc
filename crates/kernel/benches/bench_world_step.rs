use std::hint::black_box;
use std::time::Instant;

use physworld_kernel::{ObjectDescriptor, ObjectKind, ScenarioDescriptor, World};

fn make_scenario(body_count: usize) -> ScenarioDescriptor {
    let side = (body_count as f32).sqrt().ceil() as usize;
    let objects = (0..body_count)
        .map(|i| {
            let kind = match i % 3 {
                0 => ObjectKind::Sphere,
                1 => ObjectKind::Box,
                _ => ObjectKind::Rocket,
            };
            ObjectDescriptor {
                kind,
                mass: 1.0 + i as f32,
                position: [(i % side) as f32 * 3.0, 5.0 + (i % 7) as f32, (i / side) as f32 * 3.0],
                velocity: [0.0; 3],
                size: [0.5, 1.0, 0.5],
            }
        })
        .collect();
    ScenarioDescriptor {
        gravity: 9.81,
        wind: 30.0,
        objects,
        scenario: "bench".into(),
    }
}

fn bench_step(body_count: usize, frames: usize) {
    let mut world = World::build(&make_scenario(body_count)).expect("valid scenario");
    let dt = world.config().fixed_dt;

    let start = Instant::now();
    for _ in 0..frames {
        let _ = black_box(world.step(black_box(dt)));
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames as u32;
    println!(
        "  step ({body_count} bodies, {frames} frames): {per_frame:?}/frame, total {elapsed:?}"
    );
}

fn bench_snapshot(body_count: usize, iterations: usize) {
    let world = World::build(&make_scenario(body_count)).expect("valid scenario");

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(world.snapshot());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  snapshot ({body_count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== World Step Benchmarks ===\n");

    println!("Fixed sub-step (falling, landing, resting):");
    bench_step(10, 6000);
    bench_step(100, 1000);
    bench_step(1000, 100);

    println!("\nSnapshot:");
    bench_snapshot(100, 10000);
    bench_snapshot(1000, 1000);

    println!("\n=== Done ===");
}
