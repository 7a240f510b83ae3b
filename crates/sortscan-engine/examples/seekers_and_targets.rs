//! Seekers and targets: a drifting scene queried once per frame.
//!
//! Demonstrates:
//!   1. Scattering seekers and targets on the XZ plane with random headings
//!   2. Building an EngineConfig and NearestWorld
//!   3. Stepping every frame while the entities move
//!   4. Reading results and per-step metrics
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example seekers_and_targets

use sortscan_core::Point3;
use sortscan_engine::{EngineConfig, NearestWorld};
use sortscan_query::Strategy;
use sortscan_test_utils::Drifters;
use tracing_subscriber::EnvFilter;

// ─── Scene parameters ───────────────────────────────────────────

const SEEKERS: usize = 1_000;
const TARGETS: usize = 1_000;
const WIDTH: f32 = 500.0;
const DEPTH: f32 = 500.0;
const SEED: u64 = 123;
const FRAMES: u64 = 120;
const DT: f32 = 1.0 / 60.0;
const SPEED: f32 = 30.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut seekers = Drifters::scatter(SEED, SEEKERS, WIDTH, DEPTH);
    let mut targets = Drifters::scatter(SEED + 1, TARGETS, WIDTH, DEPTH);

    let mut world = NearestWorld::new(EngineConfig::with_counts(SEEKERS, TARGETS))?;
    println!("{world:?}");

    let mut total_query_us = 0u64;
    for frame in 1..=FRAMES {
        let result = world.step(&seekers, &targets)?;
        total_query_us += result.metrics.query_us;

        if frame % 30 == 0 {
            let mean = mean_distance(seekers.positions(), result.results);
            println!(
                "frame {:>4}: mean nearest distance {:>7.3}, {:>6.1} candidates/seeker, sort {:>5} us, query {:>5} us",
                result.step,
                mean,
                result.metrics.examined_per_seeker(SEEKERS),
                result.metrics.sort_us,
                result.metrics.query_us,
            );
        }

        seekers.advance(DT * SPEED);
        targets.advance(DT * SPEED);
    }
    println!(
        "sort-pruned: {FRAMES} frames, mean query {} us",
        total_query_us / FRAMES
    );

    // Same scene, exhaustive baseline.
    let mut baseline = NearestWorld::new(EngineConfig {
        strategy: Strategy::BruteForce,
        ..EngineConfig::with_counts(SEEKERS, TARGETS)
    })?;
    let pruned = world.step(&seekers, &targets)?.metrics;
    let brute = baseline.step(&seekers, &targets)?.metrics;
    println!(
        "one frame: sort-pruned {} candidates in {} us, brute force {} candidates in {} us",
        pruned.candidates_examined, pruned.total_us, brute.candidates_examined, brute.total_us,
    );

    Ok(())
}

fn mean_distance(seekers: &[Point3], results: &[Option<Point3>]) -> f32 {
    let (sum, n) = seekers
        .iter()
        .zip(results)
        .filter_map(|(s, r)| r.map(|t| s.distance_sq(&t).sqrt()))
        .fold((0.0f32, 0usize), |(sum, n), d| (sum + d, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}
