use std::{path::Path, sync::Arc, thread, time::Instant};

use ray_stats::{expect, logging::setup_logger, RayStats, StatsSettings};

const ITERATIONS: usize = 5000000;

// Mimics the event pattern of one ray through a shallow BVH
fn trace_fake_ray(stats: &RayStats, i: usize) {
    for depth in 0..4 {
        let is_leaf = depth == 3;
        stats.record_node_visit(is_leaf);
        stats.record_box_test((i + depth) % 3 != 0);
        if is_leaf {
            stats.record_triangle_test(i % 5 == 0);
        }
    }
    stats.record_ray(i % 5 == 0);
}

fn bench_rays(label: &str, stats: &Arc<RayStats>, threads: usize) {
    let per_thread = ITERATIONS / threads;
    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let stats = Arc::clone(stats);
            thread::spawn(move || {
                for i in 0..per_thread {
                    trace_fake_ray(&stats, i);
                }
            })
        })
        .collect();
    for handle in handles {
        expect!(handle.join(), "Bench thread panicked");
    }

    let elapsed_ns = start.elapsed().as_nanos();
    let elapsed_ms = (elapsed_ns as f64) * 1e-6;
    let ns_per_ray = (elapsed_ns as f64) / ((per_thread * threads) as f64);
    println!(
        "{:9} took {:6.1} ms total, {:0.4} ns per ray on {} threads",
        label, elapsed_ms, ns_per_ray, threads
    );
}

fn main() {
    if let Err(why) = setup_logger(log::LevelFilter::Info, None) {
        panic!("{}", why);
    };

    let threads = num_cpus::get();

    let mut disabled = RayStats::new();
    disabled.init(StatsSettings::default());
    let disabled = Arc::new(disabled);
    bench_rays("Disabled", &disabled, threads);

    // Settings can come from a yaml file given as the only argument, env otherwise
    let settings = match std::env::args().nth(1) {
        Some(path) => expect!(
            StatsSettings::load(Path::new(&path)),
            "Failed to load stats settings"
        ),
        None => StatsSettings::from_env(),
    };
    let mut enabled = RayStats::new();
    enabled.init(StatsSettings {
        enabled: true,
        ..settings
    });
    let enabled = Arc::new(enabled);
    bench_rays("Enabled", &enabled, threads);
    bench_rays("Enabled", &enabled, 1);

    // All bench threads have joined so we are the only owner left
    match Arc::try_unwrap(enabled) {
        Ok(mut stats) => stats.cleanup(),
        Err(_) => panic!("Failed to pull RayStats out of its Arc"),
    }
}
