// demos/basic_usage.rs
//! Basic usage example showing a scaling controller end to end
//!
//! This example demonstrates:
//! - Configuring the worker target rules
//! - Plugging in a job stats source and a scale applier as closures
//! - Letting the controller tick on its own for a few intervals
//!
//! Run with: cargo run --example basic_usage

use redscale::{
    job_stats_fn, scale_applier_fn, JobStats, ScalerCallbacks, ScalerResult, ScalingConfig,
    ScalingController,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ScalerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ScalingConfig::builder()
        .worker_to_job_ratio(0.5)
        .cpu_per_machine(16)
        .fix_used_cpu(6)
        .min_worker(8)
        .max_worker(2000)
        .scale_interval(Duration::from_secs(1))
        .build();

    // In a real application these would read your queue and call your orchestrator
    let callbacks = ScalerCallbacks::new(
        job_stats_fn(|| async { Ok(JobStats::new(11, 5, 6)) }),
        scale_applier_fn(|decision| async move {
            println!(
                "🚀 scaling to {} workers ({:?}, {} jobs queued)",
                decision.target, decision.direction(), decision.stats.inactive
            );
            Ok(true)
        }),
    );

    let controller = ScalingController::new(config, callbacks);
    controller.start().await?;

    tokio::time::sleep(Duration::from_millis(3500)).await;

    controller.stop().await;
    let status = controller.status().await;
    println!(
        "📊 {} ticks, current target {} workers",
        status.ticks_completed, status.current_worker
    );

    Ok(())
}
