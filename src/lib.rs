//! # RedScale - Job Queue Worker Autoscaler
//!
//! RedScale decides how many worker processes a job queue needs and hands
//! that number to your infrastructure on a fixed cadence. It does not talk to
//! any queue or orchestrator itself: you plug in a [`JobStatsSource`] that
//! reads the backlog and a [`ScaleApplier`] that provisions workers.
//!
//! ## 📊 Architecture Overview
//!
//! ```text
//!            every scale_interval
//!   ┌──────────────────────────────────┐
//!   │        ScalingController         │
//!   │                                  │
//!   │  tick ─► fetch_job_stats         │──► JobStatsSource (your queue)
//!   │       ─► ideal_worker_target     │
//!   │       ─► observers               │──► ScalingObserver (logs, metrics)
//!   │       ─► apply_scale             │──► ScaleApplier (your infrastructure)
//!   └──────────────────────────────────┘
//! ```
//!
//! ## 🎯 Worker Target
//!
//! The target follows the backlog proportionally, rounded up to whole
//! machines, minus slots reserved for co-located services. It never drops
//! below `min_worker`, jumps straight to `boost_min_worker` as soon as it
//! rises above the minimum, and is capped at `max_worker`. See
//! [`calculator`] for the exact order of the rules.
//!
//! ## 🎛️ Usage
//!
//! ```rust,no_run
//! use redscale::{
//!     job_stats_fn, scale_applier_fn, JobStats, ScalerCallbacks, ScalingConfig,
//!     ScalingController,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> redscale::ScalerResult<()> {
//!     let config = ScalingConfig::builder()
//!         .worker_to_job_ratio(0.5)
//!         .cpu_per_machine(16)
//!         .boost_min_worker(160)
//!         .min_worker(16)
//!         .max_worker(2000)
//!         .scale_interval(Duration::from_secs(5))
//!         .build();
//!
//!     let callbacks = ScalerCallbacks::new(
//!         job_stats_fn(|| async { Ok(JobStats::new(400, 150, 250)) }),
//!         scale_applier_fn(|decision| async move {
//!             println!("scaling to {}", decision.target);
//!             Ok(true)
//!         }),
//!     );
//!
//!     let controller = ScalingController::new(config, callbacks);
//!     controller.start().await?;
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     controller.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `config-toml` / `config-yaml`: load [`ScalingConfig`] from TOML or YAML
//! - `prometheus-metrics`: [`PrometheusObserver`](metrics::PrometheusObserver)
//!   exporting targets and job counts
//! - `full`: everything above

pub mod error;
pub mod utils;
pub mod types;
pub mod calculator;
pub mod callbacks;
pub mod config;
pub mod controller;
#[cfg(feature = "prometheus-metrics")]
pub mod metrics;

// Re-export common types for convenience
pub use types::{
    JobCount, JobStats, ScaleDirection, ScalingConfig, ScalingConfigBuilder, ScalingDecision,
    Timestamp, WorkerCount,
};

pub use error::{ScalerError, ScalerResult};

pub use calculator::{ceil_to_nearest, ideal_worker_target};

pub use callbacks::{
    job_stats_fn, scale_applier_fn, JobStatsSource, ScaleApplier, ScalerCallbacks,
    ScalingObserver, UnconfiguredApplier, UnconfiguredJobStats,
};

pub use controller::{ControllerState, ControllerStatus, ScalingController};

#[cfg(feature = "prometheus-metrics")]
pub use metrics::PrometheusObserver;
