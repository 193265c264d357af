// src/controller.rs

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::calculator::ideal_worker_target;
use crate::callbacks::ScalerCallbacks;
use crate::error::{ScalerError, ScalerResult};
use crate::types::{JobStats, ScalingConfig, ScalingDecision, Timestamp, WorkerCount};
use crate::utils::current_timestamp;

/// Whether the controller's timer is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed or stopped; ticks only run when called directly
    Idle,
    /// Timer armed, ticking every `scale_interval`
    Running,
}

/// Status information about a scaling controller
#[derive(Debug, Clone)]
pub struct ControllerStatus {
    pub state: ControllerState,
    pub current_worker: WorkerCount,
    pub ticks_started: u64,
    pub ticks_completed: u64,
    pub ticks_failed: u64,
    pub last_tick: Option<Timestamp>,
    pub job_stats_configured: bool,
    pub applier_configured: bool,
}

/// State shared between the controller and the tick tasks it spawns
struct ControllerInner {
    config: ScalingConfig,
    callbacks: ScalerCallbacks,
    // Overlapping ticks may race here; the last write wins.
    current_worker: AtomicU32,
    ticks_started: AtomicU64,
    ticks_completed: AtomicU64,
    ticks_failed: AtomicU64,
    last_tick: AtomicU64,
}

impl ControllerInner {
    async fn current_number_of_jobs(&self) -> ScalerResult<JobStats> {
        self.callbacks.job_stats.fetch_job_stats().await
    }

    async fn tick(&self) -> ScalerResult<bool> {
        self.ticks_started.fetch_add(1, Ordering::Relaxed);

        match self.scale().await {
            Ok(applied) => {
                self.ticks_completed.fetch_add(1, Ordering::Relaxed);
                Ok(applied)
            }
            Err(e) => {
                self.ticks_failed.fetch_add(1, Ordering::Relaxed);

                let notifications = self.callbacks.observers.iter().map(|o| o.on_tick_error(&e));
                for result in join_all(notifications).await {
                    if let Err(err) = result {
                        warn!("Observer error on tick error: {}", err);
                    }
                }

                Err(e)
            }
        }
    }

    async fn scale(&self) -> ScalerResult<bool> {
        let stats = self.current_number_of_jobs().await?;
        let target = ideal_worker_target(stats.total, &self.config);
        let previous = self.current_worker.swap(target, Ordering::SeqCst);

        let decision = ScalingDecision {
            target,
            previous,
            stats,
            timestamp: current_timestamp(),
        };
        self.last_tick.store(decision.timestamp, Ordering::Relaxed);

        info!(
            total = stats.total,
            active = stats.active,
            inactive = stats.inactive,
            workers = target,
            "Total: {}, active/queue: {}/{} => scale to {}",
            stats.total, stats.active, stats.inactive, target
        );

        let notifications = self
            .callbacks
            .observers
            .iter()
            .map(|o| o.on_scaling_decision(&decision));
        for result in join_all(notifications).await {
            if let Err(e) = result {
                warn!("Observer error on scaling decision: {}", e);
            }
        }

        self.callbacks.scale_applier.apply_scale(decision).await
    }
}

/// Periodically samples the job queue and applies the ideal worker target
pub struct ScalingController {
    inner: Arc<ControllerInner>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl ScalingController {
    /// Create a new controller; nothing runs until [`start`](Self::start)
    pub fn new(config: ScalingConfig, callbacks: ScalerCallbacks) -> Self {
        if !callbacks.job_stats.is_configured() {
            warn!("Scaling controller created without a job stats source");
        }
        if !callbacks.scale_applier.is_configured() {
            warn!("Scaling controller created without a scale applier");
        }

        Self {
            inner: Arc::new(ControllerInner {
                config,
                callbacks,
                current_worker: AtomicU32::new(0),
                ticks_started: AtomicU64::new(0),
                ticks_completed: AtomicU64::new(0),
                ticks_failed: AtomicU64::new(0),
                last_tick: AtomicU64::new(0),
            }),
            timer: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ScalingConfig {
        &self.inner.config
    }

    /// The target computed by the most recent tick (0 before the first one)
    pub fn current_worker(&self) -> WorkerCount {
        self.inner.current_worker.load(Ordering::SeqCst)
    }

    /// Ask the job stats source for the current queue counts
    pub async fn current_number_of_jobs(&self) -> ScalerResult<JobStats> {
        self.inner.current_number_of_jobs().await
    }

    /// Run one sample-decide-apply cycle
    ///
    /// Returns what the scale applier returned. Collaborator failures are
    /// returned as-is; nothing is retried.
    pub async fn tick(&self) -> ScalerResult<bool> {
        self.inner.tick().await
    }

    /// Arm the recurring timer
    ///
    /// The first tick fires one `scale_interval` after this call. Each tick
    /// runs as its own task and the timer does not wait for it, so a tick that
    /// outlives the interval overlaps the next one.
    ///
    /// Fails with [`ScalerError::AlreadyRunning`] if the timer is already armed;
    /// the existing timer keeps running.
    pub async fn start(&self) -> ScalerResult<()> {
        let mut timer = self.timer.lock().await;
        if timer.is_some() {
            return Err(ScalerError::AlreadyRunning);
        }

        let period = self.inner.config.scale_interval();
        if period.is_zero() {
            return Err(ScalerError::config("scale interval must be greater than zero"));
        }

        info!(interval_ms = self.inner.config.scale_interval_ms, "Scaling controller starting...");

        let inner = Arc::clone(&self.inner);
        let mut scale_timer = interval_at(Instant::now() + period, period);
        // firings missed during a stall are dropped, not replayed back-to-back
        scale_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        *timer = Some(tokio::spawn(async move {
            loop {
                scale_timer.tick().await;
                debug!("Scale timer fired");

                let inner = Arc::clone(&inner);
                tokio::spawn(async move {
                    if let Err(e) = inner.tick().await {
                        error!("Error during scaling tick: {}", e);
                    }
                });
            }
        }));

        Ok(())
    }

    /// Disarm the recurring timer
    ///
    /// Ticks already in flight run to completion. Returns `false` if the
    /// controller was not running.
    pub async fn stop(&self) -> bool {
        match self.timer.lock().await.take() {
            Some(handle) => {
                handle.abort();
                info!("Scaling controller stopped");
                true
            }
            None => false,
        }
    }

    pub async fn state(&self) -> ControllerState {
        if self.timer.lock().await.is_some() {
            ControllerState::Running
        } else {
            ControllerState::Idle
        }
    }

    /// Get current controller status
    pub async fn status(&self) -> ControllerStatus {
        let last_tick = self.inner.last_tick.load(Ordering::Relaxed);

        ControllerStatus {
            state: self.state().await,
            current_worker: self.current_worker(),
            ticks_started: self.inner.ticks_started.load(Ordering::Relaxed),
            ticks_completed: self.inner.ticks_completed.load(Ordering::Relaxed),
            ticks_failed: self.inner.ticks_failed.load(Ordering::Relaxed),
            last_tick: (last_tick > 0).then_some(last_tick),
            job_stats_configured: self.inner.callbacks.job_stats.is_configured(),
            applier_configured: self.inner.callbacks.scale_applier.is_configured(),
        }
    }
}

impl Drop for ScalingController {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}
