// src/callbacks.rs

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::error::{ScalerError, ScalerResult};
use crate::types::{JobStats, ScalingDecision};

/// Trait for sampling the job queue
///
/// Implement this to tell the controller how many jobs are waiting.
/// This allows you to integrate with any queue backend.
#[async_trait]
pub trait JobStatsSource: Send + Sync {
    /// Fetch the current job counts
    ///
    /// # Returns
    /// * `Ok(stats)` - Current total/active/inactive counts
    /// * `Err(error)` - Failed to read the queue; the tick fails and the
    ///   next timer firing tries again
    async fn fetch_job_stats(&self) -> ScalerResult<JobStats>;

    /// Whether this source reads a real queue
    fn is_configured(&self) -> bool {
        true
    }
}

/// Trait for applying a worker target
///
/// Implement this to actually add or remove workers.
/// This is where you integrate with your infrastructure.
#[async_trait]
pub trait ScaleApplier: Send + Sync {
    /// Apply a scaling decision
    ///
    /// # Arguments
    /// * `decision` - The worker target plus the job stats that produced it
    ///
    /// # Returns
    /// * `Ok(true)` - The target was applied
    /// * `Ok(false)` - Applying was skipped (e.g. already at target)
    /// * `Err(error)` - Failed to apply the target
    async fn apply_scale(&self, decision: ScalingDecision) -> ScalerResult<bool>;

    /// Whether this applier reaches real infrastructure
    fn is_configured(&self) -> bool {
        true
    }
}

/// Trait for receiving scaling events
///
/// Implement this to get notified about decisions and failed ticks.
/// Useful for logging, alerting, or metrics.
#[async_trait]
pub trait ScalingObserver: Send + Sync {
    /// Called once a target is computed, before it is applied
    async fn on_scaling_decision(&self, _decision: &ScalingDecision) -> ScalerResult<()> {
        // Default implementation: do nothing
        Ok(())
    }

    /// Called when a tick fails in either collaborator
    async fn on_tick_error(&self, _error: &ScalerError) -> ScalerResult<()> {
        // Default implementation: do nothing
        Ok(())
    }
}

/// Job stats source used when none was supplied
///
/// Reports an empty queue and warns on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredJobStats;

#[async_trait]
impl JobStatsSource for UnconfiguredJobStats {
    async fn fetch_job_stats(&self) -> ScalerResult<JobStats> {
        warn!("no job stats source configured, reporting an empty queue");
        Ok(JobStats::default())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Scale applier used when none was supplied
///
/// Warns with the target it would have applied and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredApplier;

#[async_trait]
impl ScaleApplier for UnconfiguredApplier {
    async fn apply_scale(&self, decision: ScalingDecision) -> ScalerResult<bool> {
        warn!(workers = decision.target, "no scale applier configured, skipping scale");
        Ok(false)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Job stats source backed by an async closure
pub struct FnJobStatsSource<F> {
    fetch: F,
}

#[async_trait]
impl<F, Fut> JobStatsSource for FnJobStatsSource<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ScalerResult<JobStats>> + Send + 'static,
{
    async fn fetch_job_stats(&self) -> ScalerResult<JobStats> {
        (self.fetch)().await
    }
}

/// Scale applier backed by an async closure
pub struct FnScaleApplier<F> {
    apply: F,
}

#[async_trait]
impl<F, Fut> ScaleApplier for FnScaleApplier<F>
where
    F: Fn(ScalingDecision) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ScalerResult<bool>> + Send + 'static,
{
    async fn apply_scale(&self, decision: ScalingDecision) -> ScalerResult<bool> {
        (self.apply)(decision).await
    }
}

/// Wrap an async closure as a [`JobStatsSource`]
pub fn job_stats_fn<F, Fut>(fetch: F) -> Arc<dyn JobStatsSource>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ScalerResult<JobStats>> + Send + 'static,
{
    Arc::new(FnJobStatsSource { fetch })
}

/// Wrap an async closure as a [`ScaleApplier`]
pub fn scale_applier_fn<F, Fut>(apply: F) -> Arc<dyn ScaleApplier>
where
    F: Fn(ScalingDecision) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ScalerResult<bool>> + Send + 'static,
{
    Arc::new(FnScaleApplier { apply })
}

/// Combine all callbacks into a single struct for easier management
#[derive(Clone)]
pub struct ScalerCallbacks {
    pub job_stats: Arc<dyn JobStatsSource>,
    pub scale_applier: Arc<dyn ScaleApplier>,
    pub observers: Vec<Arc<dyn ScalingObserver>>,
}

impl Default for ScalerCallbacks {
    fn default() -> Self {
        Self::new(Arc::new(UnconfiguredJobStats), Arc::new(UnconfiguredApplier))
    }
}

impl ScalerCallbacks {
    /// Create a new callback configuration
    pub fn new(job_stats: Arc<dyn JobStatsSource>, scale_applier: Arc<dyn ScaleApplier>) -> Self {
        Self {
            job_stats,
            scale_applier,
            observers: Vec::new(),
        }
    }

    /// Replace the job stats source
    pub fn with_job_stats(mut self, job_stats: Arc<dyn JobStatsSource>) -> Self {
        self.job_stats = job_stats;
        self
    }

    /// Replace the scale applier
    pub fn with_scale_applier(mut self, scale_applier: Arc<dyn ScaleApplier>) -> Self {
        self.scale_applier = scale_applier;
        self
    }

    /// Add an observer to receive scaling events
    pub fn add_observer(mut self, observer: Arc<dyn ScalingObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}
