//! Prometheus export of scaling decisions

use async_trait::async_trait;
use prometheus::{IntCounter, IntGauge, Registry};

use crate::callbacks::ScalingObserver;
use crate::error::{ScalerError, ScalerResult};
use crate::types::ScalingDecision;

/// Observer that mirrors every decision into Prometheus gauges
#[derive(Clone, Debug)]
pub struct PrometheusObserver {
    worker_target: IntGauge,
    jobs_total: IntGauge,
    jobs_active: IntGauge,
    jobs_inactive: IntGauge,
    decisions: IntCounter,
    tick_errors: IntCounter,
}

impl PrometheusObserver {
    /// Create the metrics and register them on `registry`
    pub fn new(registry: &Registry) -> ScalerResult<Self> {
        let observer = Self {
            worker_target: IntGauge::new("redscale_worker_target", "Worker target computed by the last tick")?,
            jobs_total: IntGauge::new("redscale_jobs_total", "Total jobs seen by the last tick")?,
            jobs_active: IntGauge::new("redscale_jobs_active", "Active jobs seen by the last tick")?,
            jobs_inactive: IntGauge::new("redscale_jobs_inactive", "Queued jobs seen by the last tick")?,
            decisions: IntCounter::new("redscale_decisions_total", "Scaling decisions computed")?,
            tick_errors: IntCounter::new("redscale_tick_errors_total", "Ticks that failed in a collaborator")?,
        };

        registry.register(Box::new(observer.worker_target.clone()))?;
        registry.register(Box::new(observer.jobs_total.clone()))?;
        registry.register(Box::new(observer.jobs_active.clone()))?;
        registry.register(Box::new(observer.jobs_inactive.clone()))?;
        registry.register(Box::new(observer.decisions.clone()))?;
        registry.register(Box::new(observer.tick_errors.clone()))?;

        Ok(observer)
    }
}

fn gauge_value(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[async_trait]
impl ScalingObserver for PrometheusObserver {
    async fn on_scaling_decision(&self, decision: &ScalingDecision) -> ScalerResult<()> {
        self.worker_target.set(i64::from(decision.target));
        self.jobs_total.set(gauge_value(decision.stats.total));
        self.jobs_active.set(gauge_value(decision.stats.active));
        self.jobs_inactive.set(gauge_value(decision.stats.inactive));
        self.decisions.inc();
        Ok(())
    }

    async fn on_tick_error(&self, _error: &ScalerError) -> ScalerResult<()> {
        self.tick_errors.inc();
        Ok(())
    }
}
