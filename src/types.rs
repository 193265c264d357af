// src/types.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of worker processes
pub type WorkerCount = u32;

/// Number of jobs in the queue
pub type JobCount = u64;

/// Unix timestamp in seconds
pub type Timestamp = u64;

/// Snapshot of the job queue taken at the start of a tick
///
/// `active + inactive` is not required to equal `total`; what each count
/// means is up to the job stats source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    /// Jobs the scaler sizes the worker pool against
    pub total: JobCount,
    /// Jobs currently being processed
    pub active: JobCount,
    /// Jobs waiting in the queue
    pub inactive: JobCount,
}

impl JobStats {
    pub fn new(total: JobCount, active: JobCount, inactive: JobCount) -> Self {
        Self {
            total,
            active,
            inactive,
        }
    }
}

/// Direction of a scaling decision relative to the previous target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScaleDirection {
    /// Scale up (add workers)
    Up,
    /// Scale down (remove workers)
    Down,
    /// Keep current worker count
    Maintain,
}

/// The worker target computed by one tick, handed to the scale applier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingDecision {
    /// Ideal number of workers for the sampled backlog
    pub target: WorkerCount,
    /// The controller's current worker target before this tick
    pub previous: WorkerCount,
    /// The job stats this target was computed from
    pub stats: JobStats,
    /// When this decision was made
    pub timestamp: Timestamp,
}

impl ScalingDecision {
    pub fn direction(&self) -> ScaleDirection {
        match self.target.cmp(&self.previous) {
            std::cmp::Ordering::Greater => ScaleDirection::Up,
            std::cmp::Ordering::Less => ScaleDirection::Down,
            std::cmp::Ordering::Equal => ScaleDirection::Maintain,
        }
    }
}

/// Tunable parameters of the scaler
///
/// Set once at construction and never mutated by the controller. Values are
/// not validated on construction; see [`ScalingConfig::validate`] for the
/// opt-in check the file loaders apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Workers needed per queued job (e.g. 0.5 = one worker per two jobs)
    pub worker_to_job_ratio: f64,
    /// Worker slots per machine; targets are rounded up to a multiple of this
    pub cpu_per_machine: u32,
    /// Slots on each machine already taken by co-located services
    pub fix_used_cpu: u32,
    /// Baseline to jump to as soon as demand rises above `min_worker`; 0 disables the boost
    pub boost_min_worker: u32,
    /// Lower bound of the worker target
    pub min_worker: u32,
    /// Upper bound of the worker target
    pub max_worker: u32,
    /// How often the controller ticks (milliseconds)
    pub scale_interval_ms: u64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            worker_to_job_ratio: 1.0,
            cpu_per_machine: 1,
            fix_used_cpu: 0,
            boost_min_worker: 0,
            min_worker: 1,
            max_worker: 6,
            scale_interval_ms: 5000,
        }
    }
}

/// Builder pattern for easy configuration creation
impl ScalingConfig {
    pub fn builder() -> ScalingConfigBuilder {
        ScalingConfigBuilder::new()
    }

    pub fn scale_interval(&self) -> Duration {
        Duration::from_millis(self.scale_interval_ms)
    }
}

/// Builder for creating scaling configurations easily
#[derive(Debug, Default)]
pub struct ScalingConfigBuilder {
    config: ScalingConfig,
}

impl ScalingConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ScalingConfig::default(),
        }
    }

    pub fn worker_to_job_ratio(mut self, ratio: f64) -> Self {
        self.config.worker_to_job_ratio = ratio;
        self
    }

    pub fn cpu_per_machine(mut self, cpus: u32) -> Self {
        self.config.cpu_per_machine = cpus;
        self
    }

    pub fn fix_used_cpu(mut self, cpus: u32) -> Self {
        self.config.fix_used_cpu = cpus;
        self
    }

    pub fn boost_min_worker(mut self, workers: u32) -> Self {
        self.config.boost_min_worker = workers;
        self
    }

    pub fn min_worker(mut self, workers: u32) -> Self {
        self.config.min_worker = workers;
        self
    }

    pub fn max_worker(mut self, workers: u32) -> Self {
        self.config.max_worker = workers;
        self
    }

    pub fn scale_interval(mut self, interval: Duration) -> Self {
        self.config.scale_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn build(self) -> ScalingConfig {
        self.config
    }
}
