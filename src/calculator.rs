//! Worker target calculation
//!
//! Maps a job backlog onto a worker count. The steps run in a fixed order:
//!
//! ```text
//! raw    = ceil(jobs * worker_to_job_ratio / cpu_per_machine) * cpu_per_machine
//! target = raw - fix_used_cpu
//! target < min_worker                      => min_worker
//! min_worker < target < boost_min_worker   => boost_min_worker
//! target > max_worker                      => max_worker
//! ```
//!
//! The floor is applied before the boost test and the ceiling after it, so
//! `max_worker` wins even when it sits below `boost_min_worker`.

use crate::types::{JobCount, ScalingConfig, WorkerCount};

/// Round the proportional worker need up to whole machines.
///
/// Workers are provisioned a machine at a time, so a need of 17 workers on
/// 16-slot machines becomes 32.
pub fn ceil_to_nearest(job_count: JobCount, worker_to_job_ratio: f64, cpu_per_machine: u32) -> i64 {
    let machines = (job_count as f64 * worker_to_job_ratio / f64::from(cpu_per_machine)).ceil();
    // float -> int `as` saturates (NaN becomes 0), so a zero cpu_per_machine cannot panic here
    (machines as i64).saturating_mul(i64::from(cpu_per_machine))
}

/// Compute the ideal worker target for `job_count` queued jobs.
///
/// Pure and total: identical inputs always give the same answer and no
/// configuration is rejected. For a config with `max_worker >= min_worker`
/// the result always lies in `[min_worker, max_worker]`.
pub fn ideal_worker_target(job_count: JobCount, config: &ScalingConfig) -> WorkerCount {
    let min_worker = i64::from(config.min_worker);
    let max_worker = i64::from(config.max_worker);
    let boost_min_worker = i64::from(config.boost_min_worker);

    let raw = ceil_to_nearest(job_count, config.worker_to_job_ratio, config.cpu_per_machine);
    let mut target = raw.saturating_sub(i64::from(config.fix_used_cpu));

    if target < min_worker {
        target = min_worker;
    }

    // Demand above the baseline usually means a whole batch is arriving;
    // jump straight to the boost level instead of ramping machine by machine.
    if target > min_worker && target < boost_min_worker {
        target = boost_min_worker;
    }

    if target > max_worker {
        target = max_worker;
    }

    // every branch above leaves target within [0, u32::MAX]
    WorkerCount::try_from(target).unwrap_or(config.max_worker)
}
