//! Utility functions for common operations

use crate::types::{JobCount, JobStats};

/// Build JobStats where every job is either active or waiting
pub fn job_stats(active: JobCount, inactive: JobCount) -> JobStats {
    JobStats {
        total: active.saturating_add(inactive),
        active,
        inactive,
    }
}

/// Get current Unix timestamp
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
