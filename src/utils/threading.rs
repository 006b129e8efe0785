//! # Threading Configuration
//!
//! ## Role
//! Configure rayon thread pools for batch evaluation of columns.
//!
//! Columns are independent, so the natural parallel unit is one column per
//! task with a per-worker [`PrunedWorkspace`](crate::utils::workspace::PrunedWorkspace).
//! Splitting a single step across threads is only worth it for very wide
//! vectors and is controlled by [`ExecPolicy`](crate::model::pruned::ExecPolicy).

use crate::error::{PbTailError, Result};

/// Resolve a requested thread count; `None` or `0` means all cores
pub fn resolve_threads(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    }
}

/// Create a configured thread pool.
pub fn build_thread_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("pbtail-worker-{}", i))
        .build()
        .map_err(|e| PbTailError::config(format!("Failed to create thread pool: {}", e)))
}
