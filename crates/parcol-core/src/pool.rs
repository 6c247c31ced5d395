//! Bounded, order-preserving parallel map on rayon.
//!
//! The pool itself is rayon's; this module only sizes it and relies on the
//! indexed collect so results come back in input order no matter which
//! worker finishes first.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::CoreError;
use crate::utils;

/// Worker count used when the caller does not pick one.
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

fn build_pool(workers: usize) -> Result<rayon::ThreadPool, CoreError> {
    if workers == 0 {
        return Err(CoreError::Pool {
            workers,
            source: "worker count must be at least 1".to_string(),
        });
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| CoreError::Pool { workers, source: e.to_string() })
}

/// Parallel map over exactly `workers` threads, results in input order.
pub fn parallel_map_bounded<I, O, F>(items: Vec<I>, workers: usize, f: F) -> Result<Vec<O>, CoreError>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Send + Sync,
{
    let pool = build_pool(workers)?;
    utils::log(&format!("pool: {} workers over {} items", workers, items.len()));
    Ok(pool.install(|| items.into_par_iter().map(f).collect()))
}

/// Same as [`parallel_map_bounded`], bumping `progress` once per finished item.
pub fn parallel_map_with_progress<I, O, F>(
    items: Vec<I>,
    workers: usize,
    f: F,
    progress: &AtomicUsize,
) -> Result<Vec<O>, CoreError>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Send + Sync,
{
    let pool = build_pool(workers)?;
    Ok(pool.install(|| {
        items
            .into_par_iter()
            .map(|item| {
                let result = f(item);
                progress.fetch_add(1, Ordering::Relaxed);
                result
            })
            .collect()
    }))
}
