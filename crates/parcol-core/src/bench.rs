//! Execution strategies and wall-clock comparison over the column workload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::error::CoreError;
use crate::pool;
use crate::utils;
use crate::workload::Workload;

/// Tolerance when comparing means across strategies. The per-column
/// arithmetic is identical everywhere, so runs normally agree exactly.
pub const VALUE_TOLERANCE: f64 = 1e-12;

/// How to drive the per-column workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// One column after another on the calling thread.
    Serial,
    /// Fixed-size worker pool.
    Pool { workers: usize },
}

impl Strategy {
    /// `1` is the serial baseline; any other count is a pool of that size
    /// (`0` is left for the pool layer to reject).
    pub fn with_workers(workers: usize) -> Self {
        if workers == 1 {
            Strategy::Serial
        } else {
            Strategy::Pool { workers }
        }
    }

    pub fn workers(&self) -> usize {
        match self {
            Strategy::Serial => 1,
            Strategy::Pool { workers } => *workers,
        }
    }
}

/// Result of running one strategy over every column.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyRun {
    pub workers: usize,
    pub elapsed_secs: f64,
    #[serde(skip_serializing)]
    pub means: Vec<f64>,
}

/// Comparison of several strategies over one shared workload.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub rows: usize,
    pub cols: usize,
    pub delay_ms: u64,
    pub runs: Vec<StrategyRun>,
    pub values_match: bool,
}

/// Element-wise agreement within [`VALUE_TOLERANCE`].
pub fn means_match(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= VALUE_TOLERANCE)
}

pub fn run_strategy(workload: &Workload, strategy: Strategy) -> Result<StrategyRun, CoreError> {
    let progress = AtomicUsize::new(0);
    run_strategy_with_progress(workload, strategy, &progress)
}

/// Run one strategy, bumping `progress` once per finished column. Results
/// are always in column-index order; any task error aborts the whole run
/// with no partial results.
pub fn run_strategy_with_progress(
    workload: &Workload,
    strategy: Strategy,
    progress: &AtomicUsize,
) -> Result<StrategyRun, CoreError> {
    let columns: Vec<usize> = (0..workload.columns()).collect();
    let started = Instant::now();
    let means = match strategy {
        Strategy::Serial => {
            let mut out = Vec::with_capacity(columns.len());
            for col in columns {
                out.push(workload.run(col)?);
                progress.fetch_add(1, Ordering::Relaxed);
            }
            out
        }
        Strategy::Pool { workers } => {
            let results =
                pool::parallel_map_with_progress(columns, workers, |col| workload.run(col), progress)?;
            results.into_iter().collect::<Result<Vec<_>, _>>()?
        }
    };
    let elapsed_secs = started.elapsed().as_secs_f64();
    utils::log(&format!(
        "{} worker(s): {} columns in {:.3} s",
        strategy.workers(),
        means.len(),
        elapsed_secs
    ));
    Ok(StrategyRun { workers: strategy.workers(), elapsed_secs, means })
}

/// Run each strategy in turn over the same workload and verify that every
/// run reproduces the first run's means.
pub fn run_bench(workload: &Workload, strategies: &[Strategy]) -> Result<BenchReport, CoreError> {
    let mut runs: Vec<StrategyRun> = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        runs.push(run_strategy(workload, *strategy)?);
    }
    let values_match = match runs.split_first() {
        Some((first, rest)) => rest.iter().all(|r| means_match(&first.means, &r.means)),
        None => true,
    };
    Ok(BenchReport {
        rows: workload.rows(),
        cols: workload.columns(),
        delay_ms: workload.delay().as_millis() as u64,
        runs,
        values_match,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use std::sync::Arc;
    use std::time::Duration;

    fn workload(rows: usize, cols: usize, seed: u64) -> Workload {
        Workload::new(Arc::new(Matrix::random(rows, cols, Some(seed))), Duration::ZERO)
    }

    #[test]
    fn test_with_workers_mapping() {
        assert_eq!(Strategy::with_workers(1), Strategy::Serial);
        assert_eq!(Strategy::with_workers(2), Strategy::Pool { workers: 2 });
        assert_eq!(Strategy::Serial.workers(), 1);
        assert_eq!(Strategy::Pool { workers: 10 }.workers(), 10);
    }

    #[test]
    fn test_serial_run_length_and_order() {
        let wl = workload(5, 12, 7);
        let run = run_strategy(&wl, Strategy::Serial).unwrap();
        assert_eq!(run.workers, 1);
        assert_eq!(run.means.len(), 12);
    }

    #[test]
    fn test_pool_reproduces_serial_means() {
        let wl = workload(10, 25, 21);
        let serial = run_strategy(&wl, Strategy::Serial).unwrap();
        let pooled = run_strategy(&wl, Strategy::Pool { workers: 4 }).unwrap();
        assert!(means_match(&serial.means, &pooled.means));
    }

    #[test]
    fn test_run_bench_report_fields() {
        let wl = workload(6, 9, 2);
        let report =
            run_bench(&wl, &[Strategy::Serial, Strategy::Pool { workers: 3 }]).unwrap();
        assert_eq!(report.rows, 6);
        assert_eq!(report.cols, 9);
        assert_eq!(report.delay_ms, 0);
        assert_eq!(report.runs.len(), 2);
        assert!(report.values_match);
    }

    #[test]
    fn test_zero_worker_pool_fails() {
        let wl = workload(2, 2, 0);
        assert!(run_strategy(&wl, Strategy::Pool { workers: 0 }).is_err());
    }

    #[test]
    fn test_progress_reaches_column_count() {
        let wl = workload(3, 40, 5);
        let progress = AtomicUsize::new(0);
        run_strategy_with_progress(&wl, Strategy::Pool { workers: 4 }, &progress).unwrap();
        assert_eq!(progress.load(Ordering::Relaxed), 40);
    }
}
