//! Strategy equivalence and ordering properties over the core library.

use std::sync::Arc;
use std::time::Duration;

use parcol_core::{means_match, run_bench, run_strategy, Matrix, Strategy, Workload};

fn workload(rows: usize, cols: usize, seed: u64, delay_ms: u64) -> Workload {
    Workload::new(
        Arc::new(Matrix::random(rows, cols, Some(seed))),
        Duration::from_millis(delay_ms),
    )
}

#[test]
fn serial_and_pool_agree_for_any_worker_count() {
    let wl = workload(40, 64, 11, 0);
    let baseline = run_strategy(&wl, Strategy::Serial).unwrap();
    assert_eq!(baseline.means.len(), 64);
    for workers in [1, 2, 3, 8, 16] {
        let run = run_strategy(&wl, Strategy::Pool { workers }).unwrap();
        assert_eq!(run.means.len(), 64);
        assert!(means_match(&baseline.means, &run.means), "workers={}", workers);
    }
}

#[test]
fn pool_results_stay_in_column_order() {
    // Column c holds the constant value c, so any misordering is visible.
    let rows = 3;
    let cols = 32;
    let mut data = vec![0.0; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            data[r * cols + c] = c as f64;
        }
    }
    let matrix = Matrix::from_vec(data, rows, cols).unwrap();
    let wl = Workload::new(Arc::new(matrix), Duration::ZERO);

    let run = run_strategy(&wl, Strategy::Pool { workers: 8 }).unwrap();
    for (c, mean) in run.means.iter().enumerate() {
        assert!((mean - c as f64).abs() < 1e-12, "column {} out of place", c);
    }
}

#[test]
fn empty_matrix_yields_empty_results() {
    let wl = workload(10, 0, 3, 0);
    let report = run_bench(&wl, &[Strategy::Serial, Strategy::Pool { workers: 4 }]).unwrap();
    assert!(report.values_match);
    assert!(report.runs.iter().all(|r| r.means.is_empty()));
}

#[test]
fn single_column_matrix_yields_one_result() {
    let wl = workload(10, 1, 3, 0);
    let report = run_bench(&wl, &[Strategy::Serial, Strategy::Pool { workers: 4 }]).unwrap();
    assert!(report.values_match);
    assert!(report.runs.iter().all(|r| r.means.len() == 1));
}

#[test]
fn reruns_on_the_same_seed_are_identical() {
    let a = run_strategy(&workload(20, 30, 99, 0), Strategy::Pool { workers: 4 }).unwrap();
    let b = run_strategy(&workload(20, 30, 99, 0), Strategy::Pool { workers: 4 }).unwrap();
    assert_eq!(a.means, b.means);
}

#[test]
fn pool_is_faster_than_serial_on_a_delay_bound_workload() {
    // 24 columns x 5 ms gives a ~120 ms serial floor; 8 workers need ~3
    // rounds. Direction only; absolute times are not asserted.
    let wl = workload(4, 24, 5, 5);
    let serial = run_strategy(&wl, Strategy::Serial).unwrap();
    let pooled = run_strategy(&wl, Strategy::Pool { workers: 8 }).unwrap();
    assert!(
        pooled.elapsed_secs < serial.elapsed_secs,
        "pooled {:.3}s should beat serial {:.3}s",
        pooled.elapsed_secs,
        serial.elapsed_secs
    );
}
