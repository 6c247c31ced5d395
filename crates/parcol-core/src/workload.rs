//! Per-column work item: a fixed artificial delay plus the column mean.
//! The delay simulates non-trivial per-item cost; it never affects the value.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::CoreError;
use crate::matrix::Matrix;

/// The task every execution strategy runs once per column. The matrix is
/// shared read-only, so clones are cheap and safe to hand to worker threads.
#[derive(Clone)]
pub struct Workload {
    matrix: Arc<Matrix>,
    delay: Duration,
}

impl Workload {
    pub fn new(matrix: Arc<Matrix>, delay: Duration) -> Self {
        Self { matrix, delay }
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn columns(&self) -> usize {
        self.matrix.cols()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured delay, then compute the column mean.
    pub fn run(&self, col: usize) -> Result<f64, CoreError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.matrix.column_mean(col)
    }
}
