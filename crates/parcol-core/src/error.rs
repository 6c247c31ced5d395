//! Error types shared by the matrix, workload, and pool layers.

use std::fmt;

use serde::Serialize;

/// Main error type for parcol operations
#[derive(Debug, Clone, Serialize)]
pub enum CoreError {
    /// Column index outside the matrix
    Column { index: usize, cols: usize },
    /// Backing buffer does not match the requested dimensions
    Shape { rows: usize, cols: usize, len: usize },
    /// Worker pool could not be sized or built
    Pool { workers: usize, source: String },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Column { index, cols } => {
                write!(f, "column index {} out of range (matrix has {} columns)", index, cols)
            }
            CoreError::Shape { rows, cols, len } => {
                write!(f, "buffer of {} values does not fit a {}x{} matrix", len, rows, cols)
            }
            CoreError::Pool { workers, source } => {
                write!(f, "worker pool error ({} workers): {}", workers, source)
            }
        }
    }
}

impl std::error::Error for CoreError {}
