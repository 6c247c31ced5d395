//! Fixed-shape random matrix. Generated once, read-only afterwards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;

/// Row-major `rows x cols` matrix of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Matrix of uniform values in `[0, 1)`. A seed gives a reproducible
    /// matrix; `None` draws from OS entropy.
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let data = (0..rows * cols).map(|_| rng.gen::<f64>()).collect();
        Self { data, rows, cols }
    }

    /// Build from an existing row-major buffer.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, CoreError> {
        if data.len() != rows * cols {
            return Err(CoreError::Shape { rows, cols, len: data.len() });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Arithmetic mean of one column. Summation runs in row order, so the
    /// result is bit-identical across repeated calls on the same matrix.
    pub fn column_mean(&self, col: usize) -> Result<f64, CoreError> {
        if col >= self.cols {
            return Err(CoreError::Column { index: col, cols: self.cols });
        }
        let sum: f64 = (0..self.rows).map(|row| self.data[row * self.cols + col]).sum();
        Ok(sum / self.rows as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_shape_and_range() {
        let m = Matrix::random(4, 6, Some(1));
        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 6);
        for row in 0..4 {
            for col in 0..6 {
                let v = m.get(row, col).unwrap();
                assert!((0.0..1.0).contains(&v));
            }
        }
        assert_eq!(m.get(4, 0), None);
        assert_eq!(m.get(0, 6), None);
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = Matrix::random(10, 10, Some(42));
        let b = Matrix::random(10, 10, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_column_mean_known_values() {
        // 2x3: columns are [1,4], [2,5], [3,6]
        let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(m.column_mean(0).unwrap(), 2.5);
        assert_eq!(m.column_mean(1).unwrap(), 3.5);
        assert_eq!(m.column_mean(2).unwrap(), 4.5);
    }

    #[test]
    fn test_column_mean_out_of_range() {
        let m = Matrix::random(2, 2, Some(0));
        assert!(matches!(
            m.column_mean(2),
            Err(CoreError::Column { index: 2, cols: 2 })
        ));
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let err = Matrix::from_vec(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(err, CoreError::Shape { len: 3, .. }));
    }
}
