//! Sparse signed boundary matrices.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

/// `rows × cols` matrix with entries in {-1, +1}; absent entries are zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryMatrix {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), i8>,
}

impl BoundaryMatrix {
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Single row of ones: every vertex bounds the empty simplex.
    pub(crate) fn augmentation(cols: usize) -> Self {
        let mut m = Self::zeros(1, cols);
        for c in 0..cols {
            m.entries.insert((0, c), 1);
        }
        m
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: i8) {
        debug_assert!(row < self.rows && col < self.cols);
        debug_assert!(value == 1 || value == -1);
        self.entries.insert((row, col), value);
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.entries.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Non-zero entries `((row, col), value)` in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), i8)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut m = DMatrix::zeros(self.rows, self.cols);
        for (&(r, c), &v) in &self.entries {
            m[(r, c)] = f64::from(v);
        }
        m
    }
}
