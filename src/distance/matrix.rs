//! Dense matrices and graph snapshots.

use crate::models::TimeWindow;

/// Sentinel stored for a pair of locations without an edge.
pub const UNREACHABLE: i64 = i64::MAX;

/// A dense `rows x cols` integer matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_tsptw::distance::{Matrix, UNREACHABLE};
///
/// let mut m = Matrix::unreachable(3);
/// m.set(0, 1, 5);
/// assert_eq!(m.get(0, 1), 5);
/// assert_eq!(m.value(1, 0), None);
/// assert_eq!(m.get(2, 2), UNREACHABLE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a matrix filled with `fill`.
    pub fn new(rows: usize, cols: usize, fill: i64) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an `n x n` matrix where every pair is [`UNREACHABLE`].
    pub fn unreachable(n: usize) -> Self {
        Self::new(n, n, UNREACHABLE)
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Returns `None` if the rows differ in length.
    pub fn from_rows(rows: &[Vec<i64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            data: rows.concat(),
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the raw entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    /// Returns the entry at `(row, col)`, or `None` if it is [`UNREACHABLE`].
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<i64> {
        match self.get(row, col) {
            UNREACHABLE => None,
            v => Some(v),
        }
    }

    /// Sets the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the matrix is square and `m[i][j] == m[j][i]`.
    pub fn is_symmetric(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }
        (0..self.rows).all(|i| ((i + 1)..self.cols).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.data
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(<[i64]>::to_vec)
            .collect()
    }
}

/// Distance and travel time matrices plus windows over one fixed enumeration.
///
/// This is the dense form the bitmask search consumes. Index `i` refers to the
/// location whose [`LocationId::index`](crate::models::LocationId::index) is `i`
/// at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    distances: Matrix,
    travel_times: Matrix,
    windows: Vec<TimeWindow>,
}

impl GraphSnapshot {
    pub(crate) fn new(distances: Matrix, travel_times: Matrix, windows: Vec<TimeWindow>) -> Self {
        Self {
            distances,
            travel_times,
            windows,
        }
    }

    /// Builds a snapshot from exported matrices.
    ///
    /// `time_windows` uses the `n x 2n` layout of
    /// [`Graph::to_time_window_matrix`](crate::models::Graph::to_time_window_matrix);
    /// only the first column pair of each row is read. Returns `None` on
    /// mismatched dimensions or an inverted window.
    pub fn from_matrices(distances: Matrix, travel_times: Matrix, time_windows: &Matrix) -> Option<Self> {
        let n = distances.rows();
        if distances.cols() != n
            || travel_times.rows() != n
            || travel_times.cols() != n
            || time_windows.rows() != n
            || time_windows.cols() < 2 * n
        {
            return None;
        }
        let windows = (0..n)
            .map(|i| TimeWindow::new(time_windows.get(i, 0), time_windows.get(i, 1)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(distances, travel_times, windows))
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.windows.len()
    }

    /// Distance matrix.
    pub fn distances(&self) -> &Matrix {
        &self.distances
    }

    /// Travel time matrix.
    pub fn travel_times(&self) -> &Matrix {
        &self.travel_times
    }

    /// Window of location `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn window(&self, i: usize) -> TimeWindow {
        self.windows[i]
    }

    /// Distance and travel time of the edge `i -> j`, if present.
    pub fn edge(&self, i: usize, j: usize) -> Option<(i64, i64)> {
        Some((self.distances.value(i, j)?, self.travel_times.value(i, j)?))
    }
}
