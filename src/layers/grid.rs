//! Row-major cell grid shared by every layer stage.
//!
//! All pipeline stages exchange `Grid` values: the sampler produces a
//! `Grid<f64>` of brightness samples, decomposition turns it into
//! `Grid<bool>` ink masks, and glyph mapping yields `Grid<char>` pages.

use std::ops::{Index, IndexMut};

/// A fixed-size 2D grid stored as a flat row-major buffer.
///
/// Cell `(row, col)` lives at `row * cols + col`. Rows run top to
/// bottom, columns left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by calling `f(row, col)` for every cell.
    ///
    /// Cells are visited in row-major order: row 0 left to right,
    /// then row 1, and so on. Stages that consume a glyph cursor rely
    /// on this order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total cell count (`rows * cols`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrow one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// True when `other` has the same row and column counts.
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}

impl<T: Clone> Grid<T> {
    /// Build a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl Grid<char> {
    /// Render the grid as text, one line per row.
    ///
    /// Lines are joined with `\n` and no trailing newline is added,
    /// so a 1x1 grid renders as a single character.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.len() + self.rows);
        for row in 0..self.rows {
            if row > 0 {
                text.push('\n');
            }
            text.extend(self.row(row).iter());
        }
        text
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.cells[row * self.cols + col]
    }
}
