//! # Matrix Module - *2-D Key Input*
//!
//! Dense column-major matrix of key values, the 2-D construction source for
//! [`LexicographicIndex::from_matrix`](crate::LexicographicIndex::from_matrix).
//!
//! Column-major, so that every key column is a contiguous slice and reading
//! the matrix column-wise costs nothing.

use std::fmt;

use vec64::Vec64;

/// # Matrix
///
/// Column-major dense matrix.
///
/// ### Properties
/// - `nrows`: Number of rows.
/// - `ncols`: Number of columns, i.e. key columns.
/// - `data`: Flat buffer in column-major order.
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub data: Vec64<T>,
}

impl<T: Copy> Matrix<T> {
    /// Constructs a Matrix from a flat buffer (must be column-major order).
    /// Panics if data length does not match shape.
    pub fn from_flat(data: Vec64<T>, nrows: usize, ncols: usize) -> Self {
        assert_eq!(data.len(), nrows * ncols, "Matrix shape does not match buffer length");
        Matrix { nrows, ncols, data }
    }

    /// Constructs a Matrix from a row-major slice, transposing into column-major.
    /// Panics if the slice length does not match shape.
    pub fn from_row_major(rows: &[T], nrows: usize, ncols: usize) -> Self {
        assert_eq!(rows.len(), nrows * ncols, "Slice shape mismatch");
        let mut data = Vec64::with_capacity(nrows * ncols);
        for col in 0..ncols {
            for row in 0..nrows {
                data.push(rows[row * ncols + col]);
            }
        }
        Matrix { nrows, ncols, data }
    }

    /// Returns the value at (row, col) (0-based). Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.nrows, "Row out of bounds");
        debug_assert!(col < self.ncols, "Col out of bounds");
        self.data[col * self.nrows + row]
    }
}

impl<T> Matrix<T> {
    /// Returns true if the matrix is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        let s: &[T] = &self.data;
        s.len()
    }

    /// Returns a single column as a slice, panics if col out of bounds.
    #[inline]
    pub fn col(&self, col: usize) -> &[T] {
        assert!(col < self.ncols, "Col out of bounds");
        &self.data[(col * self.nrows)..((col + 1) * self.nrows)]
    }

    /// Returns a view of the matrix as a slice of columns.
    pub fn columns(&self) -> Vec<&[T]> {
        (0..self.ncols).map(|col| self.col(col)).collect()
    }
}

// From Vec-of-cols to Matrix (all cols must match length)
impl<T: Copy> From<&[Vec<T>]> for Matrix<T> {
    fn from(columns: &[Vec<T>]) -> Self {
        let ncols = columns.len();
        let nrows = columns.first().map(|c| c.len()).unwrap_or(0);
        for col in columns {
            assert_eq!(col.len(), nrows, "Column length mismatch");
        }
        let mut data = Vec64::with_capacity(nrows * ncols);
        for col in columns {
            data.extend_from_slice(col);
        }
        Matrix { nrows, ncols, data }
    }
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix: {} × {} [col-major]", self.nrows, self.ncols)?;
        for row in 0..self.nrows.min(6) {
            // Print up to 6 rows
            write!(f, "\n[")?;
            for col in 0..self.ncols.min(8) {
                // Print up to 8 cols
                write!(f, " {:?}", &self.data[col * self.nrows + row])?;
                if col != self.ncols - 1 {
                    write!(f, ",")?;
                }
            }
            if self.ncols > 8 {
                write!(f, " ...")?;
            }
            write!(f, " ]")?;
        }
        if self.nrows > 6 {
            write!(f, "\n...")?;
        }
        Ok(())
    }
}
