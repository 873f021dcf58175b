//! # Tensor Module - *Per-Group Output Container*
//!
//! Dense row-major n-dimensional array, the output container of
//! [`LexicographicIndex::map`](crate::LexicographicIndex::map).
//!
//! The leading axis runs over groups, so record `i` is the contiguous run
//! `data[i * record_len .. (i + 1) * record_len]`. That contiguity is what lets
//! the dispatcher hand each worker its own disjoint `&mut` slot.
//!
//! Also usable as a record itself, for routines that return a matrix or
//! higher-rank block per group.

use std::fmt;

use vec64::Vec64;

use crate::traits::type_unions::Numeric;

/// # Tensor
///
/// Row-major dense tensor.
///
/// ### Properties
/// - `shape`: Extent of every axis, outermost first. Empty for a 0-d tensor.
/// - `data`: Flat, 64-byte aligned buffer in row-major order.
///
/// ### Shapes produced by mapping
/// - scalar records: `(G,)`
/// - vector records of length `n`: `(G, n)`
/// - tensor records of shape `dims`: `(G, *dims)`
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    data: Vec64<T>,
}

impl<T: Numeric> Tensor<T> {
    /// Constructs a new zero-filled tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        let mut data = Vec64::with_capacity(len);
        data.resize(len, T::zero());
        Tensor { shape, data }
    }

    /// Constructs a tensor from a flat buffer (must be row-major order).
    /// Panics if data length does not match shape.
    pub fn from_flat(data: Vec64<T>, shape: Vec<usize>) -> Self {
        assert_eq!(
            data.len(),
            shape.iter().product::<usize>(),
            "Tensor shape does not match buffer length"
        );
        Tensor { shape, data }
    }

    /// Constructs a 2-D tensor from equal-length rows.
    /// Panics on ragged input.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec64::with_capacity(nrows * ncols);
        for row in rows {
            assert_eq!(row.len(), ncols, "Row length mismatch");
            data.extend_from_slice(row);
        }
        Tensor { shape: vec![nrows, ncols], data }
    }
}

impl<T> Tensor<T> {
    /// Extent of every axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        let s: &[T] = &self.data;
        s.len()
    }

    /// Returns true if the tensor holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records along the leading axis, `1` for a 0-d tensor.
    #[inline]
    pub fn n_records(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Elements per record, i.e. the product of all but the leading axis.
    #[inline]
    pub fn record_len(&self) -> usize {
        self.shape.iter().skip(1).product()
    }

    /// Record `i` along the leading axis. Panics if out of bounds.
    #[inline]
    pub fn record(&self, i: usize) -> &[T] {
        let n = self.record_len();
        &self.data[i * n..(i + 1) * n]
    }

    /// Mutable record `i` along the leading axis. Panics if out of bounds.
    #[inline]
    pub fn record_mut(&mut self, i: usize) -> &mut [T] {
        let n = self.record_len();
        &mut self.data[i * n..(i + 1) * n]
    }

    /// Iterator over records along the leading axis.
    pub fn records(&self) -> impl Iterator<Item = &[T]> + '_ {
        let n = self.record_len().max(1);
        self.data.chunks(n)
    }

    /// Returns an immutable reference to the flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable reference to the flat buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the tensor, returning its flat buffer.
    #[inline]
    pub fn into_data(self) -> Vec64<T> {
        self.data
    }

    /// Flat offset of a multi-index. Panics on rank or bounds mismatch.
    #[inline]
    fn flat_index(&self, idx: &[usize]) -> usize {
        assert_eq!(idx.len(), self.shape.len(), "Index rank does not match tensor rank");
        let mut flat = 0;
        for (i, (&at, &extent)) in idx.iter().zip(&self.shape).enumerate() {
            assert!(at < extent, "Index {} out of bounds on axis {} (extent {})", at, i, extent);
            flat = flat * extent + at;
        }
        flat
    }
}

impl<T: Copy> Tensor<T> {
    /// Returns the value at a full multi-index, e.g. `t.get(&[g, row, col])`.
    #[inline]
    pub fn get(&self, idx: &[usize]) -> T {
        self.data[self.flat_index(idx)]
    }

    /// Sets the value at a full multi-index.
    #[inline]
    pub fn set(&mut self, idx: &[usize], value: T) {
        let at = self.flat_index(idx);
        self.data[at] = value;
    }
}

// Pretty print
impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor {:?} [row-major]", self.shape)?;
        let n = self.record_len().max(1);
        for (i, rec) in self.data.chunks(n).take(6).enumerate() {
            // Print up to 6 records, 8 values each
            write!(f, "\n{:>4}: [", i)?;
            for (j, v) in rec.iter().take(8).enumerate() {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, " {:?}", v)?;
            }
            if rec.len() > 8 {
                write!(f, " ...")?;
            }
            write!(f, " ]")?;
        }
        if self.n_records() > 6 {
            write!(f, "\n...")?;
        }
        Ok(())
    }
}
