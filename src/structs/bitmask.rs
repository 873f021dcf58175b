//! # **Bitmask Module** - *Packed Group Boundary Marks*
//!
//! Word-packed boolean marks, one per row: bit `i` is set iff row `i` opens a
//! new group, i.e. its key tuple differs from row `i - 1` in *any* key column.
//! Row 0 is always set.
//!
//! ## Behaviour
//! - LSB of word `w` corresponds to row `64 * w`.
//! - Trailing padding bits above `len` are always zero.
//! - Detection is parallel over words under `parallel_proc`: every word is
//!   owned by exactly one worker, and each row compares against its
//!   predecessor directly, so no running state crosses word boundaries.
//! - [`to_offsets`](BoundaryMask::to_offsets) compacts the set bits into
//!   a group offsets sequence with the row count as sentinel.

use std::fmt::{Debug, Formatter, Result as FmtResult};

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;
use vec64::Vec64;

use crate::enums::error::{LexError, LexResult};
use crate::traits::key_column::KeyColumn;

const WORD_BITS: usize = 64;

/// # BoundaryMask
///
/// 64-byte–aligned packed group-start marks.
///
/// # Example
/// ```rust
/// use lexmap::BoundaryMask;
///
/// let a = vec![1, 1, 1, 2, 2];
/// let b = vec![5, 5, 6, 6, 6];
/// let mask = BoundaryMask::detect(&[&a, &b]).unwrap();
/// assert_eq!(mask.iter_set().collect::<Vec<_>>(), vec![0, 2, 3]);
/// assert_eq!(mask.to_offsets().as_slice(), &[0, 2, 3, 5]);
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct BoundaryMask {
    pub words: Vec64<u64>,
    pub len: usize,
}

impl BoundaryMask {
    /// Create a new mask of `len` rows, all bits cleared.
    #[inline]
    pub fn new_cleared(len: usize) -> Self {
        let n_words = len.div_ceil(WORD_BITS);
        let mut words = Vec64::with_capacity(n_words);
        words.resize(n_words, 0u64);
        Self { words, len }
    }

    /// Scans key columns and marks every row that starts a new group.
    ///
    /// Columns are OR-combined: a change in any column opens a group,
    /// independently of the columns before it.
    ///
    /// Fails with `EmptyInput` for no columns or zero rows and with
    /// `ColumnLengthMismatch` if a column's length differs from the first's.
    pub fn detect<C: KeyColumn + ?Sized>(columns: &[&C]) -> LexResult<Self> {
        let n_rows = check_key_lengths(columns)?;
        let mut mask = Self::new_cleared(n_rows);
        let words: &mut [u64] = &mut mask.words;

        #[cfg(feature = "parallel_proc")]
        words
            .par_iter_mut()
            .enumerate()
            .for_each(|(w, word)| *word = scan_word(columns, w, n_rows));

        #[cfg(not(feature = "parallel_proc"))]
        words
            .iter_mut()
            .enumerate()
            .for_each(|(w, word)| *word = scan_word(columns, w, n_rows));

        Ok(mask)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the mark for row `idx`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        assert!(idx < self.len, "BoundaryMask::get: index {} out of bounds ({})", idx, self.len);
        (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 != 0
    }

    /// Sets the mark for row `idx`. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        assert!(idx < self.len, "BoundaryMask::set: index {} out of bounds ({})", idx, self.len);
        let bit = 1u64 << (idx % WORD_BITS);
        if value {
            self.words[idx / WORD_BITS] |= bit;
        } else {
            self.words[idx / WORD_BITS] &= !bit;
        }
    }

    /// Number of set marks, i.e. the number of groups.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterator over the rows whose mark is set, ascending.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(w * WORD_BITS + tz)
            })
        })
    }

    /// Compacts the marks into group offsets: every set row, then `len` as sentinel.
    pub fn to_offsets(&self) -> Vec64<usize> {
        let mut offsets = Vec64::with_capacity(self.count_ones() + 1);
        for row in self.iter_set() {
            offsets.push(row);
        }
        offsets.push(self.len);
        offsets
    }
}

/// Validates key columns and returns their common row count.
pub(crate) fn check_key_lengths<C: KeyColumn + ?Sized>(columns: &[&C]) -> LexResult<usize> {
    let first = columns.first().ok_or_else(|| LexError::EmptyInput {
        message: "at least one key column is required".to_string(),
    })?;
    let n_rows = first.len();
    if n_rows == 0 {
        return Err(LexError::EmptyInput {
            message: "key columns have no rows".to_string(),
        });
    }
    for (col, c) in columns.iter().enumerate().skip(1) {
        if c.len() != n_rows {
            return Err(LexError::ColumnLengthMismatch {
                col,
                expected: n_rows,
                found: c.len(),
            });
        }
    }
    Ok(n_rows)
}

/// Computes word `w` of the boundary mask across all columns.
#[inline]
fn scan_word<C: KeyColumn + ?Sized>(columns: &[&C], w: usize, n_rows: usize) -> u64 {
    let start = w * WORD_BITS;
    let end = (start + WORD_BITS).min(n_rows);
    let mut word = if start == 0 { 1 } else { 0 };
    for col in columns {
        word |= col.change_bits(start, end);
    }
    word
}

impl Debug for BoundaryMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BoundaryMask")
            .field("len", &self.len)
            .field("groups", &self.count_ones())
            .finish()
    }
}
