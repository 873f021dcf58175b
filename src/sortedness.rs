//! # Sortedness Module
//!
//! Helpers for checking the ordering precondition of lexicographic grouping.
//!
//! Grouping itself never verifies order: unsorted input still yields a valid
//! index, just with more and shorter groups. Callers who cannot vouch for
//! their input run [`check_lexicographic`] first, or use
//! [`LexicographicIndex::build_checked`](crate::LexicographicIndex::build_checked).

use std::cmp::Ordering;

#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;

use crate::enums::error::{LexError, LexResult};
use crate::structs::bitmask::check_key_lengths;
use crate::traits::key_column::OrdKeyColumn;

/// `true` if every value is strictly greater than the one before it.
pub fn is_strictly_increasing<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Number of maximal runs of equal values.
///
/// For a sorted column this is the number of distinct values.
pub fn count_runs<T: PartialEq>(values: &[T]) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values.windows(2).filter(|w| w[0] != w[1]).count()
}

/// First value of every run, in order.
pub fn unique_sorted<T: PartialEq + Clone>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(count_runs(values));
    for v in values {
        if out.last() != Some(v) {
            out.push(v.clone());
        }
    }
    out
}

/// Verifies that the rows of `columns` are in non-decreasing lexicographic
/// order: column 0 first, later columns only breaking ties.
///
/// Fails with `NotSorted` at the first row that sorts before its
/// predecessor. Incomparable values such as NaN count as out of order.
pub fn check_lexicographic<C: OrdKeyColumn + ?Sized>(columns: &[&C]) -> LexResult<()> {
    let n_rows = check_key_lengths(columns)?;

    #[cfg(feature = "parallel_proc")]
    let bad = (1..n_rows).into_par_iter().find_first(|&row| !row_in_order(columns, row));

    #[cfg(not(feature = "parallel_proc"))]
    let bad = (1..n_rows).find(|&row| !row_in_order(columns, row));

    match bad {
        Some(row) => Err(LexError::NotSorted { row }),
        None => Ok(()),
    }
}

#[inline]
fn row_in_order<C: OrdKeyColumn + ?Sized>(columns: &[&C], row: usize) -> bool {
    for col in columns {
        match col.cmp_prev(row) {
            Some(Ordering::Greater) => return true,
            Some(Ordering::Equal) => continue,
            Some(Ordering::Less) | None => return false,
        }
    }
    true
}
