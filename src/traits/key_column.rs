//! # KeyColumn Trait Module
//!
//! Type-erased access to the key columns an index is built from.
//!
//! Key columns may have different element types (e.g. an `i64` run id next
//! to an `f64` bucket), so construction also accepts `&[&dyn KeyColumn]`, and
//! only ever asks one question of each column: does row `i` differ from row `i - 1`?
//! That keeps every row's boundary mark computable in isolation, which is what
//! lets [`BoundaryMask::detect`](crate::structs::bitmask::BoundaryMask::detect)
//! split the scan across workers.

use std::cmp::Ordering;

use vec64::Vec64;

use crate::structs::column::NamedColumn;

/// A column that can report where its value changes.
///
/// Implemented for `[T]`, `Vec<T>`, `Vec64<T>`, [`NamedColumn`] and references
/// to any of these, for every `T: PartialEq + Sync`.
///
/// Float NaN compares unequal to itself, so each NaN row opens a new group.
pub trait KeyColumn: Sync {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns `true` if the column has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if row `row` holds a different value than row `row - 1`.
    ///
    /// `row` must be in `1..len`.
    fn differs_at(&self, row: usize) -> bool;

    /// Change bits for rows `[start, end)`, at most 64 of them.
    ///
    /// Bit `k` is set iff row `start + k` differs from its predecessor.
    /// Row 0 never reports a change here; the caller marks it.
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        debug_assert!(end - start <= 64);
        let mut word = 0u64;
        for row in start.max(1)..end {
            if self.differs_at(row) {
                word |= 1 << (row - start);
            }
        }
        word
    }
}

/// Key column whose values are also ordered, for sortedness checks.
pub trait OrdKeyColumn: KeyColumn {
    /// Ordering of row `row` relative to row `row - 1`.
    ///
    /// `None` when the two are incomparable (float NaN).
    fn cmp_prev(&self, row: usize) -> Option<Ordering>;
}

impl<T: PartialEq + Sync> KeyColumn for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn differs_at(&self, row: usize) -> bool {
        self[row] != self[row - 1]
    }

    // Monomorphised loop, so a dyn column costs one virtual call per word.
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        debug_assert!(end - start <= 64 && end <= self.len());
        let mut word = 0u64;
        let from = start.max(1);
        for (k, pair) in self[from - 1..end].windows(2).enumerate() {
            word |= ((pair[1] != pair[0]) as u64) << (from + k - start);
        }
        word
    }
}

impl<T: PartialOrd + Sync> OrdKeyColumn for [T] {
    #[inline]
    fn cmp_prev(&self, row: usize) -> Option<Ordering> {
        self[row].partial_cmp(&self[row - 1])
    }
}

impl<T: PartialEq + Sync> KeyColumn for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn differs_at(&self, row: usize) -> bool {
        self.as_slice().differs_at(row)
    }

    #[inline]
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        self.as_slice().change_bits(start, end)
    }
}

impl<T: PartialOrd + Sync> OrdKeyColumn for Vec<T> {
    #[inline]
    fn cmp_prev(&self, row: usize) -> Option<Ordering> {
        self.as_slice().cmp_prev(row)
    }
}

impl<T: PartialEq + Sync> KeyColumn for Vec64<T> {
    #[inline]
    fn len(&self) -> usize {
        let s: &[T] = self;
        s.len()
    }

    #[inline]
    fn differs_at(&self, row: usize) -> bool {
        let s: &[T] = self;
        s.differs_at(row)
    }

    #[inline]
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        let s: &[T] = self;
        s.change_bits(start, end)
    }
}

impl<T: PartialOrd + Sync> OrdKeyColumn for Vec64<T> {
    #[inline]
    fn cmp_prev(&self, row: usize) -> Option<Ordering> {
        let s: &[T] = self;
        s.cmp_prev(row)
    }
}

impl<K: KeyColumn + ?Sized> KeyColumn for &K {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn differs_at(&self, row: usize) -> bool {
        (**self).differs_at(row)
    }

    #[inline]
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        (**self).change_bits(start, end)
    }
}

impl<K: OrdKeyColumn + ?Sized> OrdKeyColumn for &K {
    #[inline]
    fn cmp_prev(&self, row: usize) -> Option<Ordering> {
        (**self).cmp_prev(row)
    }
}

impl<C: KeyColumn> KeyColumn for NamedColumn<C> {
    #[inline]
    fn len(&self) -> usize {
        self.data().len()
    }

    #[inline]
    fn differs_at(&self, row: usize) -> bool {
        self.data().differs_at(row)
    }

    #[inline]
    fn change_bits(&self, start: usize, end: usize) -> u64 {
        self.data().change_bits(start, end)
    }
}

impl<C: OrdKeyColumn> OrdKeyColumn for NamedColumn<C> {
    #[inline]
    fn cmp_prev(&self, row: usize) -> Option<Ordering> {
        self.data().cmp_prev(row)
    }
}
