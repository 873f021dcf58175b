//! # ArgPack Module - *Bounded, Type-Erased Argument Views*
//!
//! `ArgPack` holds up to [`MAX_ARITY`] homogeneous argument columns in fixed
//! positional slots, each either present or explicitly absent. For every group
//! it produces a [`GroupViews`]: the same slots, sliced to `[start, stop)`.
//!
//! ## Role
//! - Backs [`LexicographicIndex::map_kernel`](crate::LexicographicIndex::map_kernel),
//!   where the number of arguments is only known at run time.
//! - Keeps the per-group worker signature fixed: a kernel always receives
//!   all `MAX_ARITY` slots, absent ones included.
//!
//! ## Behaviour
//! - Slicing borrows; no data is copied.
//! - Absent slots stay absent in every group's views.
//!
//! ## Invariants
//! - `n_args <= MAX_ARITY`.
//! - Every present column has the index's row count (checked at dispatch).

use std::fmt::{self, Debug, Formatter};
use std::ops::Range;

use crate::enums::error::{LexError, LexResult};

/// Maximum number of argument columns in an [`ArgPack`].
pub const MAX_ARITY: usize = 10;

/// # ArgPack
///
/// Up to [`MAX_ARITY`] optional argument columns in positional slots.
///
/// ## Fields
/// - `slots`: positional columns; `None` marks an omitted argument.
/// - `n_args`: number of positions supplied by the caller.
pub struct ArgPack<'a, T> {
    slots: [Option<&'a [T]>; MAX_ARITY],
    n_args: usize,
}

impl<'a, T> ArgPack<'a, T> {
    /// Packs present columns in order.
    ///
    /// Fails with `ArityExceeded` if more than [`MAX_ARITY`] columns are given.
    pub fn new(columns: &[&'a [T]]) -> LexResult<Self> {
        check_arity(columns.len())?;
        let mut slots = [None; MAX_ARITY];
        for (slot, col) in slots.iter_mut().zip(columns) {
            *slot = Some(*col);
        }
        Ok(Self { slots, n_args: columns.len() })
    }

    /// Packs columns where some positions are deliberately omitted.
    ///
    /// Fails with `ArityExceeded` if more than [`MAX_ARITY`] positions are given.
    pub fn from_optional(columns: &[Option<&'a [T]>]) -> LexResult<Self> {
        check_arity(columns.len())?;
        let mut slots = [None; MAX_ARITY];
        slots[..columns.len()].copy_from_slice(columns);
        Ok(Self { slots, n_args: columns.len() })
    }

    /// Number of positions supplied, present or absent.
    #[inline]
    pub fn n_args(&self) -> usize {
        self.n_args
    }

    /// Returns `true` if no positions were supplied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_args == 0
    }

    /// The supplied slots, in positional order.
    #[inline]
    pub fn slots(&self) -> &[Option<&'a [T]>] {
        &self.slots[..self.n_args]
    }

    /// Fails with `ArgumentLengthMismatch` on the first present column whose
    /// length is not `n_rows`.
    pub fn check_rows(&self, n_rows: usize) -> LexResult<()> {
        for (arg, slot) in self.slots().iter().enumerate() {
            if let Some(col) = slot {
                if col.len() != n_rows {
                    return Err(LexError::ArgumentLengthMismatch {
                        arg,
                        expected: n_rows,
                        found: col.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Slices every present column over `rows`.
    #[inline]
    pub fn views(&self, rows: Range<usize>) -> GroupViews<'a, T> {
        let mut slots = [None; MAX_ARITY];
        for (dst, src) in slots.iter_mut().zip(&self.slots[..self.n_args]) {
            *dst = src.map(|col| &col[rows.clone()]);
        }
        GroupViews { slots, n_args: self.n_args, rows }
    }
}

impl<T> Clone for ArgPack<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArgPack<'_, T> {}

impl<T> Debug for ArgPack<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let lens: Vec<Option<usize>> = self.slots().iter().map(|s| s.map(|c| c.len())).collect();
        f.debug_struct("ArgPack").field("n_args", &self.n_args).field("lens", &lens).finish()
    }
}

#[inline]
fn check_arity(found: usize) -> LexResult<()> {
    if found > MAX_ARITY {
        return Err(LexError::ArityExceeded { max: MAX_ARITY, found });
    }
    Ok(())
}

/// # GroupViews
///
/// One group's slice of every slot in an [`ArgPack`].
///
/// Positions beyond `n_args` read as absent, so a kernel may probe any of the
/// [`MAX_ARITY`] slots.
pub struct GroupViews<'a, T> {
    slots: [Option<&'a [T]>; MAX_ARITY],
    n_args: usize,
    rows: Range<usize>,
}

impl<'a, T> GroupViews<'a, T> {
    /// View of argument `pos`, `None` if it was omitted or never supplied.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&'a [T]> {
        self.slots.get(pos).copied().flatten()
    }

    /// Number of positions supplied by the caller.
    #[inline]
    pub fn n_args(&self) -> usize {
        self.n_args
    }

    /// Row range of this group in the original columns.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Number of rows in this group.
    #[inline]
    pub fn group_len(&self) -> usize {
        self.rows.len()
    }

    /// All [`MAX_ARITY`] slots in positional order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a [T]>> + '_ {
        self.slots.iter().copied()
    }

    /// Present views only, in positional order.
    #[inline]
    pub fn present(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        self.slots.iter().flatten().copied()
    }
}

impl<T> Debug for GroupViews<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupViews")
            .field("n_args", &self.n_args)
            .field("rows", &self.rows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_slice() {
        let a = [1i64, 2, 3, 4];
        let b = [5i64, 6, 7, 8];
        let pack = ArgPack::new(&[&a[..], &b[..]]).unwrap();
        assert_eq!(pack.n_args(), 2);

        let views = pack.views(1..3);
        assert_eq!(views.get(0), Some(&[2i64, 3][..]));
        assert_eq!(views.get(1), Some(&[6i64, 7][..]));
        assert_eq!(views.get(2), None);
        assert_eq!(views.get(MAX_ARITY + 5), None);
        assert_eq!(views.group_len(), 2);
        assert_eq!(views.iter().count(), MAX_ARITY);
        assert_eq!(views.present().count(), 2);
    }

    #[test]
    fn test_optional_slots_stay_absent() {
        let a = [1.0f32, 2.0];
        let pack = ArgPack::from_optional(&[None, Some(&a[..])]).unwrap();
        let views = pack.views(0..1);
        assert_eq!(views.get(0), None);
        assert_eq!(views.get(1), Some(&[1.0f32][..]));
        assert_eq!(views.n_args(), 2);
    }

    #[test]
    fn test_arity_exceeded() {
        let col = [0u8; 3];
        let cols: Vec<&[u8]> = vec![&col[..]; MAX_ARITY + 1];
        let err = ArgPack::new(&cols).unwrap_err();
        assert_eq!(err, LexError::ArityExceeded { max: MAX_ARITY, found: MAX_ARITY + 1 });

        let at_max: Vec<&[u8]> = vec![&col[..]; MAX_ARITY];
        assert!(ArgPack::new(&at_max).is_ok());
    }

    #[test]
    fn test_check_rows() {
        let a = [1u16, 2, 3];
        let b = [1u16, 2];
        let pack = ArgPack::from_optional(&[Some(&a[..]), None, Some(&b[..])]).unwrap();
        assert_eq!(
            pack.check_rows(3),
            Err(LexError::ArgumentLengthMismatch { arg: 2, expected: 3, found: 2 })
        );
    }
}
