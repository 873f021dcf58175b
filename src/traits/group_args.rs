//! # GroupArgs Trait Module
//!
//! Statically-typed argument packing for
//! [`LexicographicIndex::map`](crate::LexicographicIndex::map).
//!
//! A call site hands the index a tuple of argument columns, e.g.
//! `(&intensity, &mz, None::<&[f64]>)`. For each group the tuple is sliced into
//! a tuple of views over `[start, stop)` with the same arity and element types,
//! and that tuple is what the user routine receives. Nothing is copied.
//!
//! `Option<C>` columns slice into `Option<view>`, which is how an omitted
//! argument reaches the routine as an explicit absent marker.

use std::ops::Range;

use vec64::Vec64;

use crate::structs::column::NamedColumn;

/// A column that can be sliced into per-group views living for `'a`.
pub trait ArgColumn<'a>: Sync {
    /// What the user routine receives for one group.
    type View;

    /// Number of rows, or `None` for an absent column.
    fn column_len(&self) -> Option<usize>;

    /// View over `rows`. `rows` is always within `0..column_len`.
    fn view(&self, rows: Range<usize>) -> Self::View;
}

impl<'a, T: Sync> ArgColumn<'a> for &'a [T] {
    type View = &'a [T];

    #[inline]
    fn column_len(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn view(&self, rows: Range<usize>) -> &'a [T] {
        let s: &'a [T] = *self;
        &s[rows]
    }
}

impl<'a, T: Sync> ArgColumn<'a> for &'a Vec<T> {
    type View = &'a [T];

    #[inline]
    fn column_len(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn view(&self, rows: Range<usize>) -> &'a [T] {
        let s: &'a [T] = *self;
        &s[rows]
    }
}

impl<'a, T: Sync> ArgColumn<'a> for &'a Vec64<T> {
    type View = &'a [T];

    #[inline]
    fn column_len(&self) -> Option<usize> {
        let s: &[T] = *self;
        Some(s.len())
    }

    #[inline]
    fn view(&self, rows: Range<usize>) -> &'a [T] {
        let s: &'a [T] = *self;
        &s[rows]
    }
}

impl<'a, C: Sync> ArgColumn<'a> for &'a NamedColumn<C>
where
    &'a C: ArgColumn<'a>,
{
    type View = <&'a C as ArgColumn<'a>>::View;

    #[inline]
    fn column_len(&self) -> Option<usize> {
        let col: &'a NamedColumn<C> = *self;
        let data: &'a C = col.data();
        data.column_len()
    }

    #[inline]
    fn view(&self, rows: Range<usize>) -> Self::View {
        let col: &'a NamedColumn<C> = *self;
        let data: &'a C = col.data();
        data.view(rows)
    }
}

impl<'a, C: ArgColumn<'a>> ArgColumn<'a> for Option<C> {
    type View = Option<C::View>;

    #[inline]
    fn column_len(&self) -> Option<usize> {
        self.as_ref().and_then(|c| c.column_len())
    }

    #[inline]
    fn view(&self, rows: Range<usize>) -> Self::View {
        self.as_ref().map(|c| c.view(rows))
    }
}

/// A fixed-arity bundle of argument columns.
///
/// Implemented for tuples of up to ten [`ArgColumn`]s and for `()`.
pub trait GroupArgs<'a>: Sync {
    /// Tuple of per-group views handed to the routine.
    type Views;

    /// Number of argument columns.
    const ARITY: usize;

    /// Row counts in positional order, `None` for absent columns.
    fn column_lens(&self) -> Vec<Option<usize>>;

    /// Slices every column over `rows`.
    fn views(&self, rows: Range<usize>) -> Self::Views;
}

impl<'a> GroupArgs<'a> for () {
    type Views = ();
    const ARITY: usize = 0;

    fn column_lens(&self) -> Vec<Option<usize>> {
        Vec::new()
    }

    fn views(&self, _rows: Range<usize>) -> Self::Views {}
}

macro_rules! impl_group_args {
    ($n:expr; $($A:ident $i:tt),+) => {
        impl<'a, $($A: ArgColumn<'a>),+> GroupArgs<'a> for ($($A,)+) {
            type Views = ($($A::View,)+);
            const ARITY: usize = $n;

            fn column_lens(&self) -> Vec<Option<usize>> {
                vec![$(self.$i.column_len()),+]
            }

            #[inline]
            fn views(&self, rows: Range<usize>) -> Self::Views {
                ($(self.$i.view(rows.clone()),)+)
            }
        }
    };
}

impl_group_args!(1; A0 0);
impl_group_args!(2; A0 0, A1 1);
impl_group_args!(3; A0 0, A1 1, A2 2);
impl_group_args!(4; A0 0, A1 1, A2 2, A3 3);
impl_group_args!(5; A0 0, A1 1, A2 2, A3 3, A4 4);
impl_group_args!(6; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_group_args!(7; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_group_args!(8; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);
impl_group_args!(9; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8);
impl_group_args!(10; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7, A8 8, A9 9);
