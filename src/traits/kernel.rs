//! # Kernel Trait Module
//!
//! Per-group routines over an [`ArgPack`](crate::ArgPack), for callers whose
//! argument count is only known at run time.
//!
//! A kernel declares a [`Signature`] and is checked against it before any
//! work is dispatched: it must accept trailing arguments, so that absent
//! slots can always be forwarded, and it must not require more positional
//! arguments than were supplied.

use std::marker::PhantomData;

use crate::enums::error::{LexError, LexResult};
use crate::structs::views::arg_pack::GroupViews;
use crate::traits::record::Record;

/// Declared calling convention of a [`Kernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Number of required positional arguments.
    pub positional: usize,
    /// Whether the kernel accepts any number of trailing arguments.
    pub variadic: bool,
}

impl Signature {
    /// `positional` required arguments and no trailing ones.
    #[inline]
    pub const fn fixed(positional: usize) -> Self {
        Self { positional, variadic: false }
    }

    /// `positional` required arguments followed by any number of trailing ones.
    #[inline]
    pub const fn variadic(positional: usize) -> Self {
        Self { positional, variadic: true }
    }

    /// Checks this signature against `supplied` argument positions.
    pub fn accepts(&self, supplied: usize) -> LexResult<()> {
        if !self.variadic {
            return Err(LexError::SignatureMismatch {
                message: format!(
                    "kernel takes exactly {} arguments but must accept trailing arguments",
                    self.positional
                ),
            });
        }
        if self.positional > supplied {
            return Err(LexError::SignatureMismatch {
                message: format!(
                    "kernel requires {} positional arguments, {} supplied",
                    self.positional, supplied
                ),
            });
        }
        Ok(())
    }
}

/// A routine evaluated once per group.
pub trait Kernel<T>: Sync {
    type Output: Record;

    fn signature(&self) -> Signature;

    fn eval(&self, views: &GroupViews<'_, T>) -> Self::Output;
}

/// A closure paired with its declared [`Signature`].
pub struct FnKernel<F, R> {
    signature: Signature,
    f: F,
    _out: PhantomData<fn() -> R>,
}

impl<T, R, F> Kernel<T> for FnKernel<F, R>
where
    R: Record,
    F: Fn(&GroupViews<'_, T>) -> R + Sync,
{
    type Output = R;

    #[inline]
    fn signature(&self) -> Signature {
        self.signature
    }

    #[inline]
    fn eval(&self, views: &GroupViews<'_, T>) -> R {
        (self.f)(views)
    }
}

/// Wraps `f` as a kernel taking `positional` arguments plus trailing ones.
pub fn variadic<T, R, F>(positional: usize, f: F) -> FnKernel<F, R>
where
    R: Record,
    F: Fn(&GroupViews<'_, T>) -> R + Sync,
{
    FnKernel { signature: Signature::variadic(positional), f, _out: PhantomData }
}

/// Wraps `f` as a kernel taking exactly `positional` arguments.
///
/// Such a kernel is always rejected at dispatch.
pub fn fixed<T, R, F>(positional: usize, f: F) -> FnKernel<F, R>
where
    R: Record,
    F: Fn(&GroupViews<'_, T>) -> R + Sync,
{
    FnKernel { signature: Signature::fixed(positional), f, _out: PhantomData }
}
