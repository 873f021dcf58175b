//! # Record Trait Module
//!
//! What a mapped routine may return for one group.
//!
//! The return type is known statically, but its *size* may not be (a `Vec<T>`
//! can hold any number of values), so every record reports its
//! [`RecordShape`] and writes itself into a pre-sized output slot. The index
//! evaluates group 0 once to learn the shape, allocates the output, and then
//! checks every later record against that shape.

use vec64::Vec64;

use crate::enums::record_shape::RecordShape;
use crate::structs::tensor::Tensor;
use crate::traits::type_unions::Numeric;

/// A per-group result that can be stored in an output [`Tensor`].
pub trait Record {
    /// Element type of the output container.
    type Elem: Numeric;

    /// Layout of this record.
    fn shape(&self) -> RecordShape;

    /// Writes the record into `dst`, which holds exactly `shape().n_elems()` elements.
    fn write_to(&self, dst: &mut [Self::Elem]);

    /// `true` if `slot` holds exactly what [`write_to`](Record::write_to) would write.
    ///
    /// NaN is treated as equal to NaN so that a record containing NaN still
    /// passes the self-consistency check.
    fn matches(&self, slot: &[Self::Elem]) -> bool {
        if slot.len() != self.shape().n_elems() {
            return false;
        }
        let mut expected = vec![Self::Elem::default(); slot.len()];
        self.write_to(&mut expected);
        expected.iter().zip(slot).all(|(a, b)| same_value(*a, *b))
    }
}

#[inline]
fn same_value<T: Numeric>(a: T, b: T) -> bool {
    #[allow(clippy::eq_op)]
    let both_nan = a != a && b != b;
    a == b || both_nan
}

macro_rules! impl_scalar_record {
    ($($t:ty),+) => {
        $(
            impl Record for $t {
                type Elem = $t;

                #[inline]
                fn shape(&self) -> RecordShape {
                    RecordShape::Scalar
                }

                #[inline]
                fn write_to(&self, dst: &mut [$t]) {
                    dst[0] = *self;
                }
            }
        )+
    };
}

impl_scalar_record!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl<T: Numeric, const N: usize> Record for [T; N] {
    type Elem = T;

    #[inline]
    fn shape(&self) -> RecordShape {
        RecordShape::Vector(N)
    }

    #[inline]
    fn write_to(&self, dst: &mut [T]) {
        dst.copy_from_slice(self);
    }
}

impl<T: Numeric> Record for Vec<T> {
    type Elem = T;

    #[inline]
    fn shape(&self) -> RecordShape {
        RecordShape::Vector(self.len())
    }

    #[inline]
    fn write_to(&self, dst: &mut [T]) {
        dst.copy_from_slice(self);
    }
}

impl<T: Numeric> Record for Vec64<T> {
    type Elem = T;

    #[inline]
    fn shape(&self) -> RecordShape {
        let s: &[T] = self;
        RecordShape::Vector(s.len())
    }

    #[inline]
    fn write_to(&self, dst: &mut [T]) {
        dst.copy_from_slice(self);
    }
}

impl<T: Numeric> Record for Tensor<T> {
    type Elem = T;

    /// Rank-0 and rank-1 tensors report as scalar and vector records.
    fn shape(&self) -> RecordShape {
        RecordShape::from_dims(self.shape())
    }

    #[inline]
    fn write_to(&self, dst: &mut [T]) {
        dst.copy_from_slice(self.as_slice());
    }
}

/// `None` carries no layout, so a routine returning it for group 0
/// fails with [`LexError::UnsupportedResult`](crate::LexError::UnsupportedResult),
/// and for any later group with a shape mismatch.
impl<R: Record> Record for Option<R> {
    type Elem = R::Elem;

    fn shape(&self) -> RecordShape {
        match self {
            Some(r) => r.shape(),
            None => RecordShape::Unsupported("routine returned None"),
        }
    }

    #[inline]
    fn write_to(&self, dst: &mut [R::Elem]) {
        if let Some(r) = self {
            r.write_to(dst);
        }
    }
}
