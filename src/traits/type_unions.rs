use std::fmt::Debug;

use num_traits::{Num, NumCast, ToPrimitive};

/// Trait for types valid as elements of a mapped output.
///
/// Useful when specifying `my_fn::<T: Numeric>() {}`.
///
/// Extends and constrains the *num-traits* `Num` implementation to fit the crate's type universe.
/// `Send + Sync` because output buffers are written from worker threads.
pub trait Numeric:
    Num + NumCast + Copy + Default + ToPrimitive + PartialEq + Debug + Send + Sync + 'static
{
}
impl Numeric for f32 {}
impl Numeric for f64 {}
impl Numeric for i8 {}
impl Numeric for i16 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u8 {}
impl Numeric for u16 {}
impl Numeric for u32 {}
impl Numeric for u64 {}
impl Numeric for usize {}
