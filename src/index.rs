//! # Index Module - *Lexicographic Group Index and Parallel Mapping*
//!
//! [`LexicographicIndex`] partitions pre-sorted rows into maximal runs of
//! identical key tuples and applies a routine to every run in parallel.
//!
//! ## Construction
//! Key columns are scanned once for rows whose key tuple differs from the
//! previous row ([`BoundaryMask`]), and the marks are compacted into an
//! offsets sequence: group `i` spans rows `offsets[i]..offsets[i + 1]`.
//!
//! ## Mapping modes
//! - [`general_map`](LexicographicIndex::general_map): routine sees the group
//!   number and the offsets, and stores its own results.
//! - [`map`](LexicographicIndex::map): the index slices a typed tuple of
//!   argument columns for each group and collects one [`Record`] per group.
//! - [`map_into`](LexicographicIndex::map_into): as `map`, into a
//!   caller-allocated output.
//! - [`map_kernel`](LexicographicIndex::map_kernel): as `map`, for a run-time
//!   number of homogeneous columns through an [`ArgPack`].
//!
//! ## Output inference
//! Group 0 is evaluated once on the calling thread. Its record shape fixes the
//! output layout `(G, *record_dims)`; the output is allocated, every group is
//! then written into its own disjoint slot in parallel, and slot 0 is
//! compared against the first evaluation afterwards.
//!
//! ## Invariants
//! - `offsets.len() >= 2`, `offsets[0] == 0`, last offset is the row count.
//! - Offsets strictly increase, so no group is empty.
//! - The index is immutable once built.

use std::fmt;
use std::ops::Range;

use log::{debug, warn};
use vec64::Vec64;

use crate::dispatch::{self, MapOptions};
use crate::enums::error::{LexError, LexResult};
use crate::enums::record_shape::RecordShape;
use crate::sortedness::check_lexicographic;
use crate::structs::bitmask::BoundaryMask;
use crate::structs::column::NamedColumn;
use crate::structs::matrix::Matrix;
use crate::structs::tensor::Tensor;
use crate::structs::views::arg_pack::ArgPack;
use crate::traits::group_args::GroupArgs;
use crate::traits::kernel::Kernel;
use crate::traits::key_column::{KeyColumn, OrdKeyColumn};
use crate::traits::record::Record;

/// # LexicographicIndex
///
/// Group offsets over rows sorted by one or more key columns.
///
/// ## Example
/// ```rust
/// use lexmap::LexicographicIndex;
///
/// let run = vec![1, 1, 1, 2, 2];
/// let scan = vec![7, 7, 8, 8, 8];
/// let intensity = vec![1.0, 2.0, 3.0, 4.0, 5.0];
///
/// let index = LexicographicIndex::build(&[&run, &scan]).unwrap();
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.group_sizes().as_slice(), &[2, 1, 2]);
///
/// let sums = index.map((&intensity,), |(x,)| x.iter().sum::<f64>()).unwrap();
/// assert_eq!(sums.as_slice(), &[3.0, 3.0, 9.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct LexicographicIndex {
    offsets: Vec64<usize>,
}

impl LexicographicIndex {
    /// Builds the index from key columns of equal length.
    ///
    /// A change in *any* column starts a new group. Input order is trusted;
    /// see [`build_checked`](Self::build_checked) to verify it first.
    pub fn build<C: KeyColumn + ?Sized>(keys: &[&C]) -> LexResult<Self> {
        let mask = BoundaryMask::detect(keys)?;
        let index = Self::validated(mask.to_offsets())?;
        debug!(
            "built lexicographic index: {} rows, {} key columns, {} groups",
            index.n_rows(),
            keys.len(),
            index.len()
        );
        Ok(index)
    }

    /// Verifies lexicographic order, then builds the index.
    pub fn build_checked<C: OrdKeyColumn + ?Sized>(keys: &[&C]) -> LexResult<Self> {
        check_lexicographic(keys)?;
        Self::build(keys)
    }

    /// Builds the index from named columns, in the order given.
    ///
    /// Names are labels only and take no part in grouping.
    pub fn from_named<C: KeyColumn>(keys: &[NamedColumn<C>]) -> LexResult<Self> {
        let cols: Vec<&C> = keys.iter().map(NamedColumn::data).collect();
        Self::build(&cols)
    }

    /// Builds the index from a 2-D key matrix, one key column per matrix column.
    pub fn from_matrix<T: PartialEq + Sync>(keys: &Matrix<T>) -> LexResult<Self> {
        if keys.ncols == 0 || keys.nrows == 0 {
            return Err(LexError::EmptyInput {
                message: format!("key matrix is {} × {}", keys.nrows, keys.ncols),
            });
        }
        Self::build(&keys.columns())
    }

    /// Wraps an already computed offsets sequence.
    ///
    /// Fails with `MalformedIndex` unless it holds at least two offsets,
    /// starts at 0 and strictly increases.
    pub fn from_offsets(offsets: &[usize]) -> LexResult<Self> {
        Self::validated(Vec64::from_slice(offsets))
    }

    fn validated(offsets: Vec64<usize>) -> LexResult<Self> {
        if offsets.len() < 2 {
            return Err(LexError::MalformedIndex {
                message: format!("expected at least 2 offsets, found {}", offsets.len()),
            });
        }
        if offsets[0] != 0 {
            return Err(LexError::MalformedIndex {
                message: format!("first offset must be 0, found {}", offsets[0]),
            });
        }
        if let Some(i) = offsets.windows(2).position(|w| w[0] >= w[1]) {
            return Err(LexError::MalformedIndex {
                message: format!(
                    "offsets must strictly increase: offsets[{}] = {} >= offsets[{}] = {}",
                    i,
                    offsets[i],
                    i + 1,
                    offsets[i + 1]
                ),
            });
        }
        Ok(Self { offsets })
    }

    /// Number of groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Always `false`: a valid index holds at least one group.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of indexed rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// Group offsets, including the trailing row count.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Row range of group `i`. Panics if out of bounds.
    #[inline]
    pub fn group(&self, i: usize) -> Range<usize> {
        self.offsets[i]..self.offsets[i + 1]
    }

    /// Row ranges of all groups, in order.
    pub fn groups(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.offsets.windows(2).map(|w| w[0]..w[1])
    }

    /// Rows per group.
    pub fn group_sizes(&self) -> Vec64<usize> {
        let mut sizes = Vec64::with_capacity(self.len());
        sizes.extend(self.offsets.windows(2).map(|w| w[1] - w[0]));
        sizes
    }

    /// First row of every group, one representative row per group.
    #[inline]
    pub fn unique_row_indices(&self) -> &[usize] {
        &self.offsets[..self.len()]
    }

    /// Group number of every row.
    pub fn group_ids(&self) -> Vec64<usize> {
        let mut ids = Vec64::with_capacity(self.n_rows());
        for (g, rows) in self.groups().enumerate() {
            ids.extend(std::iter::repeat_n(g, rows.len()));
        }
        ids
    }

    /// Runs `f(i, offsets)` for every group `i` on the global pool.
    ///
    /// The routine slices its own inputs and stores its own results, so it
    /// must only touch state owned by group `i` or synchronise itself.
    pub fn general_map<F>(&self, f: F)
    where
        F: Fn(usize, &[usize]) + Sync + Send,
    {
        let offsets = self.offsets();
        dispatch::for_each_group(self.len(), None, |g| f(g, offsets));
    }

    /// [`general_map`](Self::general_map) with explicit options.
    ///
    /// Fails only if a dedicated pool was requested and could not be built.
    pub fn general_map_with<F>(&self, opts: &MapOptions<'_>, f: F) -> LexResult<()>
    where
        F: Fn(usize, &[usize]) + Sync + Send,
    {
        let offsets = self.offsets();
        let n_groups = self.len();
        debug!("general map over {} groups", n_groups);
        dispatch::run(opts, n_groups, |progress| {
            dispatch::for_each_group(n_groups, progress, |g| f(g, offsets))
        })
    }

    /// Applies `f` to every group's views of `args` and collects one record
    /// per group.
    ///
    /// `args` is a tuple of up to ten argument columns, each covering all
    /// indexed rows; `Option` columns slice to `Option` views. The output has
    /// shape `(G,)` for scalar records, `(G, n)` for length-`n` vectors and
    /// `(G, *dims)` for tensors.
    ///
    /// ```rust
    /// use lexmap::LexicographicIndex;
    ///
    /// let key = vec![0, 0, 1, 1, 1];
    /// let x = vec![1i64, 2, 3, 4, 5];
    /// let w: Option<&Vec<i64>> = None;
    ///
    /// let index = LexicographicIndex::build(&[&key]).unwrap();
    /// let out = index
    ///     .map((&x, w), |(x, w)| {
    ///         let scale = w.map_or(1, |w| w[0]);
    ///         [x.iter().sum::<i64>() * scale, x.len() as i64]
    ///     })
    ///     .unwrap();
    /// assert_eq!(out.shape(), &[2, 2]);
    /// assert_eq!(out.record(1), &[12, 3]);
    /// ```
    pub fn map<'a, A, R, F>(&self, args: A, f: F) -> LexResult<Tensor<R::Elem>>
    where
        A: GroupArgs<'a>,
        R: Record,
        F: Fn(A::Views) -> R + Sync,
    {
        self.map_with(args, &MapOptions::default(), f)
    }

    /// [`map`](Self::map) with explicit options.
    pub fn map_with<'a, A, R, F>(
        &self,
        args: A,
        opts: &MapOptions<'_>,
        f: F,
    ) -> LexResult<Tensor<R::Elem>>
    where
        A: GroupArgs<'a>,
        R: Record,
        F: Fn(A::Views) -> R + Sync,
    {
        self.check_args(&args)?;
        self.collect(opts, |g| f(args.views(self.group(g))))
    }

    /// Applies `f` to every group and writes the records into `out`.
    ///
    /// `out` must hold one record per group along its leading axis; its
    /// remaining axes give the record layout every group must return.
    /// Group 0 is evaluated first and only validated against that layout.
    /// `out` is only written once every group has succeeded; on `Err` it
    /// keeps its previous contents.
    pub fn map_into<'a, A, R, F>(
        &self,
        args: A,
        out: &mut Tensor<R::Elem>,
        opts: &MapOptions<'_>,
        f: F,
    ) -> LexResult<()>
    where
        A: GroupArgs<'a>,
        R: Record,
        F: Fn(A::Views) -> R + Sync,
    {
        self.check_args(&args)?;
        let n_groups = self.len();
        let found = if out.ndim() == 0 { 0 } else { out.n_records() };
        if found != n_groups {
            return Err(LexError::OutputLengthMismatch { expected: n_groups, found });
        }
        let expected = RecordShape::from_dims(&out.shape()[1..]);
        if !expected.is_supported() {
            return Err(LexError::UnsupportedResult {
                message: format!("output records are {} elements wide", expected.n_elems()),
            });
        }

        let eval = |g: usize| f(args.views(self.group(g)));
        let first = eval(0);
        let shape = first.shape().canonical();
        if shape != expected {
            return Err(LexError::ShapeMismatch { group: 0, expected, found: shape });
        }
        let mut scratch = Tensor::zeros(out.shape().to_vec());
        self.fill(&mut scratch, &first, &expected, opts, &eval)?;
        out.as_mut_slice().copy_from_slice(scratch.as_slice());
        Ok(())
    }

    /// Applies `kernel` to every group's views of `columns`.
    ///
    /// Fails with `ArityExceeded` for more than [`MAX_ARITY`](crate::MAX_ARITY)
    /// columns and with `SignatureMismatch` if the kernel does not accept
    /// trailing arguments or requires more than were supplied.
    ///
    /// ```rust
    /// use lexmap::{kernel, GroupViews, LexicographicIndex};
    ///
    /// let key = vec![1, 1, 2];
    /// let a = vec![1.0, 2.0, 3.0];
    /// let b = vec![10.0, 20.0, 30.0];
    ///
    /// let index = LexicographicIndex::build(&[&key]).unwrap();
    /// let total = kernel::variadic(0, |v: &GroupViews<'_, f64>| {
    ///     v.present().flatten().sum::<f64>()
    /// });
    /// let out = index.map_kernel(&total, &[a.as_slice(), b.as_slice()]).unwrap();
    /// assert_eq!(out.as_slice(), &[33.0, 33.0]);
    /// ```
    pub fn map_kernel<T, K>(
        &self,
        kernel: &K,
        columns: &[&[T]],
    ) -> LexResult<Tensor<<K::Output as Record>::Elem>>
    where
        T: Sync,
        K: Kernel<T>,
    {
        self.map_kernel_with(kernel, columns, &MapOptions::default())
    }

    /// [`map_kernel`](Self::map_kernel) with explicit options.
    pub fn map_kernel_with<T, K>(
        &self,
        kernel: &K,
        columns: &[&[T]],
        opts: &MapOptions<'_>,
    ) -> LexResult<Tensor<<K::Output as Record>::Elem>>
    where
        T: Sync,
        K: Kernel<T>,
    {
        let pack = ArgPack::new(columns)?;
        self.map_pack_with(kernel, &pack, opts)
    }

    /// Applies `kernel` over a prepared [`ArgPack`], which may carry absent slots.
    pub fn map_pack_with<T, K>(
        &self,
        kernel: &K,
        pack: &ArgPack<'_, T>,
        opts: &MapOptions<'_>,
    ) -> LexResult<Tensor<<K::Output as Record>::Elem>>
    where
        T: Sync,
        K: Kernel<T>,
    {
        kernel.signature().accepts(pack.n_args())?;
        pack.check_rows(self.n_rows())?;
        self.collect(opts, |g| kernel.eval(&pack.views(self.group(g))))
    }

    fn check_args<'a, A: GroupArgs<'a>>(&self, args: &A) -> LexResult<()> {
        let n_rows = self.n_rows();
        for (arg, len) in args.column_lens().into_iter().enumerate() {
            match len {
                Some(found) if found != n_rows => {
                    return Err(LexError::ArgumentLengthMismatch { arg, expected: n_rows, found });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Infers the output layout from group 0, allocates, and fills.
    fn collect<R, E>(&self, opts: &MapOptions<'_>, eval: E) -> LexResult<Tensor<R::Elem>>
    where
        R: Record,
        E: Fn(usize) -> R + Sync,
    {
        let first = eval(0);
        let shape = first.shape().canonical();
        if !shape.is_supported() {
            return Err(LexError::UnsupportedResult {
                message: format!("group 0 returned a {} record", shape),
            });
        }
        let mut out = Tensor::zeros(shape.output_dims(self.len()));
        self.fill(&mut out, &first, &shape, opts, &eval)?;
        Ok(out)
    }

    /// Writes every group's record into its slot of `out`, then checks slot 0
    /// against `first` when `opts.verify_first` is set.
    fn fill<R, E>(
        &self,
        out: &mut Tensor<R::Elem>,
        first: &R,
        shape: &RecordShape,
        opts: &MapOptions<'_>,
        eval: &E,
    ) -> LexResult<()>
    where
        R: Record,
        E: Fn(usize) -> R + Sync,
    {
        let n_groups = self.len();
        let rec_len = shape.n_elems();
        debug!("mapping {} groups to {} records", n_groups, shape);

        let slots = out.as_mut_slice();
        dispatch::run(opts, n_groups, |progress| {
            dispatch::try_for_each_slot(slots, rec_len, progress, |g, slot| {
                let rec = eval(g);
                let found = rec.shape().canonical();
                if found != *shape {
                    return Err(LexError::ShapeMismatch {
                        group: g,
                        expected: shape.clone(),
                        found,
                    });
                }
                rec.write_to(slot);
                Ok(())
            })
        })??;

        if opts.verify_first && !first.matches(out.record(0)) {
            warn!("group 0 record differs between first evaluation and parallel pass");
            return Err(LexError::ConsistencyViolation { group: 0 });
        }
        Ok(())
    }
}

impl fmt::Debug for LexicographicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicographicIndex")
            .field("n_rows", &self.n_rows())
            .field("groups", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::kernel;
    use crate::progress::ProgressCounter;
    use crate::structs::column::named;
    use crate::structs::views::arg_pack::GroupViews;

    fn sample() -> (Vec<i32>, Vec<i32>) {
        (vec![1, 1, 1, 2, 2, 3], vec![0, 0, 1, 1, 1, 1])
    }

    #[test]
    fn test_build_and_accessors() {
        let (a, b) = sample();
        let idx = LexicographicIndex::build(&[&a, &b]).unwrap();
        assert_eq!(idx.offsets(), &[0, 2, 3, 5, 6]);
        assert_eq!(idx.len(), 4);
        assert!(!idx.is_empty());
        assert_eq!(idx.n_rows(), 6);
        assert_eq!(idx.group(1), 2..3);
        assert_eq!(idx.groups().collect::<Vec<_>>(), vec![0..2, 2..3, 3..5, 5..6]);
        assert_eq!(idx.group_sizes().as_slice(), &[2, 1, 2, 1]);
        assert_eq!(idx.unique_row_indices(), &[0, 2, 3, 5]);
        assert_eq!(idx.group_ids().as_slice(), &[0, 0, 1, 2, 2, 3]);
    }

    #[test]
    fn test_construction_entry_points_agree() {
        let (a, b) = sample();
        let raw = LexicographicIndex::build(&[&a, &b]).unwrap();
        let by_name =
            LexicographicIndex::from_named(&[named("a", a.clone()), named("b", b.clone())])
                .unwrap();
        let m = Matrix::from([a, b].as_slice());
        let by_matrix = LexicographicIndex::from_matrix(&m).unwrap();
        assert_eq!(raw, by_name);
        assert_eq!(raw, by_matrix);
    }

    #[test]
    fn test_build_checked_rejects_unsorted() {
        let a = vec![2, 1, 1];
        assert_eq!(LexicographicIndex::build_checked(&[&a]), Err(LexError::NotSorted { row: 1 }));
        // Plain build trusts its input.
        assert_eq!(LexicographicIndex::build(&[&a]).unwrap().len(), 2);
    }

    #[test]
    fn test_nan_keys_start_new_groups() {
        let a = vec![1.0, f64::NAN, f64::NAN, 2.0];
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn test_from_offsets_validation() {
        assert!(LexicographicIndex::from_offsets(&[0, 3, 4]).is_ok());
        for bad in [&[][..], &[0][..], &[1, 3][..], &[0, 2, 2][..], &[0, 3, 1][..]] {
            assert!(matches!(
                LexicographicIndex::from_offsets(bad),
                Err(LexError::MalformedIndex { .. })
            ));
        }
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let m: Matrix<i32> = Matrix::from_flat(Vec64::new(), 0, 2);
        assert!(matches!(LexicographicIndex::from_matrix(&m), Err(LexError::EmptyInput { .. })));
    }

    #[test]
    fn test_map_scalar_and_vector() {
        let (a, b) = sample();
        let idx = LexicographicIndex::build(&[&a, &b]).unwrap();
        let x: Vec<f64> = (0..6).map(|v| v as f64).collect();

        let sums = idx.map((&x,), |(x,)| x.iter().sum::<f64>()).unwrap();
        assert_eq!(sums.shape(), &[4]);
        assert_eq!(sums.as_slice(), &[1.0, 2.0, 7.0, 5.0]);

        let stats = idx
            .map((&x,), |(x,)| [x.len() as f64, x.iter().cloned().fold(f64::MIN, f64::max)])
            .unwrap();
        assert_eq!(stats.shape(), &[4, 2]);
        assert_eq!(stats.record(2), &[2.0, 4.0]);
    }

    #[test]
    fn test_map_zero_arity() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let ones = idx.map((), |()| 1u32).unwrap();
        assert_eq!(ones.as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn test_map_argument_length_mismatch() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let short = vec![1.0f32; 5];
        let err = idx.map((&a, &short), |(_, s)| s.len() as f32).unwrap_err();
        assert_eq!(err, LexError::ArgumentLengthMismatch { arg: 1, expected: 6, found: 5 });
    }

    #[test]
    fn test_map_unsupported_and_mismatched_shapes() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();

        let err = idx.map((), |()| Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, LexError::UnsupportedResult { .. }));

        let err = idx.map((), |()| None::<f64>).unwrap_err();
        assert!(matches!(err, LexError::UnsupportedResult { .. }));

        let err = idx.map((&a,), |(rows,)| vec![0i64; rows.len()]).unwrap_err();
        assert!(matches!(err, LexError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_map_into_validates_layout() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let opts = MapOptions::default();

        let mut out = Tensor::<i32>::zeros(vec![3, 2]);
        idx.map_into((&a,), &mut out, &opts, |(k,)| [k[0], k.len() as i32]).unwrap();
        assert_eq!(out.as_slice(), &[1, 3, 2, 2, 3, 1]);

        let mut wrong_len = Tensor::<i32>::zeros(vec![2, 2]);
        assert_eq!(
            idx.map_into((&a,), &mut wrong_len, &opts, |(k,)| [k[0], 0]),
            Err(LexError::OutputLengthMismatch { expected: 3, found: 2 })
        );

        let mut wrong_shape = Tensor::<i32>::zeros(vec![3, 3]);
        assert!(matches!(
            idx.map_into((&a,), &mut wrong_shape, &opts, |(k,)| [k[0], 0]),
            Err(LexError::ShapeMismatch { group: 0, .. })
        ));
    }

    #[test]
    fn test_map_into_keeps_output_on_error() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let mut out = Tensor::from_flat(Vec64::from_slice(&[7i32; 6]), vec![3, 2]);

        // group 0 matches the layout, later groups widen to three elements
        let res = idx.map_into((&a,), &mut out, &MapOptions::default(), |(k,)| {
            vec![k[0]; if k[0] == 1 { 2 } else { 3 }]
        });
        assert!(matches!(res, Err(LexError::ShapeMismatch { group: 1 | 2, .. })));
        assert_eq!(out.as_slice(), &[7; 6]);
    }

    #[test]
    fn test_consistency_check_catches_first_record_drift() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let evaluated = AtomicBool::new(false);

        // the out-of-band evaluation of group 0 sees a different value than the parallel pass
        let drifting = |(k,): (&[i32],)| {
            let offset = if evaluated.swap(true, Ordering::SeqCst) { 100 } else { 0 };
            k.len() as i32 + offset
        };

        assert_eq!(idx.map((&a,), drifting), Err(LexError::ConsistencyViolation { group: 0 }));

        evaluated.store(false, Ordering::SeqCst);
        let opts = MapOptions::new().verify_first(false);
        let out = idx.map_with((&a,), &opts, drifting).unwrap();
        assert_eq!(out.as_slice(), &[103, 102, 101]);
    }

    #[test]
    fn test_map_kernel_rules() {
        let (a, _) = sample();
        let idx = LexicographicIndex::build(&[&a]).unwrap();
        let x = vec![1.0f64; 6];

        let count = kernel::variadic(1, |v: &GroupViews<'_, f64>| {
            v.get(0).map_or(0.0, |s| s.len() as f64)
        });
        let out = idx.map_kernel(&count, &[x.as_slice()]).unwrap();
        assert_eq!(out.as_slice(), &[3.0, 2.0, 1.0]);

        let strict = kernel::fixed(1, |v: &GroupViews<'_, f64>| v.group_len() as f64);
        assert!(matches!(
            idx.map_kernel(&strict, &[x.as_slice()]),
            Err(LexError::SignatureMismatch { .. })
        ));

        let greedy = kernel::variadic(2, |v: &GroupViews<'_, f64>| v.group_len() as f64);
        assert!(matches!(
            idx.map_kernel(&greedy, &[x.as_slice()]),
            Err(LexError::SignatureMismatch { .. })
        ));

        let many: Vec<&[f64]> = vec![x.as_slice(); 11];
        assert!(matches!(
            idx.map_kernel(&count, &many),
            Err(LexError::ArityExceeded { max: 10, found: 11 })
        ));
    }

    #[test]
    fn test_general_map_and_progress() {
        let (a, b) = sample();
        let idx = LexicographicIndex::build(&[&a, &b]).unwrap();
        let rows = AtomicUsize::new(0);
        idx.general_map(|g, offsets| {
            rows.fetch_add(offsets[g + 1] - offsets[g], Ordering::Relaxed);
        });
        assert_eq!(rows.load(Ordering::Relaxed), 6);

        let counter = ProgressCounter::new(idx.len() as u64);
        let opts = MapOptions::new().progress(&counter);
        idx.general_map_with(&opts, |_, _| {}).unwrap();
        assert!(counter.is_done());
        assert_eq!(counter.count(), 4);
    }
}
