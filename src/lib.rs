//! Copyright © 2025 Peter Garfield Bower. All rights reserved.
//!
//! # **Lexmap** - *Segmented Parallel Apply over Sorted Columns*
//!
//! Groups rows that are already sorted by one or more key columns into
//! maximal runs of identical key tuples, then applies a pure routine to every
//! run in parallel, one output record per group.
//!
//! Grouping costs a single linear scan, since sorted input makes every group
//! a contiguous row range; there is no hashing and no re-sort.
//!
//! ## Example
//! ```rust
//! use lexmap::{named, LexicographicIndex, MapOptions, ProgressCounter};
//!
//! let a = vec![1, 1, 1, 1, 2, 2];
//! let b = vec![3, 3, 4, 4, 3, 3];
//! let x = vec![0.5, 1.5, 2.0, 2.0, 1.0, 1.0];
//!
//! let index = LexicographicIndex::from_named(&[named("a", a), named("b", b)]).unwrap();
//! assert_eq!(index.len(), 3);
//!
//! let counter = ProgressCounter::new(index.len() as u64);
//! let opts = MapOptions::new().progress(&counter);
//! let means = index
//!     .map_with((&x,), &opts, |(x,)| x.iter().sum::<f64>() / x.len() as f64)
//!     .unwrap();
//! assert_eq!(means.as_slice(), &[1.0, 2.0, 1.0]);
//! assert!(counter.is_done());
//! ```
//!
//! ## Features
//! - `parallel_proc` *(default)*: rayon-backed dispatch. Without it every
//!   operation runs sequentially with identical results.
//! - `vmap64`: memory-mapped `Vec64` buffers.

pub mod enums {
    pub mod error;
    pub mod record_shape;
}

pub mod structs {
    pub mod views {
        pub mod arg_pack;
    }
    pub mod bitmask;
    pub mod column;
    pub mod matrix;
    pub mod tensor;
}

pub mod traits {
    pub mod group_args;
    pub mod kernel;
    pub mod key_column;
    pub mod record;
    pub mod type_unions;
}

pub mod dispatch;
pub mod index;
pub mod progress;
pub mod sortedness;

pub use dispatch::MapOptions;
pub use enums::error::{LexError, LexResult};
pub use enums::record_shape::RecordShape;
pub use index::LexicographicIndex;
pub use progress::{LogProgress, Progress, ProgressCounter};
pub use sortedness::{check_lexicographic, count_runs, is_strictly_increasing, unique_sorted};
pub use structs::bitmask::BoundaryMask;
pub use structs::column::{named, NamedColumn};
pub use structs::matrix::Matrix;
pub use structs::tensor::Tensor;
pub use structs::views::arg_pack::{ArgPack, GroupViews, MAX_ARITY};
pub use traits::group_args::{ArgColumn, GroupArgs};
pub use traits::kernel::{self, FnKernel, Kernel, Signature};
pub use traits::key_column::{KeyColumn, OrdKeyColumn};
pub use traits::record::Record;
pub use traits::type_unions::Numeric;
pub use vec64::Vec64;
