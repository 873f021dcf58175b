//! # **Column Module** - *Named Column Wrapper*
//!
//! Provides the `NamedColumn` type, pairing a column name with its data.
//! Used for order-preserving index construction from labelled key columns,
//! and accepted anywhere a bare argument column is, with identical results.
//!
//! # Example
//! ```rust
//! use lexmap::{named, LexicographicIndex};
//!
//! let run = named("run", vec![1, 1, 2, 2, 2]);
//! let frame = named("frame", vec![5, 6, 6, 6, 7]);
//! let index = LexicographicIndex::from_named(&[run, frame]).unwrap();
//! assert_eq!(index.len(), 4);
//! ```

/// Column data labelled with a name.
///
/// The name is a label only; grouping and slicing look at the data alone.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedColumn<C> {
    name: String,
    data: C,
}

impl<C> NamedColumn<C> {
    /// Create a new named column
    pub fn new(name: impl Into<String>, data: C) -> Self {
        NamedColumn { name: name.into(), data }
    }

    /// Get the column name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the column data
    #[inline]
    pub fn data(&self) -> &C {
        &self.data
    }

    /// Consume and return the column data
    #[inline]
    pub fn into_data(self) -> C {
        self.data
    }
}

/// User-facing constructor for named columns
pub fn named<C>(name: impl Into<String>, data: C) -> NamedColumn<C> {
    NamedColumn::new(name, data)
}

impl<C> AsRef<C> for NamedColumn<C> {
    fn as_ref(&self) -> &C {
        &self.data
    }
}
