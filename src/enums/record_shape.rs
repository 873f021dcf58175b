//! # RecordShape Enum Module
//!
//! Companion to [crate::traits::record::Record].
//!
//! Contains the per-group record layouts that a mapped routine can return,
//! and the rules for turning one into the full output shape.

use std::fmt;

/// Layout of the record a routine returns for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordShape {
    /// Single numeric value.
    Scalar,

    /// Fixed-size numeric vector.
    Vector(usize),

    /// Higher-rank tensor with the given dims.
    Tensor(Vec<usize>),

    /// Layout could not be determined from the value.
    Unsupported(&'static str),
}

impl RecordShape {
    /// Number of elements a record of this shape occupies in the output buffer.
    ///
    /// `Unsupported` occupies nothing.
    pub fn n_elems(&self) -> usize {
        match self {
            RecordShape::Scalar => 1,
            RecordShape::Vector(n) => *n,
            RecordShape::Tensor(dims) => dims.iter().product(),
            RecordShape::Unsupported(_) => 0,
        }
    }

    /// Record dims, excluding the leading group axis. Scalars have none.
    pub fn dims(&self) -> Vec<usize> {
        match self {
            RecordShape::Scalar => Vec::new(),
            RecordShape::Vector(n) => vec![*n],
            RecordShape::Tensor(dims) => dims.clone(),
            RecordShape::Unsupported(_) => Vec::new(),
        }
    }

    /// Full output shape for `n_groups` records: `(G,)`, `(G, n)` or `(G, *dims)`.
    pub fn output_dims(&self, n_groups: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(1 + self.dims().len());
        out.push(n_groups);
        out.extend(self.dims());
        out
    }

    /// Record shape for the given record dims, the inverse of [`dims`](Self::dims).
    pub fn from_dims(dims: &[usize]) -> RecordShape {
        match dims {
            [] => RecordShape::Scalar,
            [n] => RecordShape::Vector(*n),
            dims => RecordShape::Tensor(dims.to_vec()),
        }
    }

    /// Normalises tensors of rank 0 and 1 onto the scalar and vector forms,
    /// so that e.g. `Tensor([5])` and `Vector(5)` compare equal after this call.
    pub fn canonical(self) -> RecordShape {
        match self {
            RecordShape::Tensor(dims) => RecordShape::from_dims(&dims),
            other => other,
        }
    }

    /// `true` if the layout can back an output container.
    ///
    /// Zero-sized records are refused: they have no slot to write or verify.
    #[inline]
    pub fn is_supported(&self) -> bool {
        !matches!(self, RecordShape::Unsupported(_)) && self.n_elems() > 0
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShape::Scalar => write!(f, "scalar"),
            RecordShape::Vector(n) => write!(f, "vector[{}]", n),
            RecordShape::Tensor(dims) => write!(f, "tensor{:?}", dims),
            RecordShape::Unsupported(why) => write!(f, "unsupported ({})", why),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dims() {
        assert_eq!(RecordShape::Scalar.output_dims(16), vec![16]);
        assert_eq!(RecordShape::Vector(3).output_dims(16), vec![16, 3]);
        assert_eq!(RecordShape::Tensor(vec![10, 20]).output_dims(16), vec![16, 10, 20]);
    }

    #[test]
    fn test_n_elems_and_support() {
        assert_eq!(RecordShape::Tensor(vec![10, 20]).n_elems(), 200);
        assert!(RecordShape::Tensor(vec![]).is_supported());
        assert!(!RecordShape::Unsupported("none").is_supported());
        assert!(!RecordShape::Vector(0).is_supported());
        assert!(!RecordShape::Tensor(vec![3, 0]).is_supported());
    }

    #[test]
    fn test_canonical_rank1_tensor() {
        assert_eq!(RecordShape::Tensor(vec![4]).canonical(), RecordShape::Vector(4));
        assert_eq!(RecordShape::Tensor(vec![]).canonical(), RecordShape::Scalar);
        assert_eq!(
            RecordShape::Tensor(vec![2, 2]).canonical(),
            RecordShape::Tensor(vec![2, 2])
        );
    }
}
