//! Transform labels.
//!
//! A [`Transform`] names one structural rewrite together with its parameters.
//! Labels are what the transform tree records and what callers replay.
use std::fmt;

use crate::mask::OperandMask;
use crate::ops::apply_transform;
use crate::pattern::{ComputePattern, IteratorKind};

/// A structural rewrite operator and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// Pin a dimension to its first iteration and remove it.
    Unroll { dim: usize },
    /// Pin a symbol to 1 and remove it.
    DropSymbol { symbol: usize },
    /// Fold `dim2` into the adjacent `dim1`.
    MergeDims { dim1: usize, dim2: usize },
    /// Swap two result positions of the selected operands.
    Permutation { positions: (usize, usize), mask: OperandMask },
    /// Add a new iteration dimension, indexing the selected operands with it.
    ExpandDims { kind: IteratorKind, mask: OperandMask },
    /// Split a sum result into one result per summand.
    DecomposeExpr { position: usize },
}

impl Transform {
    pub fn unroll(dim: usize) -> Self {
        Self::Unroll { dim }
    }

    pub fn drop_symbol(symbol: usize) -> Self {
        Self::DropSymbol { symbol }
    }

    pub fn merge_dims(dim1: usize, dim2: usize) -> Self {
        Self::MergeDims { dim1, dim2 }
    }

    pub fn permutation(positions: (usize, usize), mask: OperandMask) -> Self {
        Self::Permutation { positions, mask }
    }

    pub fn expand_dims(kind: IteratorKind, mask: OperandMask) -> Self {
        Self::ExpandDims { kind, mask }
    }

    pub fn decompose_expr(position: usize) -> Self {
        Self::DecomposeExpr { position }
    }

    /// Operator name, without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unroll { .. } => "UNROLL",
            Self::DropSymbol { .. } => "DROP_SYMBOL",
            Self::MergeDims { .. } => "MERGE_DIMS",
            Self::Permutation { .. } => "PERMUTE",
            Self::ExpandDims { .. } => "EXPAND_DIMS",
            Self::DecomposeExpr { .. } => "DECOMPOSE",
        }
    }

    /// Apply this rewrite to `pattern`.
    ///
    /// `None` means the operator does not apply to this pattern, or would leave
    /// some operand without any result.
    pub fn apply(&self, pattern: &ComputePattern) -> Option<ComputePattern> {
        apply_transform(pattern, self)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Self::Unroll { dim } => write!(f, "d{dim}"),
            Self::DropSymbol { symbol } => write!(f, "s{symbol}"),
            Self::MergeDims { dim1, dim2 } => write!(f, "d{dim1}, d{dim2}"),
            Self::Permutation { positions: (p0, p1), mask } => write!(f, "{p0}, {p1}; mask={mask}"),
            Self::ExpandDims { kind, mask } => write!(f, "{kind}; mask={mask}"),
            Self::DecomposeExpr { position } => write!(f, "{position}"),
        }?;
        write!(f, ")")
    }
}
