//! UNROLL - Pin a dimension to its first iteration.
//!
//! The dimension is substituted with constant 0 and projected out of every
//! domain; later dimensions renumber down by one. Results that only indexed
//! through the dimension collapse to 0 and are dropped.

use restruct_affine::AffineExpr;

use super::eliminate;
use crate::pattern::{ComputePattern, IteratorKinds};

/// Apply UNROLL to dimension `dim`.
///
/// # Failure
///
/// - `dim` is not a dimension of the pattern
/// - some operand would lose all of its results
///
/// # Example
///
/// ```ignore
/// // (d0, d1) -> (d0, d1)   [parallel, parallel]
/// // UNROLL(d1)
/// // (d0)     -> (d0)       [parallel]
/// ```
pub fn apply(pattern: &ComputePattern, dim: usize) -> Option<ComputePattern> {
    if dim >= pattern.num_dims() {
        return None;
    }

    let index_maps = eliminate(pattern.index_maps(), &AffineExpr::Dim(dim), 0, |map| map.project_dims(&[dim]))?;

    let mut iterator_kinds: IteratorKinds = pattern.iterator_kinds().iter().copied().collect();
    iterator_kinds.remove(dim);

    Some(ComputePattern::from_parts(index_maps, iterator_kinds))
}
