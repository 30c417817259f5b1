//! EXPAND_DIMS - Introduce a new iteration dimension.
//!
//! Parallel dimensions are prepended: every existing dimension shifts up by
//! one and selected operands gain `d0` as their first result. Reduction
//! dimensions are appended: nothing is renumbered and selected operands gain
//! the new last dimension as their last result.

use restruct_affine::AffineExpr;

use super::selects_any;
use crate::mask::OperandMask;
use crate::pattern::{ComputePattern, IndexMaps, IteratorKind, IteratorKinds};

/// Apply EXPAND_DIMS with a new dimension of `kind`, indexed by the operands in `mask`.
///
/// Fails if the mask selects no operand.
///
/// # Example
///
/// ```ignore
/// // (d0) -> (d0), (d0) -> (d0)          [parallel]
/// // EXPAND_DIMS(reduction; mask=10)
/// // (d0, d1) -> (d0, d1), (d0, d1) -> (d0)   [parallel, reduction]
/// ```
pub fn apply(pattern: &ComputePattern, kind: IteratorKind, mask: &OperandMask) -> Option<ComputePattern> {
    if !selects_any(pattern, mask) {
        return None;
    }

    let num_dims = pattern.num_dims();
    let mut iterator_kinds: IteratorKinds = pattern.iterator_kinds().iter().copied().collect();
    let (offset, new_dim) = match kind {
        IteratorKind::Parallel => {
            iterator_kinds.insert(0, kind);
            (0, 0)
        }
        IteratorKind::Reduction => {
            iterator_kinds.push(kind);
            (num_dims, num_dims)
        }
    };

    let index_maps = pattern
        .index_maps()
        .iter()
        .enumerate()
        .map(|(operand, map)| {
            let widened = map.shift_dims(1, offset);
            if !mask.is_selected(operand) {
                return Some(widened);
            }
            let position = match kind {
                IteratorKind::Parallel => 0,
                IteratorKind::Reduction => widened.num_results(),
            };
            widened.insert_result(AffineExpr::Dim(new_dim), position).ok()
        })
        .collect::<Option<IndexMaps>>()?;

    Some(ComputePattern::from_parts(index_maps, iterator_kinds))
}
