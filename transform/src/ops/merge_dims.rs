//! MERGE_DIMS - Fold two adjacent dimensions of the same kind into one.
//!
//! The merge is realized by unrolling `dim2`. This only preserves indexing
//! when every operand either ignores both dimensions or indexes them as two
//! neighbouring plain results, `d1` right before `d2`.

use restruct_affine::AffineExpr;

use super::unroll;
use crate::pattern::ComputePattern;

/// Apply MERGE_DIMS to `dim1` and `dim2`.
///
/// # Validation
///
/// - both dimensions exist, are distinct, and have the same iterator kind
/// - for every map, either:
///   - neither dimension is a result and neither occurs inside any result, or
///   - both are plain results with `dim1` immediately before `dim2`
///
/// Any other layout (only one present, non-adjacent, reversed, or used inside
/// a compound expression) fails. Failures of the final UNROLL propagate.
///
/// # Example
///
/// ```ignore
/// // (d0, d1, d2) -> (d0, d1, d2)   [parallel, parallel, reduction]
/// // MERGE_DIMS(d0, d1)
/// // (d0, d1)     -> (d0, d1)       [parallel, reduction]
/// ```
pub fn apply(pattern: &ComputePattern, dim1: usize, dim2: usize) -> Option<ComputePattern> {
    let kinds = pattern.iterator_kinds();
    if dim1 == dim2 || dim1 >= kinds.len() || dim2 >= kinds.len() {
        return None;
    }
    if kinds[dim1] != kinds[dim2] {
        return None;
    }

    let first = AffineExpr::Dim(dim1);
    let second = AffineExpr::Dim(dim2);
    for map in pattern.index_maps() {
        match (map.result_position(&first), map.result_position(&second)) {
            (Some(p1), Some(p2)) if p1 + 1 == p2 => {}
            (Some(_), _) | (_, Some(_)) => return None,
            (None, None) => {
                // Neither is a plain result, so any use is embedded in a compound result.
                if map.is_function_of_dim(dim1) || map.is_function_of_dim(dim2) {
                    return None;
                }
            }
        }
    }

    unroll::apply(pattern, dim2)
}
