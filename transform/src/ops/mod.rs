//! Structural rewrite operators.
//!
//! Each module implements one operator as a pure function from a pattern to
//! an optional pattern:
//! - `unroll`: Pin a dimension to 0 and eliminate it
//! - `drop_symbol`: Pin a symbol to 1 and eliminate it
//! - `merge_dims`: Fold an adjacent same-kind dimension into its neighbour
//! - `permutation`: Swap two results of selected operands
//! - `expand_dims`: Introduce a parallel or reduction dimension
//! - `decompose_expr`: Split a sum result into its summands
//!
//! `None` is an ordinary search outcome, not an error: the operator is
//! inapplicable or would produce an operand without results.

pub mod decompose_expr;
pub mod drop_symbol;
pub mod expand_dims;
pub mod merge_dims;
pub mod permutation;
pub mod unroll;

use itertools::Itertools;
use restruct_affine::{AffineExpr, AffineMap};
use smallvec::SmallVec;

use crate::mask::OperandMask;
use crate::pattern::{ComputePattern, IndexMaps};
use crate::types::Transform;

/// Apply a transform to a pattern.
///
/// Dispatches to the operator implementation named by the label.
pub fn apply_transform(pattern: &ComputePattern, transform: &Transform) -> Option<ComputePattern> {
    match transform {
        Transform::Unroll { dim } => unroll::apply(pattern, *dim),
        Transform::DropSymbol { symbol } => drop_symbol::apply(pattern, *symbol),
        Transform::MergeDims { dim1, dim2 } => merge_dims::apply(pattern, *dim1, *dim2),
        Transform::Permutation { positions, mask } => permutation::apply(pattern, *positions, mask),
        Transform::ExpandDims { kind, mask } => expand_dims::apply(pattern, *kind, mask),
        Transform::DecomposeExpr { position } => decompose_expr::apply(pattern, *position),
    }
}

/// Substitute `variable` with `value` in every map, project it out of the
/// domain with `project`, and drop results that collapsed to constant 0.
///
/// Returns `None` as soon as one map would lose all of its results.
fn eliminate(
    index_maps: &[AffineMap],
    variable: &AffineExpr,
    value: i64,
    project: impl Fn(&AffineMap) -> AffineMap,
) -> Option<IndexMaps> {
    let replacement = AffineExpr::Constant(value);
    index_maps
        .iter()
        .map(|map| {
            let projected = project(&map.replace(variable, &replacement));
            let collapsed: SmallVec<[usize; 4]> = projected.results().iter().positions(|r| r.is_constant_value(0)).collect();
            if collapsed.len() == projected.num_results() {
                return None;
            }
            Some(projected.drop_results(&collapsed))
        })
        .collect()
}

/// True if `mask` selects at least one of the pattern's operands.
fn selects_any(pattern: &ComputePattern, mask: &OperandMask) -> bool {
    mask.selected().any(|operand| operand < pattern.num_operands())
}
