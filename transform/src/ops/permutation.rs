//! PERMUTE - Swap two result positions of selected operands.

use super::selects_any;
use crate::mask::OperandMask;
use crate::pattern::{ComputePattern, IndexMaps};

/// Apply PERMUTE to result positions `(p0, p1)` of the operands selected by `mask`.
///
/// Unselected operands are unchanged. Fails if the mask selects no operand, or
/// if a position is out of range for a selected operand. Applying the same
/// permutation twice yields the original pattern.
pub fn apply(pattern: &ComputePattern, positions: (usize, usize), mask: &OperandMask) -> Option<ComputePattern> {
    if !selects_any(pattern, mask) {
        return None;
    }

    let (p0, p1) = positions;
    let index_maps = pattern
        .index_maps()
        .iter()
        .enumerate()
        .map(|(operand, map)| {
            if mask.is_selected(operand) { map.swap_results(p0, p1).ok() } else { Some(map.clone()) }
        })
        .collect::<Option<IndexMaps>>()?;

    Some(ComputePattern::from_parts(index_maps, pattern.iterator_kinds().iter().copied().collect()))
}
