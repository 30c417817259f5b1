//! DECOMPOSE - Split a sum result into one result per summand.

use crate::pattern::{ComputePattern, IndexMaps};

/// Apply DECOMPOSE at result `position`.
///
/// Every map whose result at `position` is a sum has that result replaced by
/// its flattened summands, in order. Maps where the position is out of range,
/// or holds a non-sum, are unchanged. Fails if no map changed.
///
/// # Example
///
/// ```ignore
/// // (d0, d1) -> (d0 + d1)
/// // DECOMPOSE(0)
/// // (d0, d1) -> (d0, d1)
/// ```
pub fn apply(pattern: &ComputePattern, position: usize) -> Option<ComputePattern> {
    let mut changed = false;
    let mut index_maps = IndexMaps::with_capacity(pattern.num_operands());

    for map in pattern.index_maps() {
        match map.result(position) {
            Some(expr) if expr.is_add() => {
                let (before, rest) = map.results().split_at(position);
                let results = before.iter().cloned().chain(expr.summands()).chain(rest[1..].iter().cloned());
                index_maps.push(map.with_results(results).ok()?);
                changed = true;
            }
            _ => index_maps.push(map.clone()),
        }
    }

    if !changed {
        return None;
    }

    Some(ComputePattern::from_parts(index_maps, pattern.iterator_kinds().iter().copied().collect()))
}
