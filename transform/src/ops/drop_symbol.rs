//! DROP_SYMBOL - Pin a symbol and remove it from the domain.
//!
//! The symbol is substituted with constant 1 (UNROLL uses 0), projected out
//! of every domain, and results that collapsed to constant 0 are dropped.

use restruct_affine::AffineExpr;

use super::eliminate;
use crate::pattern::ComputePattern;

/// Apply DROP_SYMBOL to symbol `symbol`.
///
/// Iterator kinds are unchanged. Fails if `symbol` is out of range or if some
/// operand would lose all of its results.
pub fn apply(pattern: &ComputePattern, symbol: usize) -> Option<ComputePattern> {
    if symbol >= pattern.num_symbols() {
        return None;
    }

    let index_maps =
        eliminate(pattern.index_maps(), &AffineExpr::Symbol(symbol), 1, |map| map.project_symbols(&[symbol]))?;

    Some(ComputePattern::from_parts(index_maps, pattern.iterator_kinds().iter().copied().collect()))
}
