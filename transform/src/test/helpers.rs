//! Shared builders for transform tests.

use restruct_affine::AffineExpr;

use crate::{ComputePattern, IteratorKind, Transform, TransformNode};

/// Build a pattern from raw result lists, panicking on invalid input.
pub fn pattern<R>(
    num_symbols: usize,
    operands: impl IntoIterator<Item = R>,
    iterator_kinds: impl IntoIterator<Item = IteratorKind>,
) -> ComputePattern
where
    R: IntoIterator<Item = AffineExpr>,
{
    ComputePattern::from_results(num_symbols, operands, iterator_kinds).unwrap()
}

pub fn parallel(n: usize) -> Vec<IteratorKind> {
    vec![IteratorKind::Parallel; n]
}

/// Rendered labels, for readable assertions on transform sequences.
pub fn labels<'a>(transforms: impl IntoIterator<Item = &'a Transform>) -> Vec<String> {
    transforms.into_iter().map(Transform::to_string).collect()
}

/// True if every leaf below `node` is terminal.
pub fn leaves_are_terminal(node: &TransformNode) -> bool {
    if node.children().is_empty() {
        return node.is_terminal();
    }
    node.children().iter().all(leaves_are_terminal)
}
