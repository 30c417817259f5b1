use restruct_affine::{AffineMap, dim, symbol};

use crate::error::TransformError;
use crate::test::helpers::{parallel, pattern};
use crate::{ComputePattern, IteratorKind};

#[test]
fn test_new_rejects_empty_pattern() {
    let err = ComputePattern::new(Vec::<AffineMap>::new(), parallel(1)).unwrap_err();
    assert_eq!(err, TransformError::EmptyPattern);
}

#[test]
fn test_new_rejects_dimension_mismatch() {
    let maps = [AffineMap::identity(2), AffineMap::identity(3)];
    let err = ComputePattern::new(maps, parallel(2)).unwrap_err();
    assert_eq!(err, TransformError::DimensionCountMismatch { operand: 1, num_dims: 3, num_iterators: 2 });
}

#[test]
fn test_new_rejects_symbol_mismatch() {
    let maps = [AffineMap::new(1, 1, [dim(0) + symbol(0)]).unwrap(), AffineMap::identity(1)];
    let err = ComputePattern::new(maps, parallel(1)).unwrap_err();
    assert_eq!(err, TransformError::SymbolCountMismatch { operand: 1, num_symbols: 0, expected: 1 });
}

#[test]
fn test_from_results_wraps_affine_errors() {
    let err = ComputePattern::from_results(0, [vec![dim(0)], vec![dim(2)]], parallel(2)).unwrap_err();
    match err {
        TransformError::InvalidIndexMap { operand, source } => {
            assert_eq!(operand, 1);
            assert_eq!(source, restruct_affine::Error::DimOutOfRange { position: 2, num_dims: 2 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_accessors() {
    let p = pattern(
        1,
        [vec![dim(0) + symbol(0), dim(2)], vec![dim(2), dim(1)], vec![dim(0)]],
        [IteratorKind::Parallel, IteratorKind::Parallel, IteratorKind::Reduction],
    );
    assert_eq!(p.num_operands(), 3);
    assert_eq!(p.num_dims(), 3);
    assert_eq!(p.num_symbols(), 1);
    assert_eq!(p.max_num_results(), 2);
    assert_eq!(p.index_map(2).map(AffineMap::num_results), Some(1));
    assert!(p.index_map(3).is_none());
}

#[test]
fn test_equality_is_structural_and_ordered() {
    let a = pattern(0, [[dim(0), dim(1)]], parallel(2));
    let b = pattern(0, [[dim(0), dim(1)]], parallel(2));
    let swapped = pattern(0, [[dim(1), dim(0)]], parallel(2));
    let other_kinds = pattern(0, [[dim(0), dim(1)]], [IteratorKind::Parallel, IteratorKind::Reduction]);

    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, swapped);
    assert_ne!(a, other_kinds);
}

#[test]
fn test_display() {
    let p = pattern(0, [vec![dim(0), dim(1)], vec![dim(1)]], [IteratorKind::Parallel, IteratorKind::Reduction]);
    assert_eq!(p.to_string(), "maps=[(d0, d1) -> (d0, d1), (d0, d1) -> (d1)], iterators=[parallel, reduction]");
}
