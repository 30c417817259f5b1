//! Algebraic laws of the rewrite operators.

use proptest::prelude::*;
use restruct_affine::{AffineExpr, AffineMap};

use crate::ops::{decompose_expr, expand_dims, merge_dims, permutation, unroll};
use crate::test::property::generators::*;
use crate::{ComputePattern, IteratorKind, OperandMask};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Pattern equality is reflexive and symmetric.
    #[test]
    fn equality_reflexive_and_symmetric(a in arb_pattern(3, 1, 3, 3), b in arb_pattern(3, 1, 3, 3)) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
    }

    /// Applying the same permutation twice restores the pattern.
    #[test]
    fn permutation_self_inverse((p, mask) in arb_pattern_with_mask(), p0 in 0usize..3, p1 in 0usize..3) {
        if let Some(once) = permutation::apply(&p, (p0, p1), &mask) {
            prop_assert_eq!(permutation::apply(&once, (p0, p1), &mask), Some(p));
        }
    }

    /// A new parallel dimension used by every operand is exactly undone by unrolling it.
    #[test]
    fn expand_parallel_then_unroll_restores(p in arb_nonzero_pattern(3, 1, 3, 3)) {
        let mask = OperandMask::all(p.num_operands());
        let expanded = expand_dims::apply(&p, IteratorKind::Parallel, &mask).unwrap();
        prop_assert_eq!(expanded.num_dims(), p.num_dims() + 1);
        prop_assert_eq!(unroll::apply(&expanded, 0), Some(p));
    }

    /// A new reduction dimension is always the last one.
    #[test]
    fn expand_reduction_appends((p, mask) in arb_pattern_with_mask()) {
        let expanded = expand_dims::apply(&p, IteratorKind::Reduction, &mask).unwrap();
        let last = p.num_dims();
        prop_assert_eq!(expanded.iterator_kinds().last(), Some(&IteratorKind::Reduction));
        for (operand, map) in expanded.index_maps().iter().enumerate() {
            let original = p.index_map(operand).unwrap();
            if mask.is_selected(operand) {
                prop_assert_eq!(map.num_results(), original.num_results() + 1);
                prop_assert_eq!(map.results().last(), Some(&AffineExpr::Dim(last)));
            } else {
                prop_assert_eq!(map.results(), original.results());
            }
        }
    }

    /// Unroll either fails or leaves every operand with at least one result.
    #[test]
    fn unroll_never_degenerate(p in arb_pattern(3, 1, 3, 3), d in 0usize..3) {
        if let Some(result) = unroll::apply(&p, d) {
            prop_assert_eq!(result.num_dims() + 1, p.num_dims());
            prop_assert!(result.index_maps().iter().all(|m| m.num_results() > 0));
        }
    }

    /// An operand indexed only by the unrolled dimension makes unroll fail.
    #[test]
    fn unroll_rejects_single_dim_operand(p in arb_pattern(3, 1, 2, 3), d in 0usize..3) {
        let d = d % p.num_dims();
        let lonely = AffineMap::new(p.num_dims(), p.num_symbols(), [AffineExpr::Dim(d)]).unwrap();
        let maps = p.index_maps().iter().cloned().chain([lonely]);
        let with_lonely = ComputePattern::new(maps, p.iterator_kinds().iter().copied()).unwrap();
        prop_assert_eq!(unroll::apply(&with_lonely, d), None);
    }

    /// Merging adjacent identity dimensions removes exactly one dimension and kind.
    #[test]
    fn merge_adjacent_identity_dims(num_dims in 2usize..=4, num_operands in 1usize..=3, first in 0usize..3) {
        let first = first % (num_dims - 1);
        let maps = std::iter::repeat_n(AffineMap::identity(num_dims), num_operands);
        let p = ComputePattern::new(maps, vec![IteratorKind::Parallel; num_dims]).unwrap();

        let merged = merge_dims::apply(&p, first, first + 1).unwrap();
        prop_assert_eq!(merged.num_dims(), num_dims - 1);
        prop_assert_eq!(merged.iterator_kinds().len(), num_dims - 1);
        prop_assert!(merged.index_maps().iter().all(|m| *m == AffineMap::identity(num_dims - 1)));
    }

    /// Reversed or distant dimensions never merge in projected-permutation patterns.
    #[test]
    fn merge_requires_adjacency(p in arb_projected_pattern(4, 3), d1 in 0usize..4, d2 in 0usize..4) {
        let adjacent_everywhere = p.index_maps().iter().all(|m| {
            match (m.result_position(&AffineExpr::Dim(d1)), m.result_position(&AffineExpr::Dim(d2))) {
                (Some(p1), Some(p2)) => p1 + 1 == p2,
                (None, None) => true,
                _ => false,
            }
        });
        if !adjacent_everywhere {
            prop_assert_eq!(merge_dims::apply(&p, d1, d2), None);
        }
    }

    /// Without any sum result, decomposition never applies.
    #[test]
    fn decompose_without_sums_is_rejected(p in arb_projected_pattern(4, 3), position in 0usize..5) {
        prop_assert_eq!(decompose_expr::apply(&p, position), None);
    }

    /// Decomposition grows exactly the maps holding a sum at the position.
    #[test]
    fn decompose_grows_sum_results(p in arb_pattern(3, 1, 3, 3), position in 0usize..3) {
        if let Some(result) = decompose_expr::apply(&p, position) {
            for (before, after) in p.index_maps().iter().zip(result.index_maps()) {
                match before.result(position) {
                    Some(expr) if expr.is_add() => {
                        prop_assert_eq!(after.num_results(), before.num_results() + expr.summands().len() - 1);
                    }
                    _ => prop_assert_eq!(after, before),
                }
            }
        }
    }
}
