use restruct_affine::dim;
use test_case::test_case;

use crate::test::helpers::{parallel, pattern};
use crate::{IteratorKind, OperandMask, Transform, apply_transform};

#[test_case(Transform::unroll(1), "UNROLL(d1)"; "unroll")]
#[test_case(Transform::drop_symbol(0), "DROP_SYMBOL(s0)"; "drop_symbol")]
#[test_case(Transform::merge_dims(0, 2), "MERGE_DIMS(d0, d2)"; "merge_dims")]
#[test_case(Transform::permutation((0, 1), OperandMask::from_indices(2, [0])), "PERMUTE(0, 1; mask=10)"; "permutation")]
#[test_case(Transform::expand_dims(IteratorKind::Reduction, OperandMask::all(3)), "EXPAND_DIMS(reduction; mask=111)"; "expand_dims")]
#[test_case(Transform::decompose_expr(2), "DECOMPOSE(2)"; "decompose_expr")]
fn test_display(transform: Transform, expected: &str) {
    assert_eq!(transform.to_string(), expected);
}

#[test]
fn test_name_has_no_parameters() {
    assert_eq!(Transform::unroll(3).name(), "UNROLL");
    assert_eq!(Transform::decompose_expr(0).name(), "DECOMPOSE");
}

#[test]
fn test_apply_matches_dispatch() {
    let source = pattern(0, [[dim(0), dim(1)]], parallel(2));
    let transform = Transform::unroll(0);
    assert_eq!(transform.apply(&source), apply_transform(&source, &transform));
    assert_eq!(transform.apply(&source), Some(pattern(0, [[dim(0)]], parallel(1))));
}
