use crate::error::Error;
use crate::{AffineExpr, AffineMap, constant, dim, symbol};

fn map(num_dims: usize, num_symbols: usize, results: impl IntoIterator<Item = AffineExpr>) -> AffineMap {
    AffineMap::new(num_dims, num_symbols, results).unwrap()
}

#[test]
fn test_new_rejects_out_of_range_dim() {
    let err = AffineMap::new(2, 0, [dim(0), dim(2)]).unwrap_err();
    assert_eq!(err, Error::DimOutOfRange { position: 2, num_dims: 2 });
}

#[test]
fn test_new_rejects_out_of_range_symbol() {
    let err = AffineMap::new(1, 1, [dim(0) + symbol(1)]).unwrap_err();
    assert_eq!(err, Error::SymbolOutOfRange { position: 1, num_symbols: 1 });
}

#[test]
fn test_identity() {
    let id = AffineMap::identity(3);
    assert_eq!(id, map(3, 0, [dim(0), dim(1), dim(2)]));
    assert_eq!(id.to_string(), "(d0, d1, d2) -> (d0, d1, d2)");
}

#[test]
fn test_display_with_symbols() {
    let m = map(2, 2, [dim(0) * symbol(0), dim(1) + symbol(1)]);
    assert_eq!(m.to_string(), "(d0, d1)[s0, s1] -> (d0 * s0, d1 + s1)");
}

#[test]
fn test_result_position_is_structural() {
    let m = map(3, 0, [dim(0) + dim(1), dim(2), dim(1)]);
    assert_eq!(m.result_position(&dim(1)), Some(2));
    assert_eq!(m.result_position(&dim(0)), None);
    assert_eq!(m.result_position(&(dim(0) + dim(1))), Some(0));
}

#[test]
fn test_project_dims_renumbers() {
    // (d0, d1, d2) -> (d0, d2) with d1 eliminated -> (d0, d1) -> (d0, d1)
    let m = map(3, 0, [dim(0), dim(2)]);
    let projected = m.project_dims(&[1]);
    assert_eq!(projected, map(2, 0, [dim(0), dim(1)]));
}

#[test]
fn test_project_dims_zeroes_remaining_uses() {
    let m = map(2, 0, [dim(0) + dim(1), dim(1)]);
    let projected = m.project_dims(&[1]);
    assert_eq!(projected, map(1, 0, [dim(0), constant(0)]));
}

#[test]
fn test_project_symbols_renumbers() {
    let m = map(1, 3, [dim(0) * symbol(2), symbol(0)]);
    let projected = m.project_symbols(&[0]);
    assert_eq!(projected, map(1, 2, [dim(0) * symbol(1), constant(0)]));
}

#[test]
fn test_shift_dims_prepend_and_append() {
    let m = map(2, 0, [dim(1), dim(0)]);
    assert_eq!(m.shift_dims(1, 0), map(3, 0, [dim(2), dim(1)]));
    assert_eq!(m.shift_dims(1, 2), map(3, 0, [dim(1), dim(0)]));
}

#[test]
fn test_insert_result_bounds() {
    let m = map(2, 0, [dim(0)]);
    assert_eq!(m.insert_result(dim(1), 1).unwrap(), map(2, 0, [dim(0), dim(1)]));
    assert_eq!(m.insert_result(dim(1), 0).unwrap(), map(2, 0, [dim(1), dim(0)]));
    assert_eq!(m.insert_result(dim(1), 2).unwrap_err(), Error::ResultOutOfRange { position: 2, num_results: 1 });
    assert!(m.insert_result(dim(2), 0).is_err());
}

#[test]
fn test_drop_results() {
    let m = map(3, 0, [dim(0), constant(0), dim(2), constant(0)]);
    assert_eq!(m.drop_results(&[1, 3, 7]), map(3, 0, [dim(0), dim(2)]));
}

#[test]
fn test_swap_results() {
    let m = map(2, 0, [dim(0), dim(1)]);
    assert_eq!(m.swap_results(0, 1).unwrap(), map(2, 0, [dim(1), dim(0)]));
    assert!(m.swap_results(0, 2).is_err());
}

#[test]
fn test_replace_keeps_domain() {
    let m = map(2, 1, [dim(0) + dim(1), dim(1) * symbol(0)]);
    let replaced = m.replace(&dim(1), &constant(0));
    assert_eq!(replaced.num_dims(), 2);
    assert_eq!(replaced.results(), &[dim(0), constant(0)]);
}

#[test]
fn test_with_results_validates() {
    let m = map(2, 0, [dim(0)]);
    assert!(m.with_results([dim(1), dim(0)]).is_ok());
    assert!(m.with_results([symbol(0)]).is_err());
}

#[test]
fn test_function_of_dim() {
    let m = map(3, 0, [dim(0), AffineExpr::floor_div(dim(2), constant(4))]);
    assert!(m.is_function_of_dim(2));
    assert!(!m.is_function_of_dim(1));
}
