//! Affine expression algebra for the restruct transform engine.
//!
//! This crate provides the value types the structural search operates on:
//!
//! - [`expr`] - [`AffineExpr`], linear expressions over dimensions `d{i}` and symbols `s{j}`
//! - [`map`] - [`AffineMap`], an ordered list of results over a shared domain
//! - [`error`] - Error types and result handling
//!
//! Everything here is an immutable value. Operations return new expressions or maps and
//! never consult shared state, so they can be called freely from any search branch.

pub mod error;
pub mod expr;
pub mod map;


pub use error::{Error, Result};
pub use expr::{AffineBinaryOp, AffineExpr, constant, dim, symbol};
pub use map::AffineMap;
