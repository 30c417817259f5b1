//! Structural rewrite search over compute patterns.
//!
//! A [`ComputePattern`] describes a structured operation by its per-operand
//! index maps and per-dimension iterator kinds. This crate searches for a
//! sequence of structural rewrites that turns one pattern into another:
//!
//! - [`pattern`] - [`ComputePattern`] and [`IteratorKind`]
//! - [`mask`] - [`OperandMask`], operand selections for masked operators
//! - [`types`] - [`Transform`], the labels recorded in the search tree
//! - [`ops`] - one module per rewrite operator
//! - [`solver`] - the depth-bounded backtracking driver
//! - [`tree`] - [`TransformTree`], the pruned record of a search
//! - [`config`] - [`SolverConfig`]
//!
//! # Example
//!
//! ```rust
//! use restruct_affine::dim;
//! use restruct_transform::{ComputePattern, IteratorKind, Solver, Transform, replay};
//!
//! let source = ComputePattern::from_results(0, [[dim(0), dim(1)]], [IteratorKind::Parallel; 2]).unwrap();
//! let target = ComputePattern::from_results(0, [[dim(0)]], [IteratorKind::Parallel]).unwrap();
//!
//! let tree = Solver::new(target.clone(), 1).solve(&source);
//! assert!(tree.success_paths().contains(&vec![Transform::unroll(1)]));
//!
//! let path = tree.first_success().unwrap();
//! assert_eq!(replay(&source, &path), Some(target));
//! ```

pub mod config;
pub mod error;
pub mod mask;
pub mod ops;
pub mod pattern;
pub mod solver;
pub mod tree;
pub mod types;

#[cfg(test)]
pub mod test;

pub use config::SolverConfig;
pub use error::{Result, TransformError};
pub use mask::OperandMask;
pub use ops::apply_transform;
pub use pattern::{ComputePattern, IteratorKind};
pub use solver::{SearchStats, SolveResult, Solver, replay};
pub use tree::{TransformNode, TransformTree};
pub use types::Transform;
