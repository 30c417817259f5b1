//! Affine expressions over dimension and symbol variables.
//!
//! Expressions are immutable values. Sub-expressions are shared through `Arc`,
//! so cloning is cheap and rewriting only allocates along the changed spine.
//!
//! The arithmetic constructors fold locally (constant folding, `x + 0`, `x * 1`,
//! `x * 0`, constant re-association). Nothing beyond that is canonicalized:
//! `d0 + d1` and `d1 + d0` are different values.

use std::fmt;
use std::ops::{Add, Mul};
use std::sync::Arc;

use smallvec::SmallVec;

/// Binary operators of the affine algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AffineBinaryOp {
    Add,
    Mul,
    Mod,
    FloorDiv,
    CeilDiv,
}

impl fmt::Display for AffineBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Mul => write!(f, "*"),
            Self::Mod => write!(f, "mod"),
            Self::FloorDiv => write!(f, "floordiv"),
            Self::CeilDiv => write!(f, "ceildiv"),
        }
    }
}

/// A scalar affine expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AffineExpr {
    /// Iteration dimension `d{position}`.
    Dim(usize),
    /// Runtime-constant symbol `s{position}`.
    Symbol(usize),
    /// Integer literal.
    Constant(i64),
    /// Binary node. Build through [`AffineExpr::binary`] or the arithmetic
    /// constructors so that local folding applies.
    Binary { op: AffineBinaryOp, lhs: Arc<AffineExpr>, rhs: Arc<AffineExpr> },
}

/// Shorthand for [`AffineExpr::Dim`].
pub const fn dim(position: usize) -> AffineExpr {
    AffineExpr::Dim(position)
}

/// Shorthand for [`AffineExpr::Symbol`].
pub const fn symbol(position: usize) -> AffineExpr {
    AffineExpr::Symbol(position)
}

/// Shorthand for [`AffineExpr::Constant`].
pub const fn constant(value: i64) -> AffineExpr {
    AffineExpr::Constant(value)
}

impl AffineExpr {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    fn raw(op: AffineBinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary { op, lhs: Arc::new(lhs), rhs: Arc::new(rhs) }
    }

    /// Build a binary expression, dispatching to the folding constructor of `op`.
    pub fn binary(op: AffineBinaryOp, lhs: Self, rhs: Self) -> Self {
        match op {
            AffineBinaryOp::Add => Self::add(lhs, rhs),
            AffineBinaryOp::Mul => Self::mul(lhs, rhs),
            AffineBinaryOp::Mod => Self::modulo(lhs, rhs),
            AffineBinaryOp::FloorDiv => Self::floor_div(lhs, rhs),
            AffineBinaryOp::CeilDiv => Self::ceil_div(lhs, rhs),
        }
    }

    /// `lhs + rhs`. Constants are kept on the right.
    pub fn add(lhs: Self, rhs: Self) -> Self {
        match (lhs.as_constant(), rhs.as_constant()) {
            (Some(a), Some(b)) => {
                if let Some(sum) = a.checked_add(b) {
                    return Self::Constant(sum);
                }
            }
            (Some(_), None) => return Self::add(rhs, lhs),
            (None, Some(0)) => return lhs,
            (None, Some(c2)) => {
                // (x + c1) + c2 -> x + (c1 + c2)
                if let Self::Binary { op: AffineBinaryOp::Add, lhs: inner, rhs: c1 } = &lhs
                    && let Some(c1) = c1.as_constant()
                    && let Some(sum) = c1.checked_add(c2)
                {
                    return Self::add(inner.as_ref().clone(), Self::Constant(sum));
                }
            }
            (None, None) => {}
        }
        Self::raw(AffineBinaryOp::Add, lhs, rhs)
    }

    /// `lhs * rhs`. Constants are kept on the right.
    pub fn mul(lhs: Self, rhs: Self) -> Self {
        match (lhs.as_constant(), rhs.as_constant()) {
            (Some(a), Some(b)) => {
                if let Some(product) = a.checked_mul(b) {
                    return Self::Constant(product);
                }
            }
            (Some(_), None) => return Self::mul(rhs, lhs),
            (None, Some(0)) => return Self::Constant(0),
            (None, Some(1)) => return lhs,
            (None, Some(c2)) => {
                // (x * c1) * c2 -> x * (c1 * c2)
                if let Self::Binary { op: AffineBinaryOp::Mul, lhs: inner, rhs: c1 } = &lhs
                    && let Some(c1) = c1.as_constant()
                    && let Some(product) = c1.checked_mul(c2)
                {
                    return Self::mul(inner.as_ref().clone(), Self::Constant(product));
                }
            }
            (None, None) => {}
        }
        Self::raw(AffineBinaryOp::Mul, lhs, rhs)
    }

    /// `lhs floordiv rhs`.
    pub fn floor_div(lhs: Self, rhs: Self) -> Self {
        match (lhs.as_constant(), rhs.as_constant()) {
            (Some(a), Some(b)) => {
                if let Some(q) = floor_div_i64(a, b) {
                    return Self::Constant(q);
                }
            }
            (_, Some(1)) => return lhs,
            _ => {}
        }
        Self::raw(AffineBinaryOp::FloorDiv, lhs, rhs)
    }

    /// `lhs ceildiv rhs`.
    pub fn ceil_div(lhs: Self, rhs: Self) -> Self {
        match (lhs.as_constant(), rhs.as_constant()) {
            (Some(a), Some(b)) => {
                if let Some(q) = ceil_div_i64(a, b) {
                    return Self::Constant(q);
                }
            }
            (_, Some(1)) => return lhs,
            _ => {}
        }
        Self::raw(AffineBinaryOp::CeilDiv, lhs, rhs)
    }

    /// `lhs mod rhs` with a non-negative remainder for positive moduli.
    pub fn modulo(lhs: Self, rhs: Self) -> Self {
        match (lhs.as_constant(), rhs.as_constant()) {
            (Some(a), Some(b)) if b > 0 => return Self::Constant(a.rem_euclid(b)),
            (_, Some(1)) => return Self::Constant(0),
            _ => {}
        }
        Self::raw(AffineBinaryOp::Mod, lhs, rhs)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn as_constant(&self) -> Option<i64> {
        match self {
            Self::Constant(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_constant_value(&self, value: i64) -> bool {
        self.as_constant() == Some(value)
    }

    pub fn as_dim(&self) -> Option<usize> {
        match self {
            Self::Dim(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<usize> {
        match self {
            Self::Symbol(p) => Some(*p),
            _ => None,
        }
    }

    /// True for an additive (sum) expression.
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Binary { op: AffineBinaryOp::Add, .. })
    }

    /// True if `d{position}` occurs anywhere in the expression.
    pub fn is_function_of_dim(&self, position: usize) -> bool {
        self.any(&|e| matches!(e, Self::Dim(p) if *p == position))
    }

    /// True if `s{position}` occurs anywhere in the expression.
    pub fn is_function_of_symbol(&self, position: usize) -> bool {
        self.any(&|e| matches!(e, Self::Symbol(p) if *p == position))
    }

    fn any(&self, pred: &impl Fn(&Self) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Self::Binary { lhs, rhs, .. } => lhs.any(pred) || rhs.any(pred),
            _ => false,
        }
    }

    /// Visit every node in pre-order.
    pub fn walk(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);
        if let Self::Binary { lhs, rhs, .. } = self {
            lhs.walk(visit);
            rhs.walk(visit);
        }
    }

    /// Flatten nested sums into their additive leaf terms, left to right.
    ///
    /// A non-sum expression yields itself as the only term.
    ///
    /// ```rust
    /// # use restruct_affine::{dim, symbol};
    /// let e = (dim(0) + dim(1)) + symbol(0) * 2;
    /// let terms = e.summands();
    /// assert_eq!(terms.as_slice(), &[dim(0), dim(1), symbol(0) * 2]);
    /// ```
    pub fn summands(&self) -> SmallVec<[Self; 4]> {
        let mut terms = SmallVec::new();
        self.collect_summands(&mut terms);
        terms
    }

    fn collect_summands(&self, terms: &mut SmallVec<[Self; 4]>) {
        match self {
            Self::Binary { op: AffineBinaryOp::Add, lhs, rhs } => {
                lhs.collect_summands(terms);
                rhs.collect_summands(terms);
            }
            other => terms.push(other.clone()),
        }
    }

    // ------------------------------------------------------------------------
    // Rewriting
    // ------------------------------------------------------------------------

    /// Replace every sub-expression structurally equal to `from` with `to`,
    /// re-folding on the way up.
    pub fn replace(&self, from: &Self, to: &Self) -> Self {
        if self == from {
            return to.clone();
        }
        match self {
            Self::Binary { op, lhs, rhs } => Self::binary(*op, lhs.replace(from, to), rhs.replace(from, to)),
            leaf => leaf.clone(),
        }
    }

    /// Substitute `d{i}` with `dims[i]` and `s{j}` with `symbols[j]`.
    ///
    /// Variables without a replacement entry are left as they are.
    pub fn replace_dims_and_symbols(&self, dims: &[Self], symbols: &[Self]) -> Self {
        match self {
            Self::Dim(p) => dims.get(*p).cloned().unwrap_or_else(|| self.clone()),
            Self::Symbol(p) => symbols.get(*p).cloned().unwrap_or_else(|| self.clone()),
            Self::Constant(_) => self.clone(),
            Self::Binary { op, lhs, rhs } => Self::binary(
                *op,
                lhs.replace_dims_and_symbols(dims, symbols),
                rhs.replace_dims_and_symbols(dims, symbols),
            ),
        }
    }

    /// Renumber every `d{p}` with `p >= offset` to `d{p + shift}`.
    pub fn shift_dims(&self, shift: usize, offset: usize) -> Self {
        match self {
            Self::Dim(p) if *p >= offset => Self::Dim(p + shift),
            Self::Binary { op, lhs, rhs } => Self::Binary {
                op: *op,
                lhs: Arc::new(lhs.shift_dims(shift, offset)),
                rhs: Arc::new(rhs.shift_dims(shift, offset)),
            },
            other => other.clone(),
        }
    }
}

fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) { Some(q - 1) } else { Some(q) }
}

fn ceil_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) == (b < 0)) { Some(q + 1) } else { Some(q) }
}

impl Add for AffineExpr {
    type Output = AffineExpr;

    fn add(self, rhs: Self) -> Self::Output {
        AffineExpr::add(self, rhs)
    }
}

impl Add<i64> for AffineExpr {
    type Output = AffineExpr;

    fn add(self, rhs: i64) -> Self::Output {
        AffineExpr::add(self, AffineExpr::Constant(rhs))
    }
}

impl Mul for AffineExpr {
    type Output = AffineExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        AffineExpr::mul(self, rhs)
    }
}

impl Mul<i64> for AffineExpr {
    type Output = AffineExpr;

    fn mul(self, rhs: i64) -> Self::Output {
        AffineExpr::mul(self, AffineExpr::Constant(rhs))
    }
}

impl From<i64> for AffineExpr {
    fn from(value: i64) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Display for AffineExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dim(p) => write!(f, "d{p}"),
            Self::Symbol(p) => write!(f, "s{p}"),
            Self::Constant(v) => write!(f, "{v}"),
            Self::Binary { op, lhs, rhs } => {
                write_operand(f, lhs, *op, false)?;
                write!(f, " {op} ")?;
                write_operand(f, rhs, *op, true)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &AffineExpr, parent: AffineBinaryOp, is_rhs: bool) -> fmt::Result {
    let parenthesize = match expr {
        AffineExpr::Binary { op, .. } => parent != AffineBinaryOp::Add || (is_rhs && *op == AffineBinaryOp::Add),
        _ => false,
    };
    if parenthesize { write!(f, "({expr})") } else { write!(f, "{expr}") }
}
