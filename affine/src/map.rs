//! Multi-result affine maps.
//!
//! An [`AffineMap`] sends a domain of `num_dims` dimensions and `num_symbols`
//! symbols to an ordered list of result expressions, one per tensor axis.

use std::fmt;

use smallvec::SmallVec;
use snafu::ensure;

use crate::error::*;
use crate::expr::AffineExpr;

pub type Results = SmallVec<[AffineExpr; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineMap {
    num_dims: usize,
    num_symbols: usize,
    results: Results,
}

impl AffineMap {
    /// Create a map, checking that every result only references variables of the domain.
    ///
    /// ```rust
    /// # use restruct_affine::{AffineMap, dim, symbol};
    /// let map = AffineMap::new(2, 1, [dim(0) + symbol(0), dim(1)]).unwrap();
    /// assert_eq!(map.to_string(), "(d0, d1)[s0] -> (d0 + s0, d1)");
    ///
    /// assert!(AffineMap::new(1, 0, [dim(1)]).is_err());
    /// ```
    pub fn new(num_dims: usize, num_symbols: usize, results: impl IntoIterator<Item = AffineExpr>) -> Result<Self> {
        let results: Results = results.into_iter().collect();
        for expr in &results {
            check_bounds(expr, num_dims, num_symbols)?;
        }
        Ok(Self { num_dims, num_symbols, results })
    }

    /// `(d0, ..., dn-1) -> (d0, ..., dn-1)`.
    pub fn identity(num_dims: usize) -> Self {
        Self { num_dims, num_symbols: 0, results: (0..num_dims).map(AffineExpr::Dim).collect() }
    }

    /// Construct without validation. Callers preserve the domain bounds by construction.
    fn from_parts(num_dims: usize, num_symbols: usize, results: Results) -> Self {
        Self { num_dims, num_symbols, results }
    }

    pub fn num_dims(&self) -> usize {
        self.num_dims
    }

    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    pub fn num_results(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> &[AffineExpr] {
        &self.results
    }

    pub fn result(&self, position: usize) -> Option<&AffineExpr> {
        self.results.get(position)
    }

    /// Position of the first result structurally equal to `expr`.
    pub fn result_position(&self, expr: &AffineExpr) -> Option<usize> {
        self.results.iter().position(|r| r == expr)
    }

    pub fn is_function_of_dim(&self, position: usize) -> bool {
        self.results.iter().any(|r| r.is_function_of_dim(position))
    }

    pub fn is_function_of_symbol(&self, position: usize) -> bool {
        self.results.iter().any(|r| r.is_function_of_symbol(position))
    }

    /// Substitute `from` with `to` in every result. The domain is unchanged.
    pub fn replace(&self, from: &AffineExpr, to: &AffineExpr) -> Self {
        let results = self.results.iter().map(|r| r.replace(from, to)).collect();
        Self::from_parts(self.num_dims, self.num_symbols, results)
    }

    /// Eliminate the dimensions at `positions` from the domain.
    ///
    /// Remaining uses of an eliminated dimension become the constant 0. The
    /// surviving dimensions are renumbered contiguously, preserving their order.
    /// Positions outside the domain are ignored.
    pub fn project_dims(&self, positions: &[usize]) -> Self {
        let (replacements, kept) = projection(self.num_dims, positions, AffineExpr::Dim);
        let results = self.results.iter().map(|r| r.replace_dims_and_symbols(&replacements, &[])).collect();
        Self::from_parts(kept, self.num_symbols, results)
    }

    /// Eliminate the symbols at `positions` from the domain.
    ///
    /// Same contract as [`AffineMap::project_dims`], applied to symbols.
    pub fn project_symbols(&self, positions: &[usize]) -> Self {
        let (replacements, kept) = projection(self.num_symbols, positions, AffineExpr::Symbol);
        let results = self.results.iter().map(|r| r.replace_dims_and_symbols(&[], &replacements)).collect();
        Self::from_parts(self.num_dims, kept, results)
    }

    /// Grow the domain by `shift` dimensions inserted at `offset`.
    ///
    /// Dimensions at or after `offset` move up by `shift`. With
    /// `offset == num_dims` the new dimensions are appended and nothing is renumbered.
    pub fn shift_dims(&self, shift: usize, offset: usize) -> Self {
        let results = self.results.iter().map(|r| r.shift_dims(shift, offset)).collect();
        Self::from_parts(self.num_dims + shift, self.num_symbols, results)
    }

    /// Insert `expr` so that it becomes the result at `position`.
    pub fn insert_result(&self, expr: AffineExpr, position: usize) -> Result<Self> {
        ensure!(position <= self.results.len(), ResultOutOfRangeSnafu { position, num_results: self.results.len() });
        check_bounds(&expr, self.num_dims, self.num_symbols)?;
        let mut results = self.results.clone();
        results.insert(position, expr);
        Ok(Self::from_parts(self.num_dims, self.num_symbols, results))
    }

    /// Remove the results at `positions`. Out-of-range positions are ignored.
    pub fn drop_results(&self, positions: &[usize]) -> Self {
        let results =
            self.results.iter().enumerate().filter(|(i, _)| !positions.contains(i)).map(|(_, r)| r.clone()).collect();
        Self::from_parts(self.num_dims, self.num_symbols, results)
    }

    /// Exchange the results at `p0` and `p1`.
    pub fn swap_results(&self, p0: usize, p1: usize) -> Result<Self> {
        let num_results = self.results.len();
        ensure!(p0 < num_results, ResultOutOfRangeSnafu { position: p0, num_results });
        ensure!(p1 < num_results, ResultOutOfRangeSnafu { position: p1, num_results });
        let mut results = self.results.clone();
        results.swap(p0, p1);
        Ok(Self::from_parts(self.num_dims, self.num_symbols, results))
    }

    /// Same domain, new result list.
    pub fn with_results(&self, results: impl IntoIterator<Item = AffineExpr>) -> Result<Self> {
        Self::new(self.num_dims, self.num_symbols, results)
    }
}

/// Replacement table for eliminating `positions` out of `count` variables.
fn projection(
    count: usize,
    positions: &[usize],
    make: impl Fn(usize) -> AffineExpr,
) -> (SmallVec<[AffineExpr; 8]>, usize) {
    let mut next = 0;
    let replacements: SmallVec<[AffineExpr; 8]> = (0..count)
        .map(|p| {
            if positions.contains(&p) {
                AffineExpr::Constant(0)
            } else {
                next += 1;
                make(next - 1)
            }
        })
        .collect();
    (replacements, next)
}

fn check_bounds(expr: &AffineExpr, num_dims: usize, num_symbols: usize) -> Result<()> {
    let mut error = None;
    expr.walk(&mut |e| {
        if error.is_some() {
            return;
        }
        match e {
            AffineExpr::Dim(position) if *position >= num_dims => {
                error = Some(DimOutOfRangeSnafu { position: *position, num_dims }.build());
            }
            AffineExpr::Symbol(position) if *position >= num_symbols => {
                error = Some(SymbolOutOfRangeSnafu { position: *position, num_symbols }.build());
            }
            _ => {}
        }
    });
    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

impl fmt::Display for AffineMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for p in 0..self.num_dims {
            if p > 0 {
                write!(f, ", ")?;
            }
            write!(f, "d{p}")?;
        }
        write!(f, ")")?;
        if self.num_symbols > 0 {
            write!(f, "[")?;
            for p in 0..self.num_symbols {
                if p > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "s{p}")?;
            }
            write!(f, "]")?;
        }
        write!(f, " -> (")?;
        for (i, r) in self.results.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, ")")
    }
}
