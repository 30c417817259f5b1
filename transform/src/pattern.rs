//! Compute patterns: the searchable state of the transform engine.
//!
//! A [`ComputePattern`] is the pair of per-operand index maps and per-dimension
//! iterator kinds that describes a structured operation's iteration space.
//! Patterns are values. Operators never mutate one, they build a new pattern.

use std::fmt;

use restruct_affine::{AffineExpr, AffineMap};
use smallvec::SmallVec;
use snafu::{ResultExt, ensure};

use crate::error::*;

/// Classification of an iteration dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IteratorKind {
    Parallel,
    Reduction,
}

pub type IndexMaps = SmallVec<[AffineMap; 4]>;
pub type IteratorKinds = SmallVec<[IteratorKind; 8]>;

/// Index maps plus iterator kinds.
///
/// # Invariants
///
/// - at least one index map
/// - every map has `iterator_kinds.len()` dimensions
/// - every map has the same number of symbols
///
/// Equality is structural and ordered: two patterns are equal iff their maps are
/// pairwise equal and their iterator kinds are pairwise equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputePattern {
    index_maps: IndexMaps,
    iterator_kinds: IteratorKinds,
}

impl ComputePattern {
    /// Create a pattern, validating the domain invariants.
    pub fn new(
        index_maps: impl IntoIterator<Item = AffineMap>,
        iterator_kinds: impl IntoIterator<Item = IteratorKind>,
    ) -> Result<Self> {
        let index_maps: IndexMaps = index_maps.into_iter().collect();
        let iterator_kinds: IteratorKinds = iterator_kinds.into_iter().collect();

        let first = index_maps.first().ok_or_else(|| EmptyPatternSnafu.build())?;
        let num_symbols = first.num_symbols();
        for (operand, map) in index_maps.iter().enumerate() {
            ensure!(
                map.num_dims() == iterator_kinds.len(),
                DimensionCountMismatchSnafu { operand, num_dims: map.num_dims(), num_iterators: iterator_kinds.len() }
            );
            ensure!(
                map.num_symbols() == num_symbols,
                SymbolCountMismatchSnafu { operand, num_symbols: map.num_symbols(), expected: num_symbols }
            );
        }

        Ok(Self { index_maps, iterator_kinds })
    }

    /// Create a pattern from raw result lists sharing one domain.
    ///
    /// The number of dimensions is `iterator_kinds.len()`.
    ///
    /// ```rust
    /// # use restruct_affine::dim;
    /// # use restruct_transform::{ComputePattern, IteratorKind};
    /// let matmul = ComputePattern::from_results(
    ///     0,
    ///     [vec![dim(0), dim(2)], vec![dim(2), dim(1)], vec![dim(0), dim(1)]],
    ///     [IteratorKind::Parallel, IteratorKind::Parallel, IteratorKind::Reduction],
    /// )
    /// .unwrap();
    /// assert_eq!(matmul.num_dims(), 3);
    /// assert_eq!(matmul.num_operands(), 3);
    /// ```
    pub fn from_results<R>(
        num_symbols: usize,
        operands: impl IntoIterator<Item = R>,
        iterator_kinds: impl IntoIterator<Item = IteratorKind>,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = AffineExpr>,
    {
        let iterator_kinds: IteratorKinds = iterator_kinds.into_iter().collect();
        let num_dims = iterator_kinds.len();
        let index_maps = operands
            .into_iter()
            .enumerate()
            .map(|(operand, results)| {
                AffineMap::new(num_dims, num_symbols, results).context(InvalidIndexMapSnafu { operand })
            })
            .collect::<Result<IndexMaps>>()?;
        Self::new(index_maps, iterator_kinds)
    }

    /// Assemble operator output. Operators preserve the invariants by construction.
    pub(crate) fn from_parts(index_maps: IndexMaps, iterator_kinds: IteratorKinds) -> Self {
        debug_assert!(index_maps.iter().all(|m| m.num_dims() == iterator_kinds.len()));
        Self { index_maps, iterator_kinds }
    }

    pub fn index_maps(&self) -> &[AffineMap] {
        &self.index_maps
    }

    pub fn index_map(&self, operand: usize) -> Option<&AffineMap> {
        self.index_maps.get(operand)
    }

    pub fn iterator_kinds(&self) -> &[IteratorKind] {
        &self.iterator_kinds
    }

    pub fn num_operands(&self) -> usize {
        self.index_maps.len()
    }

    /// Number of iteration dimensions shared by every map.
    pub fn num_dims(&self) -> usize {
        self.iterator_kinds.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.index_maps.first().map_or(0, AffineMap::num_symbols)
    }

    /// Largest result count over all operands.
    pub fn max_num_results(&self) -> usize {
        self.index_maps.iter().map(AffineMap::num_results).max().unwrap_or(0)
    }
}

impl fmt::Display for ComputePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maps=[")?;
        for (i, map) in self.index_maps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{map}")?;
        }
        write!(f, "], iterators=[")?;
        for (i, kind) in self.iterator_kinds.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}")?;
        }
        write!(f, "]")
    }
}
