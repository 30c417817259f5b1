//! Operand selection masks.

use std::fmt;

use itertools::Itertools;
use smallvec::SmallVec;

/// A set of selected operands, stored as one flag per operand index.
///
/// Indices past the end of the mask are unselected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperandMask(SmallVec<[bool; 4]>);

impl OperandMask {
    /// Every one of `num_operands` operands selected.
    pub fn all(num_operands: usize) -> Self {
        Self(smallvec::smallvec![true; num_operands])
    }

    /// No operand selected.
    pub fn none(num_operands: usize) -> Self {
        Self(smallvec::smallvec![false; num_operands])
    }

    /// Select exactly `indices` out of `num_operands`. Indices out of range are ignored.
    pub fn from_indices(num_operands: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut mask = Self::none(num_operands);
        for index in indices {
            if let Some(bit) = mask.0.get_mut(index) {
                *bit = true;
            }
        }
        mask
    }

    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Self(bits.into_iter().collect())
    }

    /// Every non-empty subset of `0..num_operands`, `2^n - 1` masks in total.
    ///
    /// Masks are read as binary numbers with operand 0 as the most significant
    /// bit and come in descending order, from the full mask down to the mask
    /// selecting only the last operand. Yields nothing for 64 or more operands.
    ///
    /// ```rust
    /// # use restruct_transform::OperandMask;
    /// let masks: Vec<String> = OperandMask::non_empty_subsets(2).map(|m| m.to_string()).collect();
    /// assert_eq!(masks, ["11", "10", "01"]);
    /// ```
    pub fn non_empty_subsets(num_operands: usize) -> impl Iterator<Item = Self> {
        let total = u32::try_from(num_operands).ok().and_then(|n| 1u64.checked_shl(n)).unwrap_or(0);
        (1..total).rev().map(move |value| Self::from_bits((0..num_operands).rev().map(|bit| (value >> bit) & 1 == 1)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_selected(&self, operand: usize) -> bool {
        self.0.get(operand).copied().unwrap_or(false)
    }

    /// True when no operand at all is selected.
    pub fn selects_none(&self) -> bool {
        !self.0.iter().any(|bit| *bit)
    }

    /// Indices of the selected operands, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().positions(|bit| *bit)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for OperandMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
