//! Symbolic lanes
//!
//! A [`PolyLane`] is one machine word of the permutation state with every
//! bit replaced by a [`BoolPoly`]. Bit `i` of the lane is the coefficient of
//! 2ⁱ of the concrete word, matching `u64::rotate_left` semantics.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitAnd, BitXor, Index, IndexMut, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use keccak_anf_api::{validate, Error, Result, Var};

use crate::poly::BoolPoly;
use crate::store::ConstraintStore;

/// Fixed-width vector of boolean polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyLane {
    bits: Vec<BoolPoly>,
}

#[inline]
fn word_bit(word: u64, i: usize) -> bool {
    // zero-extend words narrower than the lane
    i < 64 && (word >> i) & 1 == 1
}

impl PolyLane {
    /// An all-zero lane of `width` bits
    pub fn zero(width: usize) -> Self {
        Self {
            bits: vec![BoolPoly::zero(); width],
        }
    }

    /// A lane holding the low `width` bits of `word`
    pub fn from_word(width: usize, word: u64) -> Self {
        Self {
            bits: (0..width).map(|i| BoolPoly::constant(word_bit(word, i))).collect(),
        }
    }

    /// A lane whose bit `i` is the fresh variable `base + i`
    pub fn variables(width: usize, base: Var) -> Self {
        let mut lane = Self::zero(width);
        lane.init_variable(base);
        lane
    }

    /// Number of bits
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Makes bit `i` exactly the variable `base + i`.
    pub fn init_variable(&mut self, base: Var) {
        for (i, bit) in self.bits.iter_mut().enumerate() {
            *bit = BoolPoly::var(base + i);
        }
    }

    /// Makes every bit the constant `value`.
    pub fn init_constant(&mut self, value: bool) {
        for bit in self.bits.iter_mut() {
            *bit = BoolPoly::constant(value);
        }
    }

    /// Bit `i`, checked
    pub fn get(&self, i: usize) -> Result<&BoolPoly> {
        validate::index("lane bit", i, self.width())?;
        Ok(&self.bits[i])
    }

    /// Replaces bit `i`, checked
    pub fn set(&mut self, i: usize, poly: BoolPoly) -> Result<()> {
        validate::index("lane bit", i, self.width())?;
        self.bits[i] = poly;
        Ok(())
    }

    /// Iterator over the bits, least significant first
    pub fn iter(&self) -> std::slice::Iter<'_, BoolPoly> {
        self.bits.iter()
    }

    /// Mutable iterator over the bits
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, BoolPoly> {
        self.bits.iter_mut()
    }

    /// Lane-wise XOR, optionally reducing every resulting bit against `source`.
    pub fn xor_reduced(&self, other: &PolyLane, source: Option<&ConstraintStore>) -> PolyLane {
        assert_eq!(self.width(), other.width(), "lane width mismatch");
        Self {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(a, b)| a.xor_reduced(b, source))
                .collect(),
        }
    }

    /// Width-checked lane-wise XOR
    pub fn try_xor(&self, other: &PolyLane) -> Result<PolyLane> {
        validate::width("lane xor", other.width(), self.width())?;
        Ok(self.xor_reduced(other, None))
    }

    /// In-place lane-wise XOR
    pub fn xor_assign(&mut self, other: &PolyLane) {
        assert_eq!(self.width(), other.width(), "lane width mismatch");
        for (a, b) in self.bits.iter_mut().zip(&other.bits) {
            a.xor_assign(b);
        }
    }

    /// XOR bit `i` of `word` into bit `i` of the lane, reducing against `source`.
    pub fn xor_word_reduced(&self, word: u64, source: Option<&ConstraintStore>) -> PolyLane {
        Self {
            bits: self
                .bits
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let res = p.xor_bit(word_bit(word, i));
                    match source {
                        Some(store) => store.reduce(res),
                        None => res,
                    }
                })
                .collect(),
        }
    }

    /// Lane-wise AND
    pub fn and(&self, other: &PolyLane) -> PolyLane {
        assert_eq!(self.width(), other.width(), "lane width mismatch");
        Self {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(a, b)| a.and(b))
                .collect(),
        }
    }

    /// Lane-wise NOT
    pub fn invert(&self) -> PolyLane {
        Self {
            bits: self.bits.iter().map(BoolPoly::invert).collect(),
        }
    }

    /// Cyclic rotation towards the most significant bit by `r mod width`.
    ///
    /// Bit `i` of the result is bit `i - r` of the input, exactly as
    /// `u64::rotate_left` moves concrete bits.
    pub fn rotate_left(&self, r: u32) -> PolyLane {
        let mut bits = self.bits.clone();
        if !bits.is_empty() {
            let shift = r as usize % bits.len();
            bits.rotate_right(shift);
        }
        Self { bits }
    }

    /// Substitutes known variable values into every bit.
    pub fn assign_all(&mut self, assignments: &BTreeMap<Var, bool>) {
        for bit in self.bits.iter_mut() {
            bit.assign_all(assignments);
        }
    }

    /// The concrete word, when every bit is constant and the lane fits in 64 bits.
    pub fn to_word(&self) -> Result<u64> {
        validate::parameter(self.width() <= 64, "lane", "wider than 64 bits")?;
        let mut word = 0u64;
        for (i, bit) in self.bits.iter().enumerate() {
            if !bit.is_constant() {
                return Err(Error::NonConstant {
                    context: "lane",
                    index: i,
                });
            }
            word |= (bit.constant_term() as u64) << i;
        }
        Ok(word)
    }

    /// Largest term count over the bits
    pub fn peak_terms(&self) -> usize {
        self.bits.iter().map(BoolPoly::term_count).max().unwrap_or(0)
    }
}

impl Index<usize> for PolyLane {
    type Output = BoolPoly;

    fn index(&self, i: usize) -> &BoolPoly {
        &self.bits[i]
    }
}

impl IndexMut<usize> for PolyLane {
    fn index_mut(&mut self, i: usize) -> &mut BoolPoly {
        &mut self.bits[i]
    }
}

impl<'a> IntoIterator for &'a PolyLane {
    type Item = &'a BoolPoly;
    type IntoIter = std::slice::Iter<'a, BoolPoly>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl BitXor for &PolyLane {
    type Output = PolyLane;

    fn bitxor(self, other: Self) -> PolyLane {
        self.xor_reduced(other, None)
    }
}

impl BitXor<u64> for &PolyLane {
    type Output = PolyLane;

    fn bitxor(self, word: u64) -> PolyLane {
        self.xor_word_reduced(word, None)
    }
}

impl BitAnd for &PolyLane {
    type Output = PolyLane;

    fn bitand(self, other: Self) -> PolyLane {
        self.and(other)
    }
}

impl Not for &PolyLane {
    type Output = PolyLane;

    fn not(self) -> PolyLane {
        self.invert()
    }
}

/// One polynomial per line, least significant bit first.
impl fmt::Display for PolyLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bit) in self.bits.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}
