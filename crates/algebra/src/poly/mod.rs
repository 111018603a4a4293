//! Boolean polynomials over GF(2) in algebraic normal form
//!
//! A [`BoolPoly`] is an element of GF(2)\[x₀, …, xₙ₋₁\] modulo xᵢ² = xᵢ. It is
//! stored split by degree: the constant term, the set of degree-1 variables
//! and the set of monomials of degree ≥ 2. Because coefficients live in GF(2)
//! a term is either present or absent, and adding a term twice removes it,
//! so every term-level update is a set toggle.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{BitAnd, BitXor, BitXorAssign, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::ConstraintStore;

pub use keccak_anf_api::Var;

/// A product of distinct variables. Degree = set size.
pub type Monomial = BTreeSet<Var>;

/// A boolean polynomial in algebraic normal form.
///
/// Invariants: `nonlinear` only holds monomials of size ≥ 2 and, being a
/// set, never holds the same monomial twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoolPoly {
    constant: bool,
    linear: BTreeSet<Var>,
    nonlinear: BTreeSet<Monomial>,
}

#[inline]
fn toggle<T: Ord>(set: &mut BTreeSet<T>, item: T) {
    if !set.remove(&item) {
        set.insert(item);
    }
}

impl BoolPoly {
    /// The zero polynomial
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant one
    pub fn one() -> Self {
        Self::constant(true)
    }

    /// A constant polynomial
    pub fn constant(value: bool) -> Self {
        Self {
            constant: value,
            ..Self::default()
        }
    }

    /// The bare variable `x_var`
    pub fn var(var: Var) -> Self {
        let mut p = Self::zero();
        p.linear.insert(var);
        p
    }

    /// Builds a polynomial from an arbitrary sum of monomials.
    ///
    /// Each monomial is routed to the term level matching its size (empty →
    /// constant, singleton → linear), and repeated monomials cancel.
    pub fn from_monomials<I, M>(monomials: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: IntoIterator<Item = Var>,
    {
        let mut p = Self::zero();
        for mono in monomials {
            p.toggle_monomial(mono.into_iter().collect());
        }
        p
    }

    /// Adds (XORs) a single monomial of any degree into the polynomial.
    pub fn toggle_monomial(&mut self, mono: Monomial) {
        match mono.len() {
            0 => self.constant ^= true,
            1 => {
                if let Some(&v) = mono.iter().next() {
                    toggle(&mut self.linear, v);
                }
            }
            _ => toggle(&mut self.nonlinear, mono),
        }
    }

    /// Degree-0 coefficient
    pub fn constant_term(&self) -> bool {
        self.constant
    }

    /// Degree-1 variables
    pub fn linear(&self) -> &BTreeSet<Var> {
        &self.linear
    }

    /// Monomials of degree ≥ 2
    pub fn nonlinear(&self) -> &BTreeSet<Monomial> {
        &self.nonlinear
    }

    /// Number of non-constant terms; the resource signal watched during theta.
    pub fn term_count(&self) -> usize {
        self.linear.len() + self.nonlinear.len()
    }

    /// Algebraic degree (0 for constants, including zero).
    pub fn degree(&self) -> usize {
        self.nonlinear
            .iter()
            .map(BTreeSet::len)
            .max()
            .unwrap_or(if self.linear.is_empty() { 0 } else { 1 })
    }

    /// All variables referenced by any term.
    pub fn variables(&self) -> BTreeSet<Var> {
        let mut vars = self.linear.clone();
        for mono in &self.nonlinear {
            vars.extend(mono.iter().copied());
        }
        vars
    }

    /// True iff the polynomial mentions `var`.
    pub fn contains_var(&self, var: Var) -> bool {
        self.linear.contains(&var) || self.nonlinear.iter().any(|m| m.contains(&var))
    }

    /// Exactly one linear variable and nothing nonlinear: `x + c`.
    pub fn is_variable(&self) -> bool {
        self.linear.len() == 1 && self.nonlinear.is_empty()
    }

    /// No variable terms at all
    pub fn is_constant(&self) -> bool {
        self.linear.is_empty() && self.nonlinear.is_empty()
    }

    /// The zero polynomial
    pub fn is_zero(&self) -> bool {
        !self.constant && self.is_constant()
    }

    /// The constant one
    pub fn is_one(&self) -> bool {
        self.constant && self.is_constant()
    }

    /// No nonlinear terms
    pub fn is_linear(&self) -> bool {
        self.nonlinear.is_empty()
    }

    /// Structural rewrite precondition: every linear variable and every
    /// monomial of `self` also occurs in `other`. Constants are ignored.
    ///
    /// This is weaker than divisibility under a monomial order and will miss
    /// reductions a Gröbner basis would find.
    pub fn subset_of(&self, other: &BoolPoly) -> bool {
        self.linear.is_subset(&other.linear) && self.nonlinear.is_subset(&other.nonlinear)
    }

    /// In-place XOR (polynomial addition over GF(2)).
    pub fn xor_assign(&mut self, other: &BoolPoly) {
        self.constant ^= other.constant;
        for &v in &other.linear {
            toggle(&mut self.linear, v);
        }
        for mono in &other.nonlinear {
            toggle(&mut self.nonlinear, mono.clone());
        }
    }

    /// XOR (polynomial addition over GF(2)).
    pub fn xor(&self, other: &BoolPoly) -> BoolPoly {
        let mut res = self.clone();
        res.xor_assign(other);
        res
    }

    /// XOR followed by a reduction against `source` when one is attached.
    pub fn xor_reduced(&self, other: &BoolPoly, source: Option<&ConstraintStore>) -> BoolPoly {
        let res = self.xor(other);
        match source {
            Some(store) => store.reduce(res),
            None => res,
        }
    }

    /// XOR with a constant bit.
    pub fn xor_bit(&self, bit: bool) -> BoolPoly {
        let mut res = self.clone();
        res.constant ^= bit;
        res
    }

    /// AND (polynomial multiplication with xᵢ² = xᵢ).
    pub fn and(&self, other: &BoolPoly) -> BoolPoly {
        let mut res = BoolPoly::constant(self.constant & other.constant);

        // constant × terms
        if other.constant {
            res.xor_terms(self);
        }
        if self.constant {
            res.xor_terms(other);
        }

        // linear × linear
        for &v1 in &self.linear {
            for &v2 in &other.linear {
                if v1 == v2 {
                    toggle(&mut res.linear, v1);
                } else {
                    toggle(&mut res.nonlinear, [v1, v2].into_iter().collect());
                }
            }
        }

        // linear × nonlinear, both ways
        for &v in &self.linear {
            for mono in &other.nonlinear {
                let mut m = mono.clone();
                m.insert(v);
                toggle(&mut res.nonlinear, m);
            }
        }
        for &v in &other.linear {
            for mono in &self.nonlinear {
                let mut m = mono.clone();
                m.insert(v);
                toggle(&mut res.nonlinear, m);
            }
        }

        // nonlinear × nonlinear
        for m1 in &self.nonlinear {
            for m2 in &other.nonlinear {
                toggle(&mut res.nonlinear, m1.union(m2).copied().collect());
            }
        }

        res
    }

    /// Boolean NOT, i.e. adding one.
    pub fn invert(&self) -> BoolPoly {
        self.xor_bit(true)
    }

    fn xor_terms(&mut self, other: &BoolPoly) {
        for &v in &other.linear {
            toggle(&mut self.linear, v);
        }
        for mono in &other.nonlinear {
            toggle(&mut self.nonlinear, mono.clone());
        }
    }

    /// Substitutes `x_var := value`, projecting onto the remaining variables.
    ///
    /// Monomials that shrink below degree 2 are demoted to the linear level,
    /// and monomials that collide after stripping `var` cancel.
    pub fn assign(&mut self, var: Var, value: bool) {
        if !value {
            self.linear.remove(&var);
            self.nonlinear.retain(|mono| !mono.contains(&var));
            return;
        }

        if self.linear.remove(&var) {
            self.constant ^= true;
        }
        if !self.nonlinear.iter().any(|m| m.contains(&var)) {
            return;
        }
        let old = std::mem::take(&mut self.nonlinear);
        for mut mono in old {
            if mono.remove(&var) {
                self.toggle_monomial(mono);
            } else {
                toggle(&mut self.nonlinear, mono);
            }
        }
    }

    /// Substitutes every variable of `assignments` that occurs in the polynomial.
    pub fn assign_all(&mut self, assignments: &BTreeMap<Var, bool>) {
        for var in self.variables() {
            if let Some(&value) = assignments.get(&var) {
                self.assign(var, value);
            }
        }
    }

    /// Evaluates the polynomial; `None` when a referenced variable has no value.
    pub fn evaluate(&self, assignments: &BTreeMap<Var, bool>) -> Option<bool> {
        let mut acc = self.constant;
        for v in &self.linear {
            acc ^= *assignments.get(v)?;
        }
        for mono in &self.nonlinear {
            let mut prod = true;
            for v in mono {
                prod &= *assignments.get(v)?;
            }
            acc ^= prod;
        }
        Some(acc)
    }
}

impl From<bool> for BoolPoly {
    fn from(value: bool) -> Self {
        BoolPoly::constant(value)
    }
}

// Implement standard ops traits for ergonomic usage
impl BitXor for BoolPoly {
    type Output = Self;

    fn bitxor(mut self, other: Self) -> Self::Output {
        self.xor_assign(&other);
        self
    }
}

impl BitXor for &BoolPoly {
    type Output = BoolPoly;

    fn bitxor(self, other: Self) -> Self::Output {
        self.xor(other)
    }
}

impl BitXor<bool> for &BoolPoly {
    type Output = BoolPoly;

    fn bitxor(self, bit: bool) -> Self::Output {
        self.xor_bit(bit)
    }
}

impl BitXor<bool> for BoolPoly {
    type Output = Self;

    fn bitxor(mut self, bit: bool) -> Self::Output {
        self.constant ^= bit;
        self
    }
}

impl BitXorAssign<&BoolPoly> for BoolPoly {
    fn bitxor_assign(&mut self, other: &BoolPoly) {
        self.xor_assign(other);
    }
}

impl BitXorAssign<bool> for BoolPoly {
    fn bitxor_assign(&mut self, bit: bool) {
        self.constant ^= bit;
    }
}

impl BitAnd for &BoolPoly {
    type Output = BoolPoly;

    fn bitand(self, other: Self) -> Self::Output {
        self.and(other)
    }
}

impl BitAnd for BoolPoly {
    type Output = Self;

    fn bitand(self, other: Self) -> Self::Output {
        (&self).and(&other)
    }
}

impl Not for &BoolPoly {
    type Output = BoolPoly;

    fn not(self) -> Self::Output {
        self.invert()
    }
}

impl Not for BoolPoly {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.constant ^= true;
        self
    }
}

/// Human-readable sum of monomials: `1 + x0 + x3 + x1*x2`.
impl fmt::Display for BoolPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<String> = Vec::with_capacity(1 + self.term_count());
        if self.constant {
            terms.push("1".to_string());
        }
        terms.extend(self.linear.iter().map(|v| format!("x{}", v)));
        terms.extend(self.nonlinear.iter().map(|mono| {
            mono.iter()
                .map(|v| format!("x{}", v))
                .collect::<Vec<_>>()
                .join("*")
        }));
        if terms.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests;
