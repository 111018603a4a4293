//! Constraint store
//!
//! An ordered collection of polynomials, each asserted to equal zero, plus
//! the variable values fixed so far. Insertion performs a mutual subset
//! rewrite against the stored polynomials (see [`BoolPoly::subset_of`]);
//! this is a cheap normal form, not a Gröbner basis.
//!
//! Scans always run in insertion order, so which of two polynomials ends up
//! reduced against the other is reproducible.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use keccak_anf_api::{Error, Result, Var};

use crate::poly::BoolPoly;

/// Outcome of [`ConstraintStore::propagate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Propagation {
    /// Every constraint was discharged
    Satisfied,
    /// Some constraint reduced to `1 = 0`
    Unsatisfiable,
    /// No constraint forces a single variable; the residue needs another method
    NoProgress,
}

/// Diagnostic snapshot of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoreStats {
    /// Stored polynomials
    pub polys: usize,
    /// Stored polynomials of degree ≤ 1
    pub linear: usize,
    /// Stored polynomials of degree ≥ 2
    pub nonlinear: usize,
    /// Variables with a recorded value
    pub assigned: usize,
    /// Largest term count ever inserted
    pub peak_terms: usize,
}

/// Polynomials known to equal zero, kept mutually reduced and substituted.
///
/// Invariant: no stored polynomial references a variable of `assignments`.
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    polys: Vec<BoolPoly>,
    assignments: BTreeMap<Var, bool>,
    peak_terms: usize,
}

impl ConstraintStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored polynomials, in insertion order
    pub fn polys(&self) -> &[BoolPoly] {
        &self.polys
    }

    /// Recorded variable values
    pub fn assignments(&self) -> &BTreeMap<Var, bool> {
        &self.assignments
    }

    /// Number of stored polynomials
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Largest term count ever inserted through [`append`](Self::append)
    pub fn peak_terms(&self) -> usize {
        self.peak_terms
    }

    /// True when every stored polynomial has degree ≤ 1
    pub fn is_linear(&self) -> bool {
        self.polys.iter().all(BoolPoly::is_linear)
    }

    /// Diagnostic snapshot
    pub fn stats(&self) -> StoreStats {
        let linear = self.polys.iter().filter(|p| p.is_linear()).count();
        StoreStats {
            polys: self.polys.len(),
            linear,
            nonlinear: self.polys.len() - linear,
            assigned: self.assignments.len(),
            peak_terms: self.peak_terms,
        }
    }

    /// Inserts `p = 0` with mutual reduction.
    ///
    /// Every stored `q` is visited in order: a `q ⊆ p` is XORed into `p`
    /// (returning early once `p` vanishes), then a stored `q ⊇ p` absorbs the
    /// current `p`. Whatever remains of `p` is appended.
    pub fn append(&mut self, mut p: BoolPoly) {
        // Keep the substitution invariant for late arrivals.
        if !self.assignments.is_empty() {
            p.assign_all(&self.assignments);
        }
        if p.is_zero() {
            return;
        }
        self.peak_terms = self.peak_terms.max(p.term_count());
        for q in self.polys.iter_mut() {
            if q.subset_of(&p) {
                p.xor_assign(q);
            }
            if p.is_zero() {
                return;
            }
            if p.subset_of(q) {
                q.xor_assign(&p);
            }
        }
        self.polys.push(p);
    }

    /// Read-only version of the insertion rewrite: XORs every stored
    /// polynomial that is a subset of `poly` into it.
    pub fn reduce(&self, mut poly: BoolPoly) -> BoolPoly {
        for q in &self.polys {
            if q.subset_of(&poly) {
                poly.xor_assign(q);
            }
        }
        poly
    }

    /// Records `x_var = value` and substitutes it into every stored polynomial.
    ///
    /// Assignment is idempotent rather than write-once: recording the value a
    /// variable already holds succeeds without touching the store, so callers
    /// may re-apply overlapping sets of known bits. Only a different value is
    /// rejected, with [`Error::ConflictingAssignment`].
    pub fn assign(&mut self, var: Var, value: bool) -> Result<()> {
        if let Some(&recorded) = self.assignments.get(&var) {
            if recorded != value {
                return Err(Error::ConflictingAssignment {
                    var,
                    recorded,
                    requested: value,
                });
            }
            return Ok(());
        }
        trace!(var, value, "assign");
        self.assignments.insert(var, value);
        for poly in self.polys.iter_mut() {
            poly.assign(var, value);
        }
        Ok(())
    }

    /// Drops every polynomial that became zero.
    pub fn clean_zero(&mut self) {
        self.polys.retain(|p| !p.is_zero());
    }

    /// Forced-assignment propagation to a fixpoint.
    ///
    /// Each round drops zero constraints, stops on an empty store or on a
    /// constant one, and otherwise assigns every variable pinned down by a
    /// constraint of the form `x + c`. Terminates because every productive
    /// round removes at least one free variable.
    pub fn propagate(&mut self) -> Result<Propagation> {
        loop {
            self.clean_zero();
            if self.polys.is_empty() {
                debug!(assigned = self.assignments.len(), "propagation satisfied");
                return Ok(Propagation::Satisfied);
            }
            if self.polys.iter().any(BoolPoly::is_one) {
                debug!(polys = self.polys.len(), "propagation reached 1 = 0");
                return Ok(Propagation::Unsatisfiable);
            }

            let mut forced = BTreeMap::new();
            for poly in self.polys.iter().filter(|p| p.is_variable()) {
                if let Some(&var) = poly.linear().iter().next() {
                    // x + c = 0  ⇒  x = c
                    forced.insert(var, poly.constant_term());
                }
            }
            if forced.is_empty() {
                debug!(
                    polys = self.polys.len(),
                    assigned = self.assignments.len(),
                    "propagation stalled"
                );
                return Ok(Propagation::NoProgress);
            }

            debug!(
                polys = self.polys.len(),
                forced = forced.len(),
                "propagation round"
            );
            for (var, value) in forced {
                self.assign(var, value)?;
            }
        }
    }
}

/// One constraint per line.
impl fmt::Display for ConstraintStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, poly) in self.polys.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", poly)?;
        }
        Ok(())
    }
}
