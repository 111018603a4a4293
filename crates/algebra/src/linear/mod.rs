//! GF(2) Gaussian elimination over the linear residue of a constraint store
//!
//! Each stored polynomial of degree ≤ 1 becomes an equation
//! `c + Σ xᵢ = 0`. Elimination is Gauss-Jordan with XOR as the only row
//! operation; free variables are defaulted to zero.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::BitXorAssign;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use keccak_anf_api::{Error, Result, Var};

use crate::store::ConstraintStore;

/// Outcome of [`LinearSolver::solve`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Solution {
    /// Elimination produced `1 = 0`
    Unsatisfiable,
    /// Prior assignments merged with the solved and defaulted variables
    Assignment(BTreeMap<Var, bool>),
}

impl Solution {
    /// The assignment map, if any
    pub fn assignment(&self) -> Option<&BTreeMap<Var, bool>> {
        match self {
            Solution::Assignment(map) => Some(map),
            Solution::Unsatisfiable => None,
        }
    }
}

/// One equation `constant + Σ vars = 0`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinearEquation {
    constant: bool,
    vars: BTreeSet<Var>,
}

impl LinearEquation {
    /// Builds an equation from its constant and variables
    pub fn new(constant: bool, vars: BTreeSet<Var>) -> Self {
        Self { constant, vars }
    }

    /// Constant term
    pub fn constant(&self) -> bool {
        self.constant
    }

    /// Involved variables
    pub fn vars(&self) -> &BTreeSet<Var> {
        &self.vars
    }

    /// True when no variable is left
    pub fn is_constant(&self) -> bool {
        self.vars.is_empty()
    }

    /// True when `var` occurs in the equation
    pub fn contains(&self, var: Var) -> bool {
        self.vars.contains(&var)
    }

    /// Pivot choice: the smallest variable, for reproducibility.
    pub fn choose_var(&self) -> Option<Var> {
        self.vars.iter().next().copied()
    }
}

impl BitXorAssign<&LinearEquation> for LinearEquation {
    fn bitxor_assign(&mut self, other: &LinearEquation) {
        self.constant ^= other.constant;
        self.vars = self.vars.symmetric_difference(&other.vars).copied().collect();
    }
}

impl fmt::Display for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constant as u8)?;
        for v in &self.vars {
            write!(f, " + x{}", v)?;
        }
        Ok(())
    }
}

/// Transient elimination view of a fully linear store.
#[derive(Debug, Clone)]
pub struct LinearSolver {
    eqs: Vec<LinearEquation>,
    pivot_eq: BTreeMap<Var, usize>,
    assignments: BTreeMap<Var, bool>,
}

impl LinearSolver {
    /// Builds the equation list; fails if any stored polynomial is nonlinear.
    pub fn new(store: &ConstraintStore) -> Result<Self> {
        let mut eqs = Vec::with_capacity(store.len());
        for (index, poly) in store.polys().iter().enumerate() {
            if !poly.is_linear() {
                return Err(Error::UnsupportedSystem {
                    context: "linear solver",
                    index,
                });
            }
            eqs.push(LinearEquation::new(poly.constant_term(), poly.linear().clone()));
        }
        debug!(
            equations = eqs.len(),
            known = store.assignments().len(),
            "linear system"
        );
        Ok(Self {
            eqs,
            pivot_eq: BTreeMap::new(),
            assignments: store.assignments().clone(),
        })
    }

    /// Builds a solver straight from equations, with no prior assignments.
    pub fn from_equations(eqs: Vec<LinearEquation>) -> Self {
        Self {
            eqs,
            pivot_eq: BTreeMap::new(),
            assignments: BTreeMap::new(),
        }
    }

    /// Current equations
    pub fn equations(&self) -> &[LinearEquation] {
        &self.eqs
    }

    /// Forward elimination followed by back-substitution.
    pub fn solve(mut self) -> Solution {
        for i in 0..self.eqs.len() {
            let Some(var) = self.eqs[i].choose_var() else {
                if self.eqs[i].constant {
                    debug!(equation = i, "linear system inconsistent");
                    return Solution::Unsatisfiable;
                }
                continue;
            };
            trace!(equation = i, pivot = var, "pivot");
            self.pivot_eq.insert(var, i);

            let pivot = self.eqs[i].clone();
            for (j, eq) in self.eqs.iter_mut().enumerate() {
                if j != i && eq.contains(var) {
                    *eq ^= &pivot;
                }
            }
        }

        // Pivot rows now only mention their pivot and free variables.
        let mut free = 0usize;
        for (&var, &i) in &self.pivot_eq {
            let eq = &self.eqs[i];
            self.assignments.insert(var, eq.constant);
            for &other in &eq.vars {
                if other != var && !self.assignments.contains_key(&other) {
                    self.assignments.insert(other, false);
                    free += 1;
                }
            }
        }
        debug!(
            pivots = self.pivot_eq.len(),
            free,
            total = self.assignments.len(),
            "linear system solved"
        );
        Solution::Assignment(self.assignments)
    }
}
