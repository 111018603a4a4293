//! Symbolic algebra for Keccak-f cryptanalysis
//!
//! This crate tracks every bit of a reduced-round Keccak-f state as a Boolean
//! polynomial in algebraic normal form, collects the polynomial constraints
//! produced along the way, and solves the system once it has become linear.
//!
//! - [`poly`]: [`BoolPoly`], polynomials over GF(2) modulo xᵢ² = xᵢ
//! - [`lane`]: [`PolyLane`], one symbolic machine word
//! - [`state`]: [`PolyState`], the 5×5 lane grid and the round sub-steps
//! - [`store`]: [`ConstraintStore`], the `p = 0` system with forced-value propagation
//! - [`linear`]: [`LinearSolver`], GF(2) elimination over a linear store
//! - [`reference`]: the concrete permutation used to check results

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod lane;
pub mod linear;
pub mod poly;
pub mod reference;
pub mod state;
pub mod store;

pub use lane::PolyLane;
pub use linear::{LinearEquation, LinearSolver, Solution};
pub use poly::{BoolPoly, Monomial};
pub use state::PolyState;
pub use store::{ConstraintStore, Propagation, StoreStats};

pub use keccak_anf_api::{Error, Result, Var};

/// Common imports for symbolic work
pub mod prelude {
    pub use crate::lane::PolyLane;
    pub use crate::linear::{LinearSolver, Solution};
    pub use crate::poly::BoolPoly;
    pub use crate::state::PolyState;
    pub use crate::store::{ConstraintStore, Propagation};
    pub use keccak_anf_api::{Error, Result, Var};
}
