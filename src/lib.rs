//! # keccak-anf
//!
//! Symbolic algebraic cryptanalysis of reduced-round Keccak-f.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! keccak-anf = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `attack` (default): the preimage scenario driver
//! - `serde`: `Serialize`/`Deserialize` for polynomials, lanes and solutions
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`keccak-anf-api`]: Error type and validation helpers
//! - [`keccak-anf-params`]: Keccak-f round constants and geometry
//! - [`keccak-anf-algebra`]: Polynomials, symbolic state, constraint store, solver
//! - [`keccak-anf-attack`]: Preimage scenario and its configuration
//!
//! ## Example
//!
//! ```
//! use keccak_anf::prelude::*;
//!
//! let mut state = PolyState::new(8)?;
//! state.set_lane(0, PolyLane::variables(8, 0))?;
//!
//! let mut store = ConstraintStore::new();
//! state.linearized_round(0, &mut store)?;
//! store.append(state.bit(1)?.clone());
//!
//! if store.propagate()? != Propagation::Unsatisfiable && store.is_linear() {
//!     let solution = LinearSolver::new(&store)?.solve();
//!     assert!(solution.assignment().is_some());
//! }
//! # Ok::<(), keccak_anf::api::Error>(())
//! ```

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use keccak_anf_algebra as algebra;
pub use keccak_anf_api as api;
pub use keccak_anf_params as params;

// Feature-gated re-exports
#[cfg(feature = "attack")]
pub use keccak_anf_attack as attack;

/// Common imports for keccak-anf users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, Var};

    // Re-export the symbolic engine
    pub use crate::algebra::{
        BoolPoly,
        ConstraintStore,
        LinearSolver,
        PolyLane,
        PolyState,
        Propagation,
        Solution,
    };

    #[cfg(feature = "attack")]
    pub use crate::attack::{AttackConfig, AttackOutcome, PreimageAttack};
}
