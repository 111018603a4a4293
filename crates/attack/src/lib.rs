//! Preimage search on reduced-round Keccak-f
//!
//! Drives the `keccak-anf-algebra` engine through the two-round scenario:
//! symbolic rounds with a conditional-θ round, zero-prefix constraints,
//! propagation and a final GF(2) solve, followed by a concrete check.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod scenario;

pub use config::AttackConfig;
pub use error::{Error, Result};
pub use scenario::{AttackOutcome, PreimageAttack};
