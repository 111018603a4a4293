//! Constant values for the Keccak-f permutation family
//!
//! The tables are the ones of FIPS 202 and are treated as given parameters
//! by the symbolic engine: nothing here is derived at runtime.

#![no_std]

pub mod keccak;

pub use keccak::*;
