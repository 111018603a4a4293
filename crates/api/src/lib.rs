//! Public error surface for the keccak-anf workspace
//!
//! Every fallible operation in the algebra engine and the attack driver
//! returns [`Result`]. Logical outcomes such as an unsatisfiable system are
//! *not* errors; they are reported through the result enums of the algebra
//! crate.

pub mod error;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, ResultExt, Result, Var};
