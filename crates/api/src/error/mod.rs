//! Error handling for the symbolic algebra engine

pub mod traits;
pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, Result, Var};

// Re-export error traits
pub use traits::ResultExt;
