//! Error handling for the attack driver.

use std::path::PathBuf;

use keccak_anf_api::Error as CoreError;
use thiserror::Error;

/// Error type for driver operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure inside the symbolic engine or a rejected parameter
    #[error("algebra error: {0}")]
    Api(#[from] CoreError),

    /// Configuration file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`crate::AttackConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result type for driver operations.
pub type Result<T> = core::result::Result<T, Error>;
