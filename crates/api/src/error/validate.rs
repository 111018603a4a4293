//! Validation utilities

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate that `index` addresses one of `len` slots
#[inline(always)]
pub fn index(context: &'static str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfRange {
            context,
            index,
            len,
        });
    }
    Ok(())
}

/// Validate a lane width
#[inline(always)]
pub fn width(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::LaneWidth {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}
