//! Argument checkers.
//!
//! Each checker returns the checked value on success so calls can be chained
//! into bindings, and a [`DecodeError::InvalidArgument`] naming the offending
//! argument on failure. These signal caller bugs, not runtime conditions.

use std::fmt::Display;
use std::path::Path;

use crate::decode::DecodeError;

/// Check that `value >= min`.
pub fn check_at_least<T>(value: T, min: T, name: &str) -> Result<T, DecodeError>
where
    T: PartialOrd + Display + Copy,
{
    if value >= min {
        Ok(value)
    } else {
        Err(DecodeError::InvalidArgument(format!(
            "{} must be at least {} (got {})",
            name, min, value
        )))
    }
}

/// Check that `value <= max`.
pub fn check_at_most<T>(value: T, max: T, name: &str) -> Result<T, DecodeError>
where
    T: PartialOrd + Display + Copy,
{
    if value <= max {
        Ok(value)
    } else {
        Err(DecodeError::InvalidArgument(format!(
            "{} must be at most {} (got {})",
            name, max, value
        )))
    }
}

/// Check that an optional argument was supplied.
pub fn check_present<T>(value: Option<T>, name: &str) -> Result<T, DecodeError> {
    value.ok_or_else(|| DecodeError::InvalidArgument(format!("{} cannot be null", name)))
}

/// Check that a path is not empty.
pub fn check_not_empty<'a>(path: &'a Path, name: &str) -> Result<&'a Path, DecodeError> {
    if path.as_os_str().is_empty() {
        Err(DecodeError::InvalidArgument(format!("{} cannot be empty", name)))
    } else {
        Ok(path)
    }
}
