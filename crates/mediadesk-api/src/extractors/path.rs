//! Typed path parameter helpers.

use std::str::FromStr;

use mediadesk_core::error::AppError;

/// Parses an identifier from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.trim()
        .parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
