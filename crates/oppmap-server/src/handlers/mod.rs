//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod catalog;
pub mod session;

// Re-export all handlers for use in router
pub use analytics::*;
pub use catalog::*;
pub use session::*;

use crate::AppError;

/// Parse an optional query value with the type's lenient `FromStr`
pub(crate) fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse().map(Some).map_err(|e: String| AppError::bad_request(&e)),
        None => Ok(None),
    }
}
