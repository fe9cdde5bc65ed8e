//! The `root` sentinel used wherever a folder reference may be absent.

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::id::FolderId;

/// Wire value standing for the top-level folder.
pub const ROOT_SENTINEL: &str = "root";

/// Parse a folder reference from a query or form value.
///
/// Empty strings and [`ROOT_SENTINEL`] both resolve to `None` (root).
pub fn parse_folder_param(value: &str) -> AppResult<Option<FolderId>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ROOT_SENTINEL) {
        return Ok(None);
    }
    value
        .parse::<FolderId>()
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid folder id '{value}'")))
}

/// Render a folder reference for a query string.
pub fn folder_param(folder_id: Option<FolderId>) -> String {
    match folder_id {
        Some(id) => id.to_string(),
        None => ROOT_SENTINEL.to_string(),
    }
}
