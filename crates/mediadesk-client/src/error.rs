//! Maps HTTP failures into [`AppError`].

use reqwest::StatusCode;

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_entity::ApiErrorResponse;

/// Convert a transport-level reqwest failure.
pub fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::with_source(ErrorKind::Network, "Request timed out", err);
    }
    if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response body: {err}"),
            err,
        );
    }
    if err.is_connect() {
        return AppError::with_source(
            ErrorKind::Network,
            "Could not connect to the MediaDesk server",
            err,
        );
    }
    AppError::with_source(ErrorKind::Network, format!("Request failed: {err}"), err)
}

/// Kind implied by a status code alone.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        StatusCode::PAYLOAD_TOO_LARGE => ErrorKind::Validation,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        _ => ErrorKind::Network,
    }
}

/// Rebuild the server's error from a non-success response body.
///
/// Falls back to the status code when the body is not an
/// [`ApiErrorResponse`].
pub fn status_error(status: StatusCode, body: &[u8]) -> AppError {
    match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(parsed) => {
            let kind = ErrorKind::from_code(&parsed.error).unwrap_or_else(|| kind_for_status(status));
            AppError::new(kind, parsed.message)
        }
        Err(_) => AppError::new(
            kind_for_status(status),
            format!("Request failed with status {status}"),
        ),
    }
}
