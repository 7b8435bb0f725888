use crate::models::ErrorResponse;
use rocket::http::Status;
use rocket::{catch, Request};

/// Keeps framework-level failures (bad JSON bodies, unknown routes) in the
/// same `{ "error": ... }` shape as handler errors.
#[catch(default)]
pub fn json_catcher(status: Status, _request: &Request) -> ErrorResponse {
    ErrorResponse {
        status,
        error: status.reason_lossy().to_string(),
        details: None,
    }
}
