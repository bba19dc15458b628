//! Shared request parsing helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CourseId, Error, LoginValidationError};

/// Parse a course identifier from a path segment.
pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    raw.parse::<CourseId>().map_err(|_| {
        Error::invalid_request("course id must be a valid UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

/// Map login payload validation failures onto the error payload.
pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": "missing_field",
    }))
}
