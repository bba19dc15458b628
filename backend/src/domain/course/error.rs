//! Validation failures for course submissions and verification decisions.

use serde_json::json;

use crate::domain::Error;

/// Validation failures raised while building course values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("price must not be negative")]
    NegativePrice,
    #[error("price must be a finite number")]
    InvalidPrice,
    #[error("feedback is required when rejecting a course")]
    MissingFeedback,
    #[error("unknown verification action: {0}")]
    InvalidAction(String),
    #[error("unknown course status: {0}")]
    InvalidStatus(String),
}

impl CourseValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::NegativePrice | Self::InvalidPrice => "price",
            Self::MissingFeedback => "feedback",
            Self::InvalidAction(_) => "action",
            Self::InvalidStatus(_) => "status",
        }
    }

    /// Machine-readable detail code surfaced to clients.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::NegativePrice => "negative_price",
            Self::InvalidPrice => "invalid_price",
            Self::MissingFeedback => "missing_feedback",
            Self::InvalidAction(_) => "invalid_action",
            Self::InvalidStatus(_) => "invalid_status",
        }
    }
}

impl From<CourseValidationError> for Error {
    fn from(value: CourseValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(CourseValidationError::MissingField { field: "title" }, "title", "missing_field")]
    #[case(CourseValidationError::NegativePrice, "price", "negative_price")]
    #[case(CourseValidationError::InvalidPrice, "price", "invalid_price")]
    #[case(CourseValidationError::MissingFeedback, "feedback", "missing_feedback")]
    #[case(CourseValidationError::InvalidAction("publish".into()), "action", "invalid_action")]
    #[case(CourseValidationError::InvalidStatus("archived".into()), "status", "invalid_status")]
    fn maps_to_invalid_request_with_details(
        #[case] err: CourseValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = Error::from(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        let details = mapped.details().expect("details attached");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }
}
