//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and never derive `ToSchema`. The
//! wrappers here mirror their wire shape for utoipa's external schema
//! registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The course is not awaiting verification, or another verifier wrote
    /// first.
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Message is always redacted to `Internal server error`.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "price must not be negative")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Machine-readable context such as `{ "field": "price", "code": "negative_price" }`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Principal`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Principal)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PrincipalSchema {
    #[schema(example = "6f1c2d3e-0001-4a5b-8c9d-000000000001")]
    user_id: String,
    #[schema(example = "Ustadh Yusuf")]
    display_name: String,
    #[schema(example = "teacher@deenify.test")]
    email: String,
    #[schema(example = "teacher")]
    role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_to_json::<ErrorSchema>().contains("traceId"));
    }

    #[rstest]
    fn principal_schema_mirrors_wire_shape() {
        let json = schema_to_json::<PrincipalSchema>();
        assert!(json.contains("userId"));
        assert!(json.contains("displayName"));
    }
}
