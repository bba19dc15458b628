//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint, the DTO schemas, and the session
//! cookie security scheme. Swagger UI serves it in debug builds and
//! `openapi-dump` prints it for external tooling.

use crate::inbound::http::course_dto::{CourseResponse, SubmitCourseBody, VerificationBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PrincipalSchema};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Deenify course verification API",
        description = "Course submission, verification queue and session endpoints.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::courses::submit_course,
        crate::inbound::http::courses::my_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::verification::verify_course,
        crate::inbound::http::verification::verification_queue,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseResponse,
        SubmitCourseBody,
        VerificationBody,
        LoginRequest,
        PrincipalSchema,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "session", description = "Login, logout and the current principal"),
        (name = "courses", description = "Course submission and lookup"),
        (name = "verification", description = "Verifier decisions and the review queue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
