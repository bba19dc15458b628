//! Verifier handlers.
//!
//! ```text
//! POST /api/v1/courses/{id}/verification {"action":"reject","feedback":"needs citations"}
//! GET  /api/v1/verification/queue?status=pending_verification
//! ```

use actix_web::{get, post, web};

use crate::domain::ports::{VerificationQueueRequest, VerifyCourseRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::course_dto::{CourseResponse, QueueParams, VerificationBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_course_id;

/// Approve or reject a pending course.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/verification",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = VerificationBody,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Unknown action or missing feedback", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only verifiers may decide", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 409, description = "Not pending, or another verifier decided first", body = ErrorSchema)
    ),
    tags = ["verification"],
    operation_id = "verifyCourse"
)]
#[post("/courses/{id}/verification")]
pub async fn verify_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VerificationBody>,
) -> ApiResult<web::Json<CourseResponse>> {
    let principal = session.require_principal()?;
    let course_id = parse_course_id(&path.into_inner())?;
    let VerificationBody { action, feedback } = payload.into_inner();

    let course = state
        .verifications
        .verify(VerifyCourseRequest {
            principal,
            course_id,
            action,
            feedback,
        })
        .await?;
    Ok(web::Json(CourseResponse::from(course)))
}

/// Verifier work queue.
#[utoipa::path(
    get,
    path = "/api/v1/verification/queue",
    params(QueueParams),
    responses(
        (status = 200, description = "Courses in the requested status, newest first", body = [CourseResponse]),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only verifiers may read the queue", body = ErrorSchema)
    ),
    tags = ["verification"],
    operation_id = "verificationQueue"
)]
#[get("/verification/queue")]
pub async fn verification_queue(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<QueueParams>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let principal = session.require_principal()?;
    let courses = state
        .queue
        .list(VerificationQueueRequest {
            principal,
            status: query.into_inner().status,
        })
        .await?;
    Ok(web::Json(courses.into_iter().map(CourseResponse::from).collect()))
}
