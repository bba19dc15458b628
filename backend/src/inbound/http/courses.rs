//! Course submission and lookup handlers.
//!
//! ```text
//! POST /api/v1/courses
//! GET  /api/v1/courses/mine
//! GET  /api/v1/courses/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::SubmitCourseRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::course_dto::{CourseResponse, SubmitCourseBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_course_id;

/// Submit a course for verification.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = SubmitCourseBody,
    responses(
        (status = 201, description = "Course created in pending_verification", body = CourseResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only teachers may submit", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "submitCourse"
)]
#[post("/courses")]
pub async fn submit_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitCourseBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let course = state
        .submissions
        .submit(SubmitCourseRequest {
            principal,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Courses submitted by the signed-in teacher.
#[utoipa::path(
    get,
    path = "/api/v1/courses/mine",
    responses(
        (status = 200, description = "Submitted courses, newest first", body = [CourseResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only teachers have submissions", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listMyCourses"
)]
#[get("/courses/mine")]
pub async fn my_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let principal = session.require_principal()?;
    let courses = state.courses.list_mine(&principal).await?;
    Ok(web::Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or not visible", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let principal = session.require_principal()?;
    let course_id = parse_course_id(&path.into_inner())?;
    let course = state.courses.get(&principal, &course_id).await?;
    Ok(web::Json(CourseResponse::from(course)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{login, test_app, workflow_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn teacher_submission_returns_pending_course() {
        let app = actix_test::init_service(test_app(workflow_state())).await;
        let cookie = login(&app, "teacher").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .cookie(cookie)
                .set_json(json!({
                    "title": "Tajweed 101",
                    "description": "Rules of recitation",
                    "category": "quran",
                    "price": 0
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: CourseResponse = actix_test::read_body_json(res).await;
        assert_eq!(body.status, "pending_verification");
        assert_eq!(body.teacher_name, "Ustadh Yusuf");
        assert_eq!(body.revision, 1);
        assert!(body.verifier_id.is_none());
    }

    #[rstest]
    #[case(json!({ "title": "T", "description": "D", "category": "fiqh", "price": -1 }), "price", "negative_price")]
    #[case(json!({ "description": "D", "category": "fiqh", "price": 1 }), "title", "missing_field")]
    #[case(json!({ "title": "T", "description": "D", "category": " ", "price": 1 }), "category", "missing_field")]
    #[actix_web::test]
    async fn invalid_submissions_are_rejected(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(workflow_state())).await;
        let cookie = login(&app, "teacher").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .cookie(cookie.clone())
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);

        let mine = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/courses/mine")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let courses: Vec<CourseResponse> = actix_test::read_body_json(mine).await;
        assert!(courses.is_empty(), "no record is created on failure");
    }

    #[actix_web::test]
    async fn students_cannot_submit() {
        let app = actix_test::init_service(test_app(workflow_state())).await;
        let cookie = login(&app, "student").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/courses")
                .cookie(cookie)
                .set_json(json!({ "title": "T", "description": "D", "category": "c", "price": 1 }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let app = actix_test::init_service(test_app(workflow_state())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/courses/mine").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("not-a-uuid", StatusCode::BAD_REQUEST)]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn get_course_rejects_bad_or_unknown_ids(#[case] id: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(test_app(workflow_state())).await;
        let cookie = login(&app, "verifier").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/courses/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
    }
}
