//! End-to-end HTTP coverage of the course verification endpoints.
//!
//! The app is assembled the way the server assembles it (trace middleware,
//! cookie sessions, `/api/v1` scope) over the in-memory course store.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use backend::Trace;
use backend::domain::ports::{FixtureLoginService, FixtureVerifierNotifier};
use backend::domain::{CourseWorkflowService, TRACE_ID_HEADER};
use backend::inbound::http::register_api;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryCourseRepository;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

fn state() -> web::Data<HttpState> {
    let workflow = Arc::new(CourseWorkflowService::new(
        Arc::new(InMemoryCourseRepository::default()),
        Arc::new(FixtureVerifierNotifier),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::with_workflow(
        Arc::new(FixtureLoginService),
        workflow,
    ))
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new().app_data(state()).wrap(Trace).service(
                web::scope("/api/v1")
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .configure(register_api),
            ),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let res = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": $username, "password": "password" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK, "login as {}", $username);
        let cookie: Cookie<'static> = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();
        cookie
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(res).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, trace_id, json)
    }};
}

fn course_payload(title: &str, price: f64) -> Value {
    json!({
        "title": title,
        "description": "Rules of recitation for beginners",
        "category": "quran",
        "level": "beginner",
        "price": price
    })
}

#[rstest]
#[actix_web::test]
async fn submit_reject_and_review_round_trip() {
    let app = init_app!();
    let teacher = login!(app, "teacher");
    let verifier = login!(app, "verifier");

    let (status, _, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(teacher.clone())
            .set_json(course_payload("Tajweed 101", 0.0))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending_verification");
    assert_eq!(created["teacherName"], "Ustadh Yusuf");
    let id = created["id"].as_str().expect("course id").to_owned();

    let (status, _, queue) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/verification/queue?status=pending_verification")
            .cookie(verifier.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue.as_array().map(Vec::len), Some(1));

    let (status, _, rejected) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{id}/verification"))
            .cookie(verifier.clone())
            .set_json(json!({ "action": "reject", "feedback": "needs citations" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["rejectionFeedback"], "needs citations");
    assert!(rejected["verifierId"].is_string());

    let (status, _, mine) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/courses/mine")
            .cookie(teacher.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["status"], "rejected");

    let (status, _, queue) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/verification/queue")
            .cookie(verifier)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue, json!([]));
}

#[rstest]
#[actix_web::test]
async fn students_only_see_approved_courses() {
    let app = init_app!();
    let teacher = login!(app, "teacher");
    let verifier = login!(app, "verifier");
    let student = login!(app, "student");

    let (_, _, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(teacher)
            .set_json(course_payload("Seerah Essentials", 15.0))
    );
    let uri = format!("/api/v1/courses/{}", created["id"].as_str().expect("id"));

    let (status, _, _) = send!(app, test::TestRequest::get().uri(&uri).cookie(student.clone()));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("{uri}/verification"))
            .cookie(verifier)
            .set_json(json!({ "action": "approve" }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _, course) = send!(app, test::TestRequest::get().uri(&uri).cookie(student));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course["status"], "approved");
    assert!(course["verifiedAt"].is_string());
}

#[rstest]
#[case(json!({ "title": "Tajweed 101", "description": "d", "category": "quran", "price": -1.0 }), "price")]
#[case(json!({ "description": "d", "category": "quran", "price": 0.0 }), "title")]
#[case(json!({ "title": "Tajweed 101", "description": "d", "price": 0.0 }), "category")]
#[actix_web::test]
async fn invalid_submissions_report_the_field(#[case] payload: Value, #[case] field: &str) {
    let app = init_app!();
    let teacher = login!(app, "teacher");

    let (status, trace_id, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(teacher.clone())
            .set_json(payload)
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());

    let (_, _, mine) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/courses/mine")
            .cookie(teacher)
    );
    assert_eq!(mine, json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = init_app!();
    let teacher = login!(app, "teacher");

    let (status, _, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(teacher)
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised_with_trace_ids() {
    let app = init_app!();

    let (status, trace_id, body) =
        send!(app, test::TestRequest::get().uri("/api/v1/courses/mine"));

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let trace_id = trace_id.expect("trace id header");
    assert_eq!(body["traceId"].as_str(), Some(trace_id.as_str()));
}
