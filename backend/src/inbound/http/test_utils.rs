//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::json;

use super::course_dto::CourseResponse;
use super::register_api;
use super::state::HttpState;
use crate::domain::CourseWorkflowService;
use crate::domain::ports::{FixtureLoginService, FixtureVerifierNotifier};
use crate::outbound::memory::InMemoryCourseRepository;

/// Session middleware with a fresh key and an insecure `session` cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock that advances one second per reading so submission order is
/// strictly increasing.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .expect("valid start timestamp");
        Self(Mutex::new(start))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().expect("clock lock");
        *now += chrono::Duration::seconds(1);
        *now
    }
}

/// Handler state backed by the in-memory repository and demo logins.
pub fn workflow_state() -> HttpState {
    let workflow = Arc::new(CourseWorkflowService::new(
        Arc::new(InMemoryCourseRepository::default()),
        Arc::new(FixtureVerifierNotifier),
        Arc::new(SteppingClock::default()),
    ));
    HttpState::with_workflow(Arc::new(FixtureLoginService), workflow)
}

/// App exposing `/api/v1` over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(register_api),
    )
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Sign in as a demo account and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login as {username} failed");
    session_cookie(&res)
}

/// Submit a valid course with the given title.
pub async fn submit_course<S>(app: &S, cookie: &Cookie<'static>, title: &str) -> CourseResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": title,
                "description": "Course description",
                "category": "fiqh",
                "price": 10.0
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "submission of {title} failed");
    test::read_body_json(res).await
}
