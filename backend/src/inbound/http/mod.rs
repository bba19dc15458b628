//! HTTP inbound adapter exposing the REST endpoints.

pub mod course_dto;
pub mod courses;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod verification;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler and extractor error mapping.
///
/// `/courses/mine` is registered before `/courses/{id}` so the literal
/// segment wins.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::register_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(register_api));
/// ```
pub fn register_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::login)
        .service(users::logout)
        .service(users::me)
        .service(courses::submit_course)
        .service(courses::my_courses)
        .service(courses::get_course)
        .service(verification::verify_course)
        .service(verification::verification_queue);
}
