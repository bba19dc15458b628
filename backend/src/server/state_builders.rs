//! Wiring of driven adapters behind the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use backend::domain::CourseWorkflowService;
use backend::domain::ports::{CourseRepository, FixtureLoginService, LoginService};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryCourseRepository;
use backend::outbound::notify::TracingVerifierNotifier;
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCourseRepository, DieselLoginService,
};

use super::ServerConfig;

fn storage_ports(pool: Option<&DbPool>) -> (Arc<dyn LoginService>, Arc<dyn CourseRepository>) {
    match pool {
        Some(pool) => {
            info!(storage = "postgres", "course storage configured");
            (
                Arc::new(DieselLoginService::new(DieselAccountRepository::new(
                    pool.clone(),
                ))),
                Arc::new(DieselCourseRepository::new(pool.clone())),
            )
        }
        None => {
            info!(storage = "memory", "course storage configured; data is lost on restart");
            (
                Arc::new(FixtureLoginService),
                Arc::new(InMemoryCourseRepository::default()),
            )
        }
    }
}

/// Build the handler state, backed by PostgreSQL when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (login, courses) = storage_ports(config.db_pool.as_ref());
    let workflow = Arc::new(CourseWorkflowService::new(
        courses,
        Arc::new(TracingVerifierNotifier),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::with_workflow(login, workflow))
}
