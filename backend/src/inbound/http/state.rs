//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they only depend on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseQuery, CourseSubmissionCommand, CourseVerificationCommand, LoginService,
    VerificationQueueQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub submissions: Arc<dyn CourseSubmissionCommand>,
    pub verifications: Arc<dyn CourseVerificationCommand>,
    pub queue: Arc<dyn VerificationQueueQuery>,
    pub courses: Arc<dyn CourseQuery>,
}

impl HttpState {
    /// Build state where a single workflow implementation serves every
    /// course port.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use backend::domain::CourseWorkflowService;
    /// use backend::domain::ports::{FixtureCourseRepository, FixtureLoginService, FixtureVerifierNotifier};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let workflow = Arc::new(CourseWorkflowService::new(
    ///     Arc::new(FixtureCourseRepository),
    ///     Arc::new(FixtureVerifierNotifier),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::with_workflow(Arc::new(FixtureLoginService), workflow);
    /// # let _ = state;
    /// ```
    pub fn with_workflow<W>(login: Arc<dyn LoginService>, workflow: Arc<W>) -> Self
    where
        W: CourseSubmissionCommand
            + CourseVerificationCommand
            + VerificationQueueQuery
            + CourseQuery
            + 'static,
    {
        Self {
            login,
            submissions: workflow.clone(),
            verifications: workflow.clone(),
            queue: workflow.clone(),
            courses: workflow,
        }
    }
}
