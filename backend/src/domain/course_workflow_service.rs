//! Course verification workflow.
//!
//! [`CourseWorkflowService`] implements every course driving port. Each use
//! case checks in a fixed order: role, then input validation, then lookup,
//! then the state transition, then the conditional write. No record is
//! touched when an earlier step fails.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::course::policy;
use crate::domain::ports::{
    CourseQuery, CourseRepository, CourseRepositoryError, CourseSubmissionCommand,
    CourseVerificationCommand, SubmitCourseRequest, VerificationQueueQuery,
    VerificationQueueRequest, VerifierNotifier, VerifyCourseRequest,
};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseStatus, CourseStatusKind, CourseValidationError, Error,
    Principal, TransitionError, VerificationDecision,
};

/// Course workflow service implementing the course driving ports.
pub struct CourseWorkflowService<R: ?Sized, N: ?Sized> {
    courses: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, N: ?Sized> Clone for CourseWorkflowService<R, N> {
    fn clone(&self) -> Self {
        Self {
            courses: Arc::clone(&self.courses),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized, N: ?Sized> CourseWorkflowService<R, N> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use backend::domain::CourseWorkflowService;
    /// use backend::domain::ports::{FixtureCourseRepository, FixtureVerifierNotifier};
    ///
    /// let service = CourseWorkflowService::new(
    ///     Arc::new(FixtureCourseRepository),
    ///     Arc::new(FixtureVerifierNotifier),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(courses: Arc<R>, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            notifier,
            clock,
        }
    }
}

impl<R, N> CourseWorkflowService<R, N>
where
    R: CourseRepository + ?Sized,
    N: VerifierNotifier + ?Sized,
{
    fn map_repository_error(error: CourseRepositoryError) -> Error {
        match error {
            CourseRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("course repository unavailable: {message}"))
            }
            CourseRepositoryError::Query { message } => {
                Error::internal(format!("course repository error: {message}"))
            }
            CourseRepositoryError::RevisionMismatch { expected, actual } => {
                Error::conflict("course was modified by another verifier").with_details(json!({
                    "code": "revision_mismatch",
                    "expectedRevision": expected,
                    "actualRevision": actual,
                }))
            }
            CourseRepositoryError::NotFound { course_id } => {
                Error::not_found(format!("course {course_id} not found"))
            }
        }
    }

    fn transition_conflict(error: TransitionError) -> Error {
        let TransitionError::NotAwaitingVerification { current } = error;
        Error::conflict(error.to_string()).with_details(json!({
            "code": "invalid_transition",
            "currentStatus": current,
        }))
    }

    fn require_submitter(principal: &Principal) -> Result<(), Error> {
        if policy::can_submit(principal.role()) {
            Ok(())
        } else {
            Err(Error::forbidden("only teachers may submit courses"))
        }
    }

    fn require_verifier(principal: &Principal) -> Result<(), Error> {
        if policy::can_verify(principal.role()) {
            Ok(())
        } else {
            Err(Error::forbidden("only verifiers may review courses"))
        }
    }

    async fn load(&self, course_id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))
    }
}

#[async_trait]
impl<R, N> CourseSubmissionCommand for CourseWorkflowService<R, N>
where
    R: CourseRepository + ?Sized,
    N: VerifierNotifier + ?Sized,
{
    async fn submit(&self, request: SubmitCourseRequest) -> Result<Course, Error> {
        let SubmitCourseRequest { principal, draft } = request;
        Self::require_submitter(&principal)?;
        let content = CourseDraft::try_from(draft)?;

        let course = Course::submit(CourseId::random(), content, &principal, self.clock.utc());
        self.courses
            .insert(&course)
            .await
            .map_err(Self::map_repository_error)?;

        info!(
            course_id = %course.id,
            teacher_id = %course.submitter.teacher_id,
            "course submitted for verification"
        );

        if let Err(error) = self.notifier.course_submitted(&course).await {
            warn!(course_id = %course.id, %error, "verifier notification failed");
        }

        Ok(course)
    }
}

#[async_trait]
impl<R, N> CourseVerificationCommand for CourseWorkflowService<R, N>
where
    R: CourseRepository + ?Sized,
    N: VerifierNotifier + ?Sized,
{
    async fn verify(&self, request: VerifyCourseRequest) -> Result<Course, Error> {
        let VerifyCourseRequest {
            principal,
            course_id,
            action,
            feedback,
        } = request;
        Self::require_verifier(&principal)?;
        let action = action.ok_or(CourseValidationError::MissingField { field: "action" })?;
        let decision = VerificationDecision::try_from_parts(&action, feedback.as_deref())?;

        let current = self.load(&course_id).await?;
        let updated = current
            .apply_decision(decision, principal.user_id(), self.clock.utc())
            .map_err(Self::transition_conflict)?;

        self.courses
            .save_decision(&updated, current.revision)
            .await
            .map_err(Self::map_repository_error)?;

        match &updated.status {
            CourseStatus::Approved(_) => info!(
                course_id = %updated.id,
                verifier_id = %principal.user_id(),
                "course approved"
            ),
            CourseStatus::Rejected { feedback, .. } => info!(
                course_id = %updated.id,
                verifier_id = %principal.user_id(),
                feedback = feedback.as_str(),
                "course rejected"
            ),
            CourseStatus::Draft | CourseStatus::PendingVerification => warn!(
                course_id = %updated.id,
                status = %updated.status.kind(),
                "decision left course undecided"
            ),
        }

        Ok(updated)
    }
}

#[async_trait]
impl<R, N> VerificationQueueQuery for CourseWorkflowService<R, N>
where
    R: CourseRepository + ?Sized,
    N: VerifierNotifier + ?Sized,
{
    async fn list(&self, request: VerificationQueueRequest) -> Result<Vec<Course>, Error> {
        Self::require_verifier(&request.principal)?;
        let status = match request.status.as_deref() {
            None => CourseStatusKind::default(),
            Some(raw) => raw.parse::<CourseStatusKind>()?,
        };

        self.courses
            .list_by_status(status)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R, N> CourseQuery for CourseWorkflowService<R, N>
where
    R: CourseRepository + ?Sized,
    N: VerifierNotifier + ?Sized,
{
    async fn get(&self, principal: &Principal, course_id: &CourseId) -> Result<Course, Error> {
        let course = self.load(course_id).await?;
        if policy::can_view(principal, &course) {
            Ok(course)
        } else {
            Err(Error::not_found(format!("course {course_id} not found")))
        }
    }

    async fn list_mine(&self, principal: &Principal) -> Result<Vec<Course>, Error> {
        Self::require_submitter(principal)?;
        self.courses
            .list_by_submitter(principal.user_id())
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "course_workflow_service_tests.rs"]
mod tests;
