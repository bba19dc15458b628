//! Driving port for teachers submitting courses.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraftInput, Error, Principal};

/// Request to submit a course for verification.
#[derive(Debug, Clone)]
pub struct SubmitCourseRequest {
    pub principal: Principal,
    pub draft: CourseDraftInput,
}

/// Use-case port for course submission.
#[async_trait]
pub trait CourseSubmissionCommand: Send + Sync {
    /// Validate and persist a course in `pending_verification`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the principal may not submit.
    /// - `InvalidRequest` when the draft fails validation. Nothing is stored.
    /// - `ServiceUnavailable` or `InternalError` on storage failures.
    async fn submit(&self, request: SubmitCourseRequest) -> Result<Course, Error>;
}
