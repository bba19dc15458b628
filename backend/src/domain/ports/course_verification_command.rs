//! Driving port for verifiers deciding on submissions.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error, Principal};

/// A verifier's decision as received from a client.
///
/// `action` stays a raw optional string so unknown or missing verbs surface
/// as validation failures, reported only after the caller's role is checked.
#[derive(Debug, Clone)]
pub struct VerifyCourseRequest {
    pub principal: Principal,
    pub course_id: CourseId,
    pub action: Option<String>,
    pub feedback: Option<String>,
}

/// Use-case port for approving or rejecting a course.
#[async_trait]
pub trait CourseVerificationCommand: Send + Sync {
    /// Apply the decision and return the updated course.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when the principal may not verify.
    /// - `InvalidRequest` for unknown actions or rejections without feedback.
    /// - `NotFound` for unknown courses.
    /// - `Conflict` when the course is not pending or another verifier wrote
    ///   first.
    async fn verify(&self, request: VerifyCourseRequest) -> Result<Course, Error>;
}
