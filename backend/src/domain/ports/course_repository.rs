//! Port for course persistence.
//!
//! Status transitions are written with a conditional update keyed on the
//! revision the caller read, so two verifiers racing on the same course
//! cannot both succeed.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseStatusKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The course disappeared between read and write.
        NotFound { course_id: String } =>
            "course {course_id} not found",
    }
}

/// Port for course storage and retrieval.
///
/// # Revision Semantics
///
/// - New courses are inserted at revision 1.
/// - [`CourseRepository::save_decision`] writes only when the stored revision
///   equals `expected_revision`; the caller sets `course.revision` to the new
///   value beforehand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a newly submitted course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Store a status transition if nobody else wrote first.
    ///
    /// Returns [`CourseRepositoryError::RevisionMismatch`] when the stored
    /// revision differs and [`CourseRepositoryError::NotFound`] when the row
    /// is gone.
    async fn save_decision(
        &self,
        course: &Course,
        expected_revision: u32,
    ) -> Result<(), CourseRepositoryError>;

    /// Courses in the given status, newest submission first.
    async fn list_by_status(
        &self,
        status: CourseStatusKind,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Courses submitted by the given teacher, newest submission first.
    async fn list_by_submitter(
        &self,
        teacher_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn insert(&self, _course: &Course) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn save_decision(
        &self,
        course: &Course,
        _expected_revision: u32,
    ) -> Result<(), CourseRepositoryError> {
        Err(CourseRepositoryError::not_found(course.id.to_string()))
    }

    async fn list_by_status(
        &self,
        _status: CourseStatusKind,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_submitter(
        &self,
        _teacher_id: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }
}
