//! Driving port for reading individual courses and a teacher's submissions.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error, Principal};

#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Fetch a course the principal is allowed to see.
    ///
    /// Courses the caller may not see are reported as `NotFound`.
    async fn get(&self, principal: &Principal, course_id: &CourseId) -> Result<Course, Error>;

    /// Courses submitted by the principal, newest first.
    async fn list_mine(&self, principal: &Principal) -> Result<Vec<Course>, Error>;
}
