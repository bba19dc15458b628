//! Role checks for the course workflow.

use super::{Course, CourseStatusKind};
use crate::domain::{Principal, Role};

/// Teachers and admins may submit courses.
pub const fn can_submit(role: Role) -> bool {
    matches!(role, Role::Teacher | Role::Admin)
}

/// Verifiers and admins may decide on submissions and read the queue.
pub const fn can_verify(role: Role) -> bool {
    matches!(role, Role::Verifier | Role::Admin)
}

/// Whether `principal` may read `course`.
///
/// Approved courses are public to signed-in users. Anything else is visible
/// only to its submitter and to reviewers.
pub fn can_view(principal: &Principal, course: &Course) -> bool {
    course.status.kind() == CourseStatusKind::Approved
        || can_verify(principal.role())
        || course.submitter.teacher_id == *principal.user_id()
}
