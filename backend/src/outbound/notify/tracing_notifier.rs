//! Notifier that records submissions as structured log events.
//!
//! Stands in for email or push delivery; log shippers can route the
//! `verifier_notification` target to whoever staffs the queue.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Course;
use crate::domain::ports::{VerifierNotifier, VerifierNotifierError};

/// `VerifierNotifier` that emits one `info` event per submission.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingVerifierNotifier;

#[async_trait]
impl VerifierNotifier for TracingVerifierNotifier {
    async fn course_submitted(&self, course: &Course) -> Result<(), VerifierNotifierError> {
        info!(
            target: "verifier_notification",
            course_id = %course.id,
            title = %course.content.title,
            teacher = %course.submitter.teacher_name,
            "verifiers notified of new submission"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseDraft, CourseDraftInput, CourseId, Principal, Role, UserId};
    use chrono::Utc;

    #[tokio::test]
    async fn notification_always_succeeds() {
        let teacher = Principal::try_new(
            UserId::random(),
            "Ustadh Yusuf",
            "teacher@deenify.test",
            Role::Teacher,
        )
        .expect("valid principal");
        let draft = CourseDraft::try_from(CourseDraftInput {
            title: Some("Seerah".to_owned()),
            description: Some("Life of the Prophet".to_owned()),
            category: Some("history".to_owned()),
            price: Some(10.0),
            ..CourseDraftInput::default()
        })
        .expect("valid draft");
        let course = Course::submit(CourseId::random(), draft, &teacher, Utc::now());

        TracingVerifierNotifier
            .course_submitted(&course)
            .await
            .expect("logging notifier never fails");
    }
}
