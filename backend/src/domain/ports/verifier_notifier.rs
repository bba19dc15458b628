//! Port for telling verifiers that new work arrived.

use async_trait::async_trait;

use crate::domain::Course;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notifier adapters.
    pub enum VerifierNotifierError {
        /// Notification could not be delivered.
        Delivery { message: String } => "verifier notification failed: {message}",
    }
}

/// Outbound notification of freshly submitted courses.
///
/// Callers treat delivery as best effort: a failure is logged and never
/// undoes the submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerifierNotifier: Send + Sync {
    async fn course_submitted(&self, course: &Course) -> Result<(), VerifierNotifierError>;
}

/// Notifier that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVerifierNotifier;

#[async_trait]
impl VerifierNotifier for FixtureVerifierNotifier {
    async fn course_submitted(&self, _course: &Course) -> Result<(), VerifierNotifierError> {
        Ok(())
    }
}
