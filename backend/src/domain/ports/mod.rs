//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports ([`CourseRepository`],
//! [`AccountRepository`], [`VerifierNotifier`]) are implemented by outbound
//! adapters and expose typed errors built with `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod course_query;
mod course_repository;
mod course_submission_command;
mod course_verification_command;
mod login_service;
mod verification_queue_query;
mod verifier_notifier;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError, FixtureCourseRepository};
pub use course_submission_command::{CourseSubmissionCommand, SubmitCourseRequest};
pub use course_verification_command::{CourseVerificationCommand, VerifyCourseRequest};
pub use login_service::{
    DEMO_ACCOUNTS, DEMO_PASSWORD, DemoAccount, FixtureLoginService, LoginService, demo_account,
};
pub use verification_queue_query::{VerificationQueueQuery, VerificationQueueRequest};
#[cfg(test)]
pub use verifier_notifier::MockVerifierNotifier;
pub use verifier_notifier::{FixtureVerifierNotifier, VerifierNotifier, VerifierNotifierError};
