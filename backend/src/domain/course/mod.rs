//! Course aggregate and its verification lifecycle.

mod draft;
mod error;
pub mod policy;
mod status;

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use self::draft::{CourseDraft, CourseDraftInput, Price};
pub use self::error::CourseValidationError;
pub use self::status::{
    CourseStatus, CourseStatusKind, RejectionFeedback, TransitionError, VerificationDecision,
    VerificationStamp,
};
use crate::domain::{Principal, UserId};

/// Opaque course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CourseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Submitter identity copied at submission time.
///
/// Later profile changes are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterSnapshot {
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub teacher_email: String,
}

impl From<&Principal> for SubmitterSnapshot {
    fn from(principal: &Principal) -> Self {
        Self {
            teacher_id: principal.user_id().clone(),
            teacher_name: principal.display_name().to_owned(),
            teacher_email: principal.email().to_owned(),
        }
    }
}

/// A course offered on the platform.
///
/// `revision` starts at 1 and increases by one with every persisted status
/// transition. Repositories use it for conditional updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub content: CourseDraft,
    pub submitter: SubmitterSnapshot,
    pub status: CourseStatus,
    pub revision: u32,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Create a freshly submitted course awaiting verification.
    pub fn submit(id: CourseId, content: CourseDraft, submitter: &Principal, at: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            submitter: SubmitterSnapshot::from(submitter),
            status: CourseStatus::PendingVerification,
            revision: 1,
            submitted_at: at,
            updated_at: at,
        }
    }

    /// Produce the course that results from a verifier's decision.
    ///
    /// Only pending courses accept a decision. The returned course carries the
    /// next revision; `self` is left untouched.
    pub fn apply_decision(
        &self,
        decision: VerificationDecision,
        verifier_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Self, TransitionError> {
        if !matches!(self.status, CourseStatus::PendingVerification) {
            return Err(TransitionError::NotAwaitingVerification {
                current: self.status.kind(),
            });
        }

        let stamp = VerificationStamp {
            verifier_id: verifier_id.clone(),
            verified_at: at,
        };
        let status = match decision {
            VerificationDecision::Approve => CourseStatus::Approved(stamp),
            VerificationDecision::Reject(feedback) => CourseStatus::Rejected { stamp, feedback },
        };

        Ok(Self {
            status,
            revision: self.revision.saturating_add(1),
            updated_at: at,
            ..self.clone()
        })
    }
}
