//! Course status state machine.
//!
//! ```text
//! draft --(submit)--> pending_verification --(approve)--> approved
//!                                          \-(reject)---> rejected
//! ```
//!
//! Approved and rejected are terminal. Verification fields only exist inside
//! the variants that carry them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CourseValidationError;
use crate::domain::UserId;

/// Who decided on a course and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationStamp {
    pub verifier_id: UserId,
    pub verified_at: DateTime<Utc>,
}

/// Reviewer feedback attached to a rejection.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionFeedback(String);

impl RejectionFeedback {
    /// Validate and construct feedback text.
    pub fn new(text: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CourseValidationError::MissingFeedback);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RejectionFeedback {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Lifecycle state of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseStatus {
    /// Declared for completeness; no operation produces it.
    Draft,
    PendingVerification,
    Approved(VerificationStamp),
    Rejected {
        stamp: VerificationStamp,
        feedback: RejectionFeedback,
    },
}

impl CourseStatus {
    /// Discriminant used for filtering and storage.
    pub fn kind(&self) -> CourseStatusKind {
        match self {
            Self::Draft => CourseStatusKind::Draft,
            Self::PendingVerification => CourseStatusKind::PendingVerification,
            Self::Approved(_) => CourseStatusKind::Approved,
            Self::Rejected { .. } => CourseStatusKind::Rejected,
        }
    }

    pub fn stamp(&self) -> Option<&VerificationStamp> {
        match self {
            Self::Approved(stamp) | Self::Rejected { stamp, .. } => Some(stamp),
            Self::Draft | Self::PendingVerification => None,
        }
    }

    pub fn rejection_feedback(&self) -> Option<&RejectionFeedback> {
        match self {
            Self::Rejected { feedback, .. } => Some(feedback),
            _ => None,
        }
    }
}

/// Status discriminant without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatusKind {
    Draft,
    #[default]
    PendingVerification,
    Approved,
    Rejected,
}

impl CourseStatusKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingVerification => "pending_verification",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CourseStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CourseStatusKind {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_verification" => Ok(Self::PendingVerification),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CourseValidationError::InvalidStatus(other.to_owned())),
        }
    }
}

/// Verifier's verdict on a pending course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationDecision {
    Approve,
    Reject(RejectionFeedback),
}

impl VerificationDecision {
    /// Build a decision from the raw action verb and optional feedback.
    ///
    /// Feedback is ignored for approvals and required for rejections.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::VerificationDecision;
    ///
    /// let decision = VerificationDecision::try_from_parts("reject", Some(" needs citations "))
    ///     .unwrap();
    /// assert!(matches!(decision, VerificationDecision::Reject(ref f) if f.as_ref() == "needs citations"));
    /// ```
    pub fn try_from_parts(
        action: &str,
        feedback: Option<&str>,
    ) -> Result<Self, CourseValidationError> {
        match action {
            "approve" => Ok(Self::Approve),
            "reject" => {
                let feedback = RejectionFeedback::new(feedback.unwrap_or_default())?;
                Ok(Self::Reject(feedback))
            }
            other => Err(CourseValidationError::InvalidAction(other.to_owned())),
        }
    }
}

/// Illegal status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("course is {current}, not awaiting verification")]
    NotAwaitingVerification { current: CourseStatusKind },
}
