//! Domain primitives, aggregates and use cases.
//!
//! Purpose: keep the course verification rules independent of HTTP and
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Principal / Role / UserId: the authenticated caller.
//! - Course / CourseStatus: the course aggregate and its state machine.
//! - CourseWorkflowService: implementation of the course driving ports.

pub mod auth;
pub mod course;
pub mod course_workflow_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::course::{
    Course, CourseDraft, CourseDraftInput, CourseId, CourseStatus, CourseStatusKind,
    CourseValidationError, Price, RejectionFeedback, SubmitterSnapshot, TransitionError,
    VerificationDecision, VerificationStamp,
};
pub use self::course_workflow_service::CourseWorkflowService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Principal, Role, UserId, UserValidationError};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
