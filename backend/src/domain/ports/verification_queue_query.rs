//! Driving port for the verifier work queue.

use async_trait::async_trait;

use crate::domain::{Course, Error, Principal};

/// Queue filter; `status` defaults to `pending_verification`.
#[derive(Debug, Clone)]
pub struct VerificationQueueRequest {
    pub principal: Principal,
    pub status: Option<String>,
}

#[async_trait]
pub trait VerificationQueueQuery: Send + Sync {
    /// Courses in the requested status, newest submission first.
    async fn list(&self, request: VerificationQueueRequest) -> Result<Vec<Course>, Error>;
}
