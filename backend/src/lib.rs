//! Deenify course verification backend.
//!
//! Teachers submit courses, verifiers approve or reject them, and only
//! approved courses become visible to everyone else.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
