//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: process-local repositories for development and tests.
//! - **notify**: verifier notification delivery.
//!
//! Adapters translate between domain types and infrastructure types. They
//! contain no business rules.

pub mod memory;
pub mod notify;
pub mod persistence;
