//! Port for platform account storage.

use async_trait::async_trait;

use crate::domain::Principal;

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
    }
}

/// Lookup and provisioning of accounts by login name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Principal stored for `username`, if any.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, AccountRepositoryError>;

    /// Insert the account unless a row with the same id or username exists.
    async fn insert_if_absent(
        &self,
        username: &str,
        principal: &Principal,
    ) -> Result<(), AccountRepositoryError>;
}
