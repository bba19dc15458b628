//! Diesel-backed `LoginService` adapter.
//!
//! Demo credentials are checked first. A successful login returns the stored
//! account and provisions it from the demo record on first use, so roles and
//! names edited in the database win over the built-in defaults.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, DEMO_PASSWORD, LoginService, demo_account,
};
use crate::domain::{Error, LoginCredentials, Principal};

use super::diesel_account_repository::DieselAccountRepository;

/// Diesel-backed `LoginService` over the demo account list.
#[derive(Clone)]
pub struct DieselLoginService {
    accounts: Arc<dyn AccountRepository>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel account repository.
    pub fn new(accounts: DieselAccountRepository) -> Self {
        Self {
            accounts: Arc::new(accounts),
        }
    }

    #[cfg(test)]
    fn from_repository(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { .. } => {
            Error::service_unavailable("account store is unavailable")
        }
        AccountRepositoryError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let account = demo_account(credentials.username())
            .filter(|_| credentials.password() == DEMO_PASSWORD)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        if let Some(stored) = self
            .accounts
            .find_by_username(account.username)
            .await
            .map_err(map_account_error)?
        {
            return Ok(stored);
        }

        let principal = account.principal()?;
        self.accounts
            .insert_if_absent(account.username, &principal)
            .await
            .map_err(map_account_error)?;
        info!(username = account.username, "provisioned demo account");
        Ok(principal)
    }
}
