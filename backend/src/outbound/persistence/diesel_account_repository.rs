//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Principal, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_principal(row: AccountRow) -> Result<Principal, AccountRepositoryError> {
    let role = row
        .role
        .parse()
        .map_err(|_| AccountRepositoryError::query(format!("account {} has invalid role", row.id)))?;
    Principal::try_new(
        UserId::from_uuid(row.id),
        row.display_name,
        row.email,
        role,
    )
    .map_err(|err| AccountRepositoryError::query(format!("account {} is invalid: {err}", row.id)))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_principal).transpose()
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        principal: &Principal,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountRepositoryError::connection))?;

        let row = NewAccountRow {
            id: *principal.user_id().as_uuid(),
            username,
            display_name: principal.display_name(),
            email: principal.email(),
            role: principal.role().as_str(),
        };

        diesel::insert_into(accounts::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
