//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to turn credentials into a [`Principal`] without
//! knowing the backing store. Accounts are fixed demo identities; the
//! password check is deliberately minimal.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, Role, UserId};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password";

/// A seeded platform account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub id: &'static str,
    pub username: &'static str,
    pub display_name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

impl DemoAccount {
    /// Principal for this account.
    pub fn principal(&self) -> Result<Principal, Error> {
        let user_id = UserId::new(self.id)
            .map_err(|err| Error::internal(format!("invalid demo user id: {err}")))?;
        Principal::try_new(user_id, self.display_name, self.email, self.role)
            .map_err(|err| Error::internal(format!("invalid demo account: {err}")))
    }
}

/// Accounts available for sign-in. Also seeded by the `accounts` migration.
pub const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        id: "6f1c2d3e-0001-4a5b-8c9d-000000000001",
        username: "teacher",
        display_name: "Ustadh Yusuf",
        email: "teacher@deenify.test",
        role: Role::Teacher,
    },
    DemoAccount {
        id: "6f1c2d3e-0002-4a5b-8c9d-000000000002",
        username: "verifier",
        display_name: "Shaykha Aisha",
        email: "verifier@deenify.test",
        role: Role::Verifier,
    },
    DemoAccount {
        id: "6f1c2d3e-0003-4a5b-8c9d-000000000003",
        username: "admin",
        display_name: "Platform Admin",
        email: "admin@deenify.test",
        role: Role::Admin,
    },
    DemoAccount {
        id: "6f1c2d3e-0004-4a5b-8c9d-000000000004",
        username: "student",
        display_name: "Bilal Student",
        email: "student@deenify.test",
        role: Role::Student,
    },
];

/// Look up a demo account by username.
pub fn demo_account(username: &str) -> Option<&'static DemoAccount> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.username == username)
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// In-memory authenticator over [`DEMO_ACCOUNTS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        match demo_account(credentials.username()) {
            Some(account) if credentials.password() == DEMO_PASSWORD => account.principal(),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
