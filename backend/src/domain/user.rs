//! Platform accounts and the authenticated caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while constructing user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Stable user identifier stored as a UUID.
///
/// The original string is kept so identifiers round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Platform role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Verifier,
    Admin,
}

impl Role {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Verifier => "verifier",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "verifier" => Ok(Self::Verifier),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Authenticated caller handed to every use case.
///
/// ## Invariants
/// - `display_name` and `email` are non-empty once trimmed.
///
/// # Examples
/// ```
/// use backend::domain::{Principal, Role, UserId};
///
/// let principal = Principal::try_new(
///     UserId::random(),
///     "Ustadh Yusuf",
///     "teacher@deenify.test",
///     Role::Teacher,
/// )
/// .unwrap();
/// assert_eq!(principal.role(), Role::Teacher);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PrincipalDto", into = "PrincipalDto")]
pub struct Principal {
    user_id: UserId,
    display_name: String,
    email: String,
    role: Role,
}

impl Principal {
    /// Validate and construct a principal.
    pub fn try_new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        let display_name = display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self {
            user_id,
            display_name,
            email,
            role,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalDto {
    user_id: UserId,
    display_name: String,
    email: String,
    role: Role,
}

impl From<Principal> for PrincipalDto {
    fn from(value: Principal) -> Self {
        Self {
            user_id: value.user_id,
            display_name: value.display_name,
            email: value.email,
            role: value.role,
        }
    }
}

impl TryFrom<PrincipalDto> for Principal {
    type Error = UserValidationError;

    fn try_from(value: PrincipalDto) -> Result<Self, Self::Error> {
        Principal::try_new(value.user_id, value.display_name, value.email, value.role)
    }
}
