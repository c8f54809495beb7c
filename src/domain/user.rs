//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::EntityRecord;

/// Validation errors raised by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyLoginName,
    LoginNameTooShort { min: usize },
    LoginNameTooLong { max: usize },
    LoginNameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLoginName => write!(f, "login name must not be empty"),
            Self::LoginNameTooShort { min } => {
                write!(f, "login name must be at least {min} characters")
            }
            Self::LoginNameTooLong { max } => {
                write!(f, "login name must be at most {max} characters")
            }
            Self::LoginNameInvalidCharacters => write!(
                f,
                "login name may only contain lowercase letters, digits, '_', '.', or '-'",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Minimum allowed length for a login name.
pub const LOGIN_NAME_MIN: usize = 3;
/// Maximum allowed length for a login name.
pub const LOGIN_NAME_MAX: usize = 32;

static LOGIN_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn login_name_regex() -> &'static Regex {
    LOGIN_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains the charset.
        Regex::new("^[a-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("login name regex failed to compile: {error}"))
    })
}

/// Unique human-readable handle identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginName(String);

impl LoginName {
    /// Validate and construct a [`LoginName`].
    pub fn new(login_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(login_name.into())
    }

    fn from_owned(login_name: String) -> Result<Self, UserValidationError> {
        if login_name.trim().is_empty() {
            return Err(UserValidationError::EmptyLoginName);
        }

        let length = login_name.chars().count();
        if length < LOGIN_NAME_MIN {
            return Err(UserValidationError::LoginNameTooShort {
                min: LOGIN_NAME_MIN,
            });
        }
        if length > LOGIN_NAME_MAX {
            return Err(UserValidationError::LoginNameTooLong {
                max: LOGIN_NAME_MAX,
            });
        }
        if !login_name_regex().is_match(&login_name) {
            return Err(UserValidationError::LoginNameInvalidCharacters);
        }

        Ok(Self(login_name))
    }
}

impl AsRef<str> for LoginName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<LoginName> for String {
    fn from(value: LoginName) -> Self {
        value.0
    }
}

impl TryFrom<String> for LoginName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `login_name` satisfies the [`LoginName`] charset and length rules and is
///   unique across all users.
/// - `id` is absent until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    /// Store-assigned identifier; absent for a not-yet-persisted user.
    #[schema(example = 1)]
    id: Option<i64>,
    #[schema(value_type = String, example = "alice")]
    login_name: LoginName,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: Option<i64>, login_name: LoginName) -> Self {
        Self { id, login_name }
    }

    /// Fallible constructor enforcing the login name invariants.
    pub fn try_from_parts(
        id: Option<i64>,
        login_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(id, LoginName::new(login_name)?))
    }

    /// Store-assigned identifier, if persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Unique login handle.
    pub fn login_name(&self) -> &LoginName {
        &self.login_name
    }
}

impl EntityRecord for User {
    const KIND: &'static str = "user";
    const KEY_FIELD: &'static str = "loginName";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn key(&self) -> &str {
        self.login_name.as_ref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: Option<i64>,
    login_name: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, login_name } = value;
        Self {
            id,
            login_name: login_name.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.login_name)
    }
}
