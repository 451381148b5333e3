//! User data model.
//!
//! Field rules are enforced by the newtype constructors, so a [`NewUser`]
//! or [`User`] value is always valid once built. Lengths are counted in
//! Unicode scalar values.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a user name.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for a user name.
pub const NAME_MAX: usize = 100;
/// Minimum allowed length for an email address.
pub const EMAIL_MIN: usize = 5;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 100;
/// Minimum allowed length for a role.
pub const ROLE_MIN: usize = 2;
/// Maximum allowed length for a role.
pub const ROLE_MAX: usize = 50;
/// Role assigned when a create request omits one.
pub const DEFAULT_ROLE: &str = "user";

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooShort { min: usize },
    EmailTooLong { max: usize },
    InvalidEmail,
    EmptyRole,
    RoleTooShort { min: usize },
    RoleTooLong { max: usize },
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail
            | Self::EmailTooShort { .. }
            | Self::EmailTooLong { .. }
            | Self::InvalidEmail => "email",
            Self::EmptyRole | Self::RoleTooShort { .. } | Self::RoleTooLong { .. } => "role",
        }
    }

    /// Stable machine-readable code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameTooShort { .. } => "name_too_short",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmptyEmail => "empty_email",
            Self::EmailTooShort { .. } => "email_too_short",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyRole => "empty_role",
            Self::RoleTooShort { .. } => "role_too_short",
            Self::RoleTooLong { .. } => "role_too_long",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooShort { min } => write!(f, "email must be at least {min} characters"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::EmptyRole => write!(f, "role must not be empty"),
            Self::RoleTooShort { min } => write!(f, "role must be at least {min} characters"),
            Self::RoleTooLong { max } => write!(f, "role must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// Equality and hashing use the parsed UUID only, so spellings such as an
/// uppercase or braced form name the same user as the canonical string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
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

/// Bounded-length text check shared by the string newtypes.
struct LengthRule {
    min: usize,
    max: usize,
    empty: UserValidationError,
    too_short: UserValidationError,
    too_long: UserValidationError,
}

impl LengthRule {
    fn check(self, value: &str) -> Result<(), UserValidationError> {
        if value.is_empty() {
            return Err(self.empty);
        }
        let length = value.chars().count();
        if length < self.min {
            return Err(self.too_short);
        }
        if length > self.max {
            return Err(self.too_long);
        }
        Ok(())
    }
}

macro_rules! validated_text {
    ($(#[$meta:meta])* $name:ident, $rule:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                Self::from_owned(value.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl $name {
            fn from_owned(value: String) -> Result<Self, UserValidationError> {
                let rule: fn(&str) -> Result<(), UserValidationError> = $rule;
                rule(&value)?;
                Ok(Self(value))
            }
        }
    };
}

validated_text!(
    /// Human readable user name.
    UserName,
    |value| LengthRule {
        min: NAME_MIN,
        max: NAME_MAX,
        empty: UserValidationError::EmptyName,
        too_short: UserValidationError::NameTooShort { min: NAME_MIN },
        too_long: UserValidationError::NameTooLong { max: NAME_MAX },
    }
    .check(value)
);

validated_text!(
    /// Email address, stored verbatim; uniqueness is case-sensitive.
    EmailAddress,
    |value| {
        LengthRule {
            min: EMAIL_MIN,
            max: EMAIL_MAX,
            empty: UserValidationError::EmptyEmail,
            too_short: UserValidationError::EmailTooShort { min: EMAIL_MIN },
            too_long: UserValidationError::EmailTooLong { max: EMAIL_MAX },
        }
        .check(value)?;
        if email_regex().is_match(value) {
            Ok(())
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }
);

validated_text!(
    /// Free-form role label attached to a user.
    Role,
    |value| LengthRule {
        min: ROLE_MIN,
        max: ROLE_MAX,
        empty: UserValidationError::EmptyRole,
        too_short: UserValidationError::RoleTooShort { min: ROLE_MIN },
        too_long: UserValidationError::RoleTooLong { max: ROLE_MAX },
    }
    .check(value)
);

impl Default for Role {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_owned())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part, hostname labels, alphabetic TLD.
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated input for creating a user; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
    role: Role,
}

impl NewUser {
    /// Build from validated components.
    pub fn new(name: UserName, email: EmailAddress, role: Role) -> Self {
        Self { name, email, role }
    }

    /// Fallible constructor from raw strings. A missing role becomes
    /// [`DEFAULT_ROLE`].
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::NewUser;
    ///
    /// let new_user = NewUser::try_from_strings("Ada Lovelace", "ada@example.com", None)
    ///     .expect("valid input");
    /// assert_eq!(new_user.role().as_ref(), "user");
    /// ```
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name)?;
        let email = EmailAddress::new(email)?;
        let role = role.map(Role::new).transpose()?.unwrap_or_default();
        Ok(Self::new(name, email, role))
    }

    /// Requested name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Requested role.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Attach a store-assigned identifier, producing the stored entity.
    pub fn into_user(self, id: UserId) -> User {
        let Self { name, email, role } = self;
        User {
            id,
            name,
            email,
            role,
        }
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is a valid UUID assigned once by the store.
/// - `name`, `email`, and `role` satisfy their length and format rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    role: Role,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: UserName, email: EmailAddress, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
        }
    }

    /// Fallible constructor enforcing every field rule.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            UserName::new(name)?,
            EmailAddress::new(email)?,
            Role::new(role)?,
        ))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// User name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Role label.
    pub fn role(&self) -> &Role {
        &self.role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    name: String,
    email: String,
    role: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.name, value.email, value.role)
    }
}
