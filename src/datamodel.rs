//! Domain objects the services accept

use crate::errors::{MediawikiApiError, Result};

/// A wiki account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Who an action is aimed at: a bare account name or a resolved [`User`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSubject {
    RawName(String),
    Resolved(User),
}

impl UserSubject {
    /// Normalize to the plain account name sent on the wire.
    ///
    /// Fails with `InvalidArgument` when the name is blank.
    pub fn resolve(&self) -> Result<&str> {
        let name = match self {
            UserSubject::RawName(name) => name.as_str(),
            UserSubject::Resolved(user) => user.name(),
        };
        if name.trim().is_empty() {
            return Err(MediawikiApiError::InvalidArgument(
                "user must be a non-empty name or a User with a name".to_string(),
            ));
        }
        Ok(name)
    }
}

impl From<&str> for UserSubject {
    fn from(name: &str) -> Self {
        UserSubject::RawName(name.to_owned())
    }
}

impl From<String> for UserSubject {
    fn from(name: String) -> Self {
        UserSubject::RawName(name)
    }
}

impl From<User> for UserSubject {
    fn from(user: User) -> Self {
        UserSubject::Resolved(user)
    }
}

impl From<&User> for UserSubject {
    fn from(user: &User) -> Self {
        UserSubject::Resolved(user.clone())
    }
}
