//! User records.
//!
//! The router only translates HTTP verbs into these calls; validation and
//! persistence are the store's concern.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::RwLock};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Fields that may change after creation. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("user not found")]
    NotFound,
    #[error("user already exists")]
    Conflict,
    #[error("invalid user: {0}")]
    Invalid(&'static str),
    #[error("user store unavailable: {0}")]
    Backend(String),
}

pub trait UserStore: Send + Sync {
    /// All users ordered by username.
    ///
    /// # Errors
    /// Returns `UserStoreError::Backend` if the store is unavailable.
    fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// # Errors
    /// `Invalid` for rejected input, `Conflict` if the username is taken.
    fn create(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// # Errors
    /// `NotFound` if no user has this username.
    fn get(&self, username: &str) -> Result<User, UserStoreError>;

    /// # Errors
    /// `NotFound` if no user has this username, `Invalid` for rejected input.
    fn update(&self, username: &str, patch: UserPatch) -> Result<User, UserStoreError>;

    /// # Errors
    /// `NotFound` if no user has this username.
    fn delete(&self, username: &str) -> Result<(), UserStoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<String, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> UserStoreError {
        UserStoreError::Backend("Poisoned lock".to_string())
    }
}

impl UserStore for MemoryUserStore {
    fn list(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().cloned().collect())
    }

    fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let username = user.username.trim().to_string();
        if !valid_username(&username) {
            return Err(UserStoreError::Invalid("username"));
        }
        let email = normalize_optional(user.email);
        if email.as_deref().is_some_and(|email| !valid_email(email)) {
            return Err(UserStoreError::Invalid("email"));
        }

        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if users.contains_key(&username) {
            return Err(UserStoreError::Conflict);
        }

        let record = User {
            username: username.clone(),
            name: normalize_optional(user.name),
            email,
        };
        users.insert(username, record.clone());
        Ok(record)
    }

    fn get(&self, username: &str) -> Result<User, UserStoreError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        users.get(username).cloned().ok_or(UserStoreError::NotFound)
    }

    fn update(&self, username: &str, patch: UserPatch) -> Result<User, UserStoreError> {
        let name = normalize_optional(patch.name);
        let email = normalize_optional(patch.email);
        if name.is_none() && email.is_none() {
            return Err(UserStoreError::Invalid("no updates provided"));
        }
        if email.as_deref().is_some_and(|email| !valid_email(email)) {
            return Err(UserStoreError::Invalid("email"));
        }

        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        let record = users.get_mut(username).ok_or(UserStoreError::NotFound)?;
        if name.is_some() {
            record.name = name;
        }
        if email.is_some() {
            record.email = email;
        }
        Ok(record.clone())
    }

    fn delete(&self, username: &str) -> Result<(), UserStoreError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        users
            .remove(username)
            .map(|_| ())
            .ok_or(UserStoreError::NotFound)
    }
}

fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").is_ok_and(|regex| regex.is_match(username))
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
