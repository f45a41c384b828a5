//! Credential verification.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{collections::HashMap, fmt, sync::RwLock};
use utoipa::ToSchema;

use crate::gatehouse::Principal;

/// Login request body.
#[derive(Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("login store unavailable: {0}")]
    Backend(String),
}

pub trait LoginStore: Send + Sync {
    /// Resolve credentials to the principal they belong to.
    ///
    /// # Errors
    /// `LoginError::InvalidCredentials` for an unknown username or a wrong
    /// password; the two cases must not be distinguishable.
    fn verify(&self, credentials: &Credentials) -> Result<Principal, LoginError>;
}

/// Plaintext in-memory accounts for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryLoginStore {
    accounts: RwLock<HashMap<String, SecretString>>,
}

impl MemoryLoginStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_account(mut self, username: impl Into<String>, password: SecretString) -> Self {
        if let Ok(accounts) = self.accounts.get_mut() {
            accounts.insert(username.into(), password);
        }
        self
    }

    /// Add or replace an account.
    ///
    /// # Errors
    /// Returns `LoginError::Backend` if the lock is poisoned.
    pub fn insert(&self, username: impl Into<String>, password: SecretString) -> Result<(), LoginError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| LoginError::Backend("Poisoned lock".to_string()))?;
        accounts.insert(username.into(), password);
        Ok(())
    }
}

impl LoginStore for MemoryLoginStore {
    fn verify(&self, credentials: &Credentials) -> Result<Principal, LoginError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| LoginError::Backend("Poisoned lock".to_string()))?;

        match accounts.get(&credentials.username) {
            Some(password) if password.expose_secret() == credentials.password => {
                Ok(Principal::new(credentials.username.clone()))
            }
            _ => Err(LoginError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn store() -> MemoryLoginStore {
        MemoryLoginStore::new().with_account("alice", SecretString::from("s3cret"))
    }

    #[test]
    fn verify_accepts_matching_password() {
        let principal = store().verify(&credentials("alice", "s3cret"));
        assert!(matches!(principal, Ok(p) if p.username == "alice"));
    }

    #[test]
    fn verify_rejects_wrong_password_and_unknown_user_alike() {
        let store = store();
        assert!(matches!(
            store.verify(&credentials("alice", "nope")),
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            store.verify(&credentials("mallory", "s3cret")),
            Err(LoginError::InvalidCredentials)
        ));
    }

    #[test]
    fn insert_replaces_password() -> anyhow::Result<()> {
        let store = store();
        store.insert("alice", SecretString::from("rotated"))?;
        assert!(store.verify(&credentials("alice", "s3cret")).is_err());
        assert!(store.verify(&credentials("alice", "rotated")).is_ok());
        Ok(())
    }

    #[test]
    fn credentials_debug_hides_password() {
        let debug = format!("{:?}", credentials("alice", "s3cret"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("s3cret"));
    }
}
