//! Session issuance and resolution.
//!
//! Tokens are 32 random bytes encoded as unpadded base64url. The raw value is
//! only ever handed to the client inside the session cookie; the store keeps
//! the mapping from token to principal together with its expiry.

use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use crate::gatehouse::Principal;

const SESSION_TOKEN_BYTES: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,
    #[error("session not found")]
    NotFound,
    #[error("session expired")]
    Expired,
    #[error("session store unavailable: {0}")]
    Backend(String),
}

pub trait SessionStore: Send + Sync {
    /// Resolve a cookie value into the principal it was issued for.
    ///
    /// # Errors
    /// Any error means the session is unusable and the caller must fail closed.
    fn resolve(&self, token: &str) -> Result<Principal, SessionError>;

    /// Start a new session and return the token to place in the cookie.
    ///
    /// # Errors
    /// Returns `SessionError::Backend` if the session could not be stored.
    fn issue(&self, principal: &Principal) -> Result<String, SessionError>;

    /// End a session. Revoking an unknown token is not an error.
    ///
    /// # Errors
    /// Returns `SessionError::Backend` if the store is unavailable.
    fn revoke(&self, token: &str) -> Result<(), SessionError>;

    /// Lifetime of newly issued sessions, used for the cookie `Max-Age`.
    fn ttl(&self) -> Duration;

    /// Whether the session cookie carries the `Secure` attribute.
    fn secure_cookies(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct SessionEntry {
    principal: Principal,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    secure_cookies: bool,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            secure_cookies: false,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Only set this when the front-end is served over HTTPS.
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    fn poisoned() -> SessionError {
        SessionError::Backend("Poisoned lock".to_string())
    }
}

impl SessionStore for MemorySessionStore {
    fn resolve(&self, token: &str) -> Result<Principal, SessionError> {
        if !well_formed(token) {
            return Err(SessionError::Malformed);
        }

        let now = Instant::now();
        {
            let sessions = self.sessions.read().map_err(|_| Self::poisoned())?;
            match sessions.get(token) {
                None => return Err(SessionError::NotFound),
                Some(entry) if entry.expires_at > now => return Ok(entry.principal.clone()),
                Some(_) => {}
            }
        }

        self.sessions
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(token);

        Err(SessionError::Expired)
    }

    fn issue(&self, principal: &Principal) -> Result<String, SessionError> {
        let token = generate_session_token()?;
        let now = Instant::now();

        let mut sessions = self.sessions.write().map_err(|_| Self::poisoned())?;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            token.clone(),
            SessionEntry {
                principal: principal.clone(),
                expires_at: now + self.ttl,
            },
        );

        Ok(token)
    }

    fn revoke(&self, token: &str) -> Result<(), SessionError> {
        self.sessions
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(token);
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

fn generate_session_token() -> Result<String, SessionError> {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| SessionError::Backend(format!("failed to generate session token: {err}")))?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

fn well_formed(token: &str) -> bool {
    Base64UrlUnpadded::decode_vec(token).is_ok_and(|bytes| bytes.len() == SESSION_TOKEN_BYTES)
}
