//! Collaborator contracts consumed by the router.
//!
//! The router never owns persistence. It holds trait objects for the login,
//! user and session stores plus the login attempt counter, all shared across
//! concurrent requests. Implementations must be safe for concurrent use.

mod login;
mod metrics;
mod session;
mod user;

pub use login::{Credentials, LoginError, LoginStore, MemoryLoginStore};
pub use metrics::{
    AtomicCounter, LoginOutcome, MetricsCounter, RecorderCounter, LOGIN_ATTEMPTS_METRIC,
};
pub use session::{MemorySessionStore, SessionError, SessionStore};
pub use user::{MemoryUserStore, NewUser, User, UserPatch, UserStore, UserStoreError};

use std::sync::Arc;

/// Composition root for the stores, built once at startup.
#[derive(Clone)]
pub struct RouterStore {
    pub login_store: Arc<dyn LoginStore>,
    pub user_store: Arc<dyn UserStore>,
    pub session_store: Arc<dyn SessionStore>,
}

#[derive(Clone)]
pub struct RouterMetrics {
    pub login_attempts: Arc<dyn MetricsCounter>,
}
