//! # Gatehouse
//!
//! `gatehouse` serves a bundled single-page front-end and a small JSON API.
//! The API has one public endpoint, `POST /api/authorize`, which exchanges
//! credentials for a session cookie. Everything else under `/api` sits behind
//! a session gate that resolves the cookie into a [`Principal`] before the
//! request reaches the protected user endpoints.
//!
//! ## Routing
//!
//! Two dispatch trees are built once at startup:
//!
//! - The outer tree serves `/`, the favicons, the `/js`, `/css` and `/img`
//!   asset directories, and the login endpoint. Unknown paths fall back to
//!   the landing page so client-side routes keep working on reload.
//! - The protected tree holds the user API and answers unknown paths with a
//!   JSON 404. It is only reachable through the session gate.
//!
//! ## Collaborators
//!
//! Credentials, users and sessions live behind the [`LoginStore`],
//! [`UserStore`] and [`SessionStore`] traits. In-memory implementations are
//! provided for local runs and tests.
//!
//! [`Principal`]: gatehouse::Principal
//! [`LoginStore`]: gatehouse::store::LoginStore
//! [`UserStore`]: gatehouse::store::UserStore
//! [`SessionStore`]: gatehouse::store::SessionStore

pub mod cli;
pub mod gatehouse;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
