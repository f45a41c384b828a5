//! Authenticated identity resolved from a session cookie.
//!
//! The gate inserts a [`Principal`] into the request extensions; handlers read
//! it with `Extension<Principal>`. It lives only as long as the request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub username: String,
}

impl Principal {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
