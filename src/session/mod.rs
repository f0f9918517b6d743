//! Anonymous sessions identified by a cookie.
//!
//! A session is nothing more than an opaque token in the `sessionId` cookie.
//! Whoever holds the token can read the transactions recorded under it.

mod cookie;
mod guard;

use std::fmt::Display;

use serde::Serialize;

pub use cookie::{
    COOKIE_SESSION_ID, SESSION_COOKIE_DURATION, SessionResolution, build_session_cookie,
    resolve_session,
};
pub use guard::ActiveSession;

/// The opaque identifier of an anonymous client session.
///
/// The value is taken verbatim from the cookie, it is not checked against
/// the database or required to be a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a cookie value.
    pub fn new(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Mint a new random session ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
