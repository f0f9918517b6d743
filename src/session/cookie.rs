//! Reading and minting the session cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::Duration;

use super::SessionId;

/// The name of the cookie holding the session ID.
pub const COOKIE_SESSION_ID: &str = "sessionId";
/// How long a freshly minted session cookie lives on the client.
pub const SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// The outcome of looking for a session in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    /// The request already carried a session cookie.
    Existing(SessionId),
    /// The request had no session cookie, so a new session was minted.
    ///
    /// The response must set the session cookie, see [SessionResolution::apply].
    Minted(SessionId),
}

impl SessionResolution {
    /// The resolved session ID, whether it was existing or minted.
    #[cfg(test)]
    pub fn session_id(&self) -> &SessionId {
        match self {
            SessionResolution::Existing(session_id) | SessionResolution::Minted(session_id) => {
                session_id
            }
        }
    }

    /// Whether the response needs to set the session cookie.
    pub fn must_set_cookie(&self) -> bool {
        matches!(self, SessionResolution::Minted(_))
    }

    /// Add the session cookie to `jar` if the session was minted.
    ///
    /// Existing sessions leave the jar untouched, so their expiry is not
    /// refreshed.
    ///
    /// Returns the cookie jar to attach to the response and the session ID.
    pub fn apply(self, jar: CookieJar, duration: Duration) -> (CookieJar, SessionId) {
        match self {
            SessionResolution::Existing(session_id) => (jar, session_id),
            SessionResolution::Minted(session_id) => {
                let jar = jar.add(build_session_cookie(&session_id, duration));
                (jar, session_id)
            }
        }
    }
}

/// Get the session from the cookie in `jar`, or mint a new one.
///
/// An empty cookie value counts as no cookie.
pub fn resolve_session(jar: &CookieJar) -> SessionResolution {
    match session_id_from_jar(jar) {
        Some(session_id) => SessionResolution::Existing(session_id),
        None => SessionResolution::Minted(SessionId::generate()),
    }
}

/// Build the cookie that stores `session_id` on the client for `duration`.
pub fn build_session_cookie(session_id: &SessionId, duration: Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_ID, session_id.as_str().to_owned()))
        .path("/")
        .max_age(duration)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub(super) fn session_id_from_jar(jar: &CookieJar) -> Option<SessionId> {
    jar.get(COOKIE_SESSION_ID)
        .map(|cookie| cookie.value_trimmed())
        .filter(|value| !value.is_empty())
        .map(SessionId::new)
}
