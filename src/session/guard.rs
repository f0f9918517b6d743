//! The session guard for endpoints that read transactions.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::Error;

use super::{SessionId, cookie::session_id_from_jar};

/// The session of a request that is required to carry a session cookie.
///
/// Using this as a handler argument guards the endpoint: requests without a
/// session cookie are rejected with [Error::MissingSession] before the handler
/// runs. The session is not looked up in the database, an unknown session
/// just sees no transactions.
///
/// **Note**: Extractors run in argument order, so parameters that should be
/// validated before the guard must come before this argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession(pub SessionId);

impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        match session_id_from_jar(&jar) {
            Some(session_id) => Ok(ActiveSession(session_id)),
            None => {
                tracing::debug!("Rejected {} {}: no session cookie.", parts.method, parts.uri);
                Err(Error::MissingSession)
            }
        }
    }
}
