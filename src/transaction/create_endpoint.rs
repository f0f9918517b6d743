//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use rusqlite::Connection;
use serde::Serialize;
use time::Duration;

use crate::{
    AppState, Error,
    session::resolve_session,
    transaction::{
        Transaction, core::create_transaction, form::parse_new_transaction, state::lock_connection,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// How long a newly minted session cookie is kept by the client.
    pub cookie_duration: Duration,
}

impl CreateTransactionState {
    /// Acquire the database connection.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        lock_connection(&self.db_connection)
    }
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

/// The response body for a created transaction.
#[derive(Debug, Serialize)]
pub struct CreatedTransaction {
    /// The stored transaction, including the server assigned fields.
    pub transaction: Transaction,
}

/// A route handler for creating a new transaction, responds with 201 and the stored transaction.
///
/// Requests without a session cookie start a new session, the response then
/// sets the session cookie. The body must be declared as JSON and is
/// validated before anything else happens, so invalid requests neither start
/// a session nor store anything.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    if !has_json_content_type(&headers) {
        return Err(Error::UnsupportedMediaType);
    }
    let new_transaction = parse_new_transaction(&body)?;

    let resolution = resolve_session(&jar);
    if resolution.must_set_cookie() {
        tracing::info!("No session cookie in request, starting a new session.");
    }
    let (jar, session_id) = resolution.apply(jar, state.cookie_duration);

    let transaction = {
        let connection = state.lock_connection()?;
        create_transaction(new_transaction, &session_id, &connection)?
    };

    Ok((
        StatusCode::CREATED,
        jar,
        Json(CreatedTransaction { transaction }),
    ))
}

/// Whether the `Content-Type` header is `application/json`, parameters such
/// as `charset` aside.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
