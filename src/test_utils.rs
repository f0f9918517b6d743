//! Helpers for route level tests.

use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, build_router, session::COOKIE_SESSION_ID};

/// A test server for the full router backed by an in-memory database.
///
/// The app state is returned so tests can inspect the database directly.
pub(crate) fn get_test_server() -> (TestServer, AppState) {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    let state = AppState::new(connection).expect("Could not create app state.");
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

/// A request cookie for the session `session_id`.
pub(crate) fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::new(COOKIE_SESSION_ID, session_id.to_owned())
}

/// Create a transaction through the API and return the session ID it was created under.
///
/// Pass `None` for `session_id` to start a new session.
pub(crate) async fn create_with_session(
    server: &TestServer,
    session_id: Option<&str>,
    title: &str,
    amount: f64,
    transaction_type: &str,
) -> String {
    let request = server
        .post("/")
        .json(&json!({ "title": title, "amount": amount, "type": transaction_type }));
    let request = match session_id {
        Some(session_id) => request.add_cookie(session_cookie(session_id)),
        None => request,
    };

    let response = request.await;
    response.assert_status(axum::http::StatusCode::CREATED);

    match session_id {
        Some(session_id) => session_id.to_owned(),
        None => response.cookie(COOKIE_SESSION_ID).value().to_owned(),
    }
}

/// The number of rows in the transaction table.
pub(crate) fn count_transactions(state: &AppState) -> u32 {
    state
        .db_connection
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
        .unwrap()
}
