//! Defines the endpoint for listing the transactions of a session.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    Error,
    session::ActiveSession,
    transaction::{Transaction, TransactionState, core::get_transactions},
};

/// The response body for the transactions of a session.
#[derive(Debug, Serialize)]
pub struct TransactionList {
    /// The session's transactions in the order they were created.
    pub transactions: Vec<Transaction>,
}

/// A route handler that lists every transaction recorded under the caller's session.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    ActiveSession(session_id): ActiveSession,
) -> Result<Json<TransactionList>, Error> {
    let connection = state.lock_connection()?;
    let transactions = get_transactions(&session_id, &connection)?;

    Ok(Json(TransactionList { transactions }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_utils::{create_with_session, get_test_server, session_cookie};

    #[tokio::test]
    async fn list_requires_session_cookie() {
        let (server, _) = get_test_server();

        let response = server.get("/").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_is_empty_for_unknown_session() {
        let (server, _) = get_test_server();

        let response = server.get("/").add_cookie(session_cookie("fresh")).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "transactions": [] }));
    }

    #[tokio::test]
    async fn list_only_returns_own_transactions() {
        let (server, _) = get_test_server();
        let session_a = create_with_session(&server, None, "a1", 1.0, "credit").await;
        create_with_session(&server, Some(&session_a), "a2", 2.0, "debit").await;
        let session_b = create_with_session(&server, None, "b1", 3.0, "credit").await;
        assert_ne!(session_a, session_b);

        let response = server.get("/").add_cookie(session_cookie(&session_a)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let transactions = body["transactions"].as_array().unwrap();
        let titles: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["a1", "a2"]);
        assert!(
            transactions
                .iter()
                .all(|transaction| transaction["session_id"] == session_a.as_str())
        );
    }
}
