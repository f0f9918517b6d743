//! Defines the endpoint for getting a single transaction by its ID.

use axum::{
    Json,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Error,
    session::ActiveSession,
    transaction::{Transaction, TransactionState, core::get_transaction},
    validation::ValidationError,
};

/// The `{id}` path parameter, validated as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionIdPath(pub Uuid);

impl<S> FromRequestParts<S> for TransactionIdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::single("id", &rejection.body_text()))?;

        Ok(Self(parse_transaction_id(&id)?))
    }
}

/// Parse a transaction ID in the hyphenated form, e.g. "67e55044-10b1-426f-9247-bb680e5fe0c8".
///
/// # Errors
/// Returns a [ValidationError] on `id` for any other input.
pub fn parse_transaction_id(id: &str) -> Result<Uuid, ValidationError> {
    const HYPHENATED_LENGTH: usize = 36;

    if id.len() != HYPHENATED_LENGTH {
        return Err(ValidationError::single("id", "expected a UUID"));
    }

    Uuid::parse_str(id)
        .map_err(|error| ValidationError::single("id", &format!("expected a UUID: {error}")))
}

/// The response body for a transaction lookup.
///
/// `transaction` is `null` when there is no matching transaction.
#[derive(Debug, Serialize)]
pub struct FoundTransaction {
    /// The matching transaction, if any.
    pub transaction: Option<Transaction>,
}

/// A route handler for getting one of the caller's transactions by ID.
///
/// The ID is validated before the session guard runs. A transaction that does
/// not exist and one that belongs to another session look the same: 200 with
/// a `null` transaction.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    TransactionIdPath(id): TransactionIdPath,
    ActiveSession(session_id): ActiveSession,
) -> Result<Json<FoundTransaction>, Error> {
    let connection = state.lock_connection()?;
    let transaction = get_transaction(id, &session_id, &connection)?;

    Ok(Json(FoundTransaction { transaction }))
}
