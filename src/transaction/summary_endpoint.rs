//! Defines the endpoint for the balance of a session's transactions.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    Error,
    session::ActiveSession,
    transaction::{Summary, TransactionState, core::get_summary},
};

/// The response body for the balance summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The balance of the caller's session.
    pub summary: Summary,
}

/// A route handler for the sum of the caller's transaction amounts.
///
/// A session without transactions has a balance of zero.
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    ActiveSession(session_id): ActiveSession,
) -> Result<Json<SummaryResponse>, Error> {
    let connection = state.lock_connection()?;
    let summary = get_summary(&session_id, &connection)?;

    Ok(Json(SummaryResponse { summary }))
}
