//! Tally is a tiny personal finance tracker.
//!
//! Clients record credits and debits under an anonymous session, identified by
//! the `sessionId` cookie, and can list them, look one up by ID or get the
//! balance of the session. This library provides the JSON REST API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod error;
mod logging;
mod routing;
mod session;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, LOG_RESPONSE_READ_LIMIT, logging_middleware};
pub use routing::build_router;
pub use session::{
    ActiveSession, COOKIE_SESSION_ID, SESSION_COOKIE_DURATION, SessionId, SessionResolution,
    build_session_cookie, resolve_session,
};
pub use transaction::{
    NewTransaction, Summary, Transaction, TransactionType, create_transaction, get_summary,
    get_transaction, get_transactions, parse_new_transaction,
};
pub use validation::{FieldIssue, ValidationError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
