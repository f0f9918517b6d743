//! The API endpoints URIs.

/// Create a transaction (POST) or list the session's transactions (GET).
pub const TRANSACTIONS: &str = "/";
/// A single transaction of the session, by ID.
pub const TRANSACTION: &str = "/{id}";
/// The balance of the session's transactions.
pub const SUMMARY: &str = "/summary";
