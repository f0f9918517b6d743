//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, OptionalExtension, Row, named_params, types::Type};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, session::SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// Money coming in or going out, recorded under an anonymous session.
///
/// To create a new `Transaction`, build a [NewTransaction] and pass it to
/// [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the server.
    pub id: Uuid,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount in minor units (cents).
    ///
    /// Credits are positive and debits are negative.
    pub amount: i64,
    /// The session that recorded the transaction.
    pub session_id: SessionId,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Whether money was received or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Money received, stored as a positive amount.
    Credit,
    /// Money spent, stored as a negative amount.
    Debit,
}

impl TransactionType {
    /// Give `magnitude` the sign for this transaction type.
    pub fn signed(self, magnitude: i64) -> i64 {
        match self {
            TransactionType::Credit => magnitude,
            TransactionType::Debit => -magnitude,
        }
    }
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// A short description of what the transaction was for.
    pub title: String,
    /// The signed amount in minor units (cents).
    pub amount: i64,
}

/// The balance of a session's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The sum of the transaction amounts in minor units, zero if there are none.
    ///
    /// Wider than a single amount so that no number of transactions can
    /// overflow it.
    pub amount: i128,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Store `transaction` under `session_id` with a freshly generated ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (id, title, amount, session_id, created_at)
             VALUES (:id, :title, :amount, :session_id, :created_at)
             RETURNING id, title, amount, session_id, created_at",
        )?
        .query_one(
            named_params! {
                ":id": Uuid::new_v4().to_string(),
                ":title": transaction.title,
                ":amount": transaction.amount,
                ":session_id": session_id.as_str(),
                ":created_at": OffsetDateTime::now_utc(),
            },
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get all the transactions of `session_id` in the order they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions(
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE session_id = :session_id
             ORDER BY rowid ASC",
        )?
        .query_map(
            named_params! { ":session_id": session_id.as_str() },
            map_transaction_row,
        )?
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// Get the transaction with `id` if it belongs to `session_id`.
///
/// Returns `None` both when `id` does not exist and when it belongs to a
/// different session.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transaction(
    id: Uuid,
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE id = :id AND session_id = :session_id",
        )?
        .query_row(
            named_params! {
                ":id": id.to_string(),
                ":session_id": session_id.as_str(),
            },
            map_transaction_row,
        )
        .optional()?;

    Ok(transaction)
}

/// Sum the amounts of the transactions of `session_id`.
///
/// The sum is accumulated in Rust rather than with SQL `SUM`, which fails
/// once the total leaves the 64-bit range.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_summary(session_id: &SessionId, connection: &Connection) -> Result<Summary, Error> {
    let amount = connection
        .prepare("SELECT amount FROM transactions WHERE session_id = :session_id")?
        .query_map(named_params! { ":session_id": session_id.as_str() }, |row| {
            row.get::<_, i64>(0)
        })?
        .try_fold(0_i128, |total, amount| {
            amount.map(|amount| total + i128::from(amount))
        })?;

    Ok(Summary { amount })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                amount INTEGER NOT NULL,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Every query filters by session.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_session_id ON transactions(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error)))?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let session_id: String = row.get(3)?;
    let created_at = row.get(4)?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id: SessionId::new(&session_id),
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
