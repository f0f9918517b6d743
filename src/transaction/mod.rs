//! Transactions recorded under anonymous sessions and the endpoints that manage them.

mod core;
mod create_endpoint;
mod form;
mod get_endpoint;
mod list_endpoint;
mod state;
mod summary_endpoint;

pub use core::{
    NewTransaction, Summary, Transaction, TransactionType, create_transaction,
    create_transaction_table, get_summary, get_transaction, get_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use form::parse_new_transaction;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use state::TransactionState;
pub use summary_endpoint::get_summary_endpoint;
