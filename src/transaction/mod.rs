//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the session-scoped `TransactionStore`
//! - The dashboard entry form
//! - Endpoints for recording and deleting transactions

mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod form;

pub use core::{NewTransaction, Transaction, TransactionId, TransactionKind, TransactionStore};
pub use create_transaction_endpoint::{CreateTransactionState, create_transaction_endpoint};
pub use delete_transaction_endpoint::{DeleteTransactionState, delete_transaction_endpoint};
pub use form::new_transaction_form;
