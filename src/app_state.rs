//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::{
    Error,
    category::CategorySet,
    insight::{InsightGenerator, InsightService},
    storage::StoragePort,
    transaction::TransactionStore,
};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The ledger of recorded transactions.
    pub transaction_store: Arc<TransactionStore>,
    /// The labels transactions may be filed under.
    pub category_set: Arc<CategorySet>,
    /// The service that produces AI readings of a month.
    pub insight_service: Arc<InsightService>,
    /// The key-value store backing the collections and the logged-in flag.
    pub storage: Arc<dyn StoragePort>,
}

impl AppState {
    /// Create a new [AppState] over `storage`.
    ///
    /// Loads the persisted transaction and category collections through the
    /// port and wires the insight service around `generator`.
    ///
    /// # Errors
    /// Returns [Error::CorruptData] if a stored collection cannot be parsed.
    pub fn new(
        storage: Arc<dyn StoragePort>,
        generator: Box<dyn InsightGenerator>,
    ) -> Result<Self, Error> {
        let transaction_store = Arc::new(TransactionStore::load(storage.clone())?);
        let category_set = Arc::new(CategorySet::load(storage.clone())?);
        let insight_service = Arc::new(InsightService::new(generator));

        Ok(Self {
            transaction_store,
            category_set,
            insight_service,
            storage,
        })
    }
}
