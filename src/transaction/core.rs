//! Defines the core data model and the session store for transactions.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    storage::{StoragePort, TRANSACTIONS_KEY},
};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction brings money in or takes money out.
///
/// The direction of a transaction is carried here, never by the sign of its
/// amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. rent.
    Expense,
}

/// An income or expense event.
///
/// Immutable once created: there is no update operation, only removal by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID assigned by the store at creation. Unique for the lifetime of
    /// the store and never reused, even after removal.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Always strictly positive.
    pub amount: f64,
    /// Whether this is income or an expense.
    ///
    /// Stored under the field name `type` to keep the persisted JSON shape.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category label the transaction was filed under at creation.
    ///
    /// Removing a category later does not rewrite this field, so labels that
    /// no longer exist in the category set may persist here.
    pub category: String,
    /// The transaction date as a `YYYY-MM-DD` string.
    ///
    /// Kept as a string so month filtering stays a plain prefix match; see
    /// [crate::dashboard::filter_by_month].
    pub date: String,
}

/// A transaction waiting to be given an ID by [TransactionStore::add].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Expected to be strictly
    /// positive; callers validate before constructing a draft.
    pub amount: f64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// The category label to file the transaction under.
    pub category: String,
    /// The transaction date as a `YYYY-MM-DD` string.
    pub date: String,
}

struct StoreInner {
    /// Most recent first.
    entries: Vec<Transaction>,
    next_id: TransactionId,
}

/// The session-scoped collection of transactions.
///
/// Loaded once at process start from the storage port; every mutation writes
/// the JSON-serialized full collection back through the port before
/// returning. The collection is kept newest-first, which is also the display
/// order.
pub struct TransactionStore {
    storage: Arc<dyn StoragePort>,
    inner: Mutex<StoreInner>,
}

impl TransactionStore {
    /// Load the stored transaction collection through `storage`.
    ///
    /// A missing value yields an empty store.
    ///
    /// # Errors
    /// Returns [Error::CorruptData] if a stored value exists but cannot be
    /// parsed, or a storage error if the read fails.
    pub fn load(storage: Arc<dyn StoragePort>) -> Result<Self, Error> {
        let entries: Vec<Transaction> = match storage.read(TRANSACTIONS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|error| {
                Error::CorruptData(TRANSACTIONS_KEY.to_owned(), error.to_string())
            })?,
            None => Vec::new(),
        };

        let next_id = entries.iter().map(|transaction| transaction.id).max().unwrap_or(0) + 1;

        Ok(Self {
            storage,
            inner: Mutex::new(StoreInner { entries, next_id }),
        })
    }

    /// Assign a fresh ID to `draft` and prepend it to the collection.
    ///
    /// # Errors
    /// Returns an error if the updated collection cannot be persisted.
    pub fn add(&self, draft: NewTransaction) -> Result<Transaction, Error> {
        let mut inner = self.inner.lock().map_err(|_| Error::StoreLock)?;

        let transaction = Transaction {
            id: inner.next_id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            date: draft.date,
        };

        inner.next_id += 1;
        inner.entries.insert(0, transaction.clone());
        self.persist(&inner.entries)?;

        Ok(transaction)
    }

    /// Delete the transaction with `id` from the collection.
    ///
    /// Removing an ID that is not present is a no-op, not an error.
    ///
    /// # Errors
    /// Returns an error if the updated collection cannot be persisted.
    pub fn remove(&self, id: TransactionId) -> Result<(), Error> {
        let mut inner = self.inner.lock().map_err(|_| Error::StoreLock)?;

        let count_before = inner.entries.len();
        inner.entries.retain(|transaction| transaction.id != id);

        if inner.entries.len() != count_before {
            self.persist(&inner.entries)?;
        }

        Ok(())
    }

    /// A snapshot of the full collection, most recent first.
    pub fn all(&self) -> Result<Vec<Transaction>, Error> {
        let inner = self.inner.lock().map_err(|_| Error::StoreLock)?;

        Ok(inner.entries.clone())
    }

    fn persist(&self, entries: &[Transaction]) -> Result<(), Error> {
        let raw = serde_json::to_string(entries)
            .map_err(|error| Error::JsonSerialization(error.to_string()))?;

        self.storage.write(TRANSACTIONS_KEY, &raw)
    }
}

#[cfg(test)]
mod transaction_store_tests {
    use std::sync::Arc;

    use crate::{
        Error,
        storage::{StoragePort, TRANSACTIONS_KEY},
        test_utils::MemoryStorage,
    };

    use super::{NewTransaction, TransactionKind, TransactionStore};

    fn salary_draft() -> NewTransaction {
        NewTransaction {
            description: "Salário Base".to_owned(),
            amount: 4500.0,
            kind: TransactionKind::Income,
            category: "Salário".to_owned(),
            date: "2024-05-01".to_owned(),
        }
    }

    fn groceries_draft() -> NewTransaction {
        NewTransaction {
            description: "Compras do Mês".to_owned(),
            amount: 950.0,
            kind: TransactionKind::Expense,
            category: "Mercado".to_owned(),
            date: "2024-05-12".to_owned(),
        }
    }

    fn get_test_store() -> TransactionStore {
        TransactionStore::load(Arc::new(MemoryStorage::new()))
            .expect("Could not load transaction store")
    }

    #[test]
    fn load_with_missing_key_gives_empty_store() {
        let store = get_test_store();

        let entries = store.all().expect("Could not list transactions");

        assert_eq!(entries, Vec::new());
    }

    #[test]
    fn load_with_corrupt_data_fails() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(TRANSACTIONS_KEY, "not json at all")
            .expect("Could not write storage");

        let result = TransactionStore::load(storage);

        assert!(matches!(result, Err(Error::CorruptData(_, _))));
    }

    #[test]
    fn add_assigns_unique_ids_and_prepends() {
        let store = get_test_store();

        let first = store.add(salary_draft()).expect("Could not add transaction");
        let second = store
            .add(groceries_draft())
            .expect("Could not add transaction");

        assert_ne!(first.id, second.id);

        let entries = store.all().expect("Could not list transactions");
        assert_eq!(entries, vec![second, first], "want newest first");
    }

    #[test]
    fn add_persists_through_the_storage_port() {
        let storage = Arc::new(MemoryStorage::new());
        let store =
            TransactionStore::load(storage.clone()).expect("Could not load transaction store");

        let added = store.add(salary_draft()).expect("Could not add transaction");

        let reloaded =
            TransactionStore::load(storage).expect("Could not reload transaction store");
        let entries = reloaded.all().expect("Could not list transactions");

        assert_eq!(entries, vec![added]);
    }

    #[test]
    fn remove_restores_previous_collection_exactly() {
        let store = get_test_store();
        store.add(salary_draft()).expect("Could not add transaction");
        let before = store.all().expect("Could not list transactions");

        let added = store
            .add(groceries_draft())
            .expect("Could not add transaction");
        store.remove(added.id).expect("Could not remove transaction");

        let after = store.all().expect("Could not list transactions");
        assert_eq!(before, after);
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let store = get_test_store();
        store.add(salary_draft()).expect("Could not add transaction");
        let before = store.all().expect("Could not list transactions");

        store.remove(999).expect("Remove of missing ID should be ok");

        let after = store.all().expect("Could not list transactions");
        assert_eq!(before, after);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let store = get_test_store();

        let first = store.add(salary_draft()).expect("Could not add transaction");
        store.remove(first.id).expect("Could not remove transaction");
        let second = store
            .add(groceries_draft())
            .expect("Could not add transaction");

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn stored_shape_uses_original_field_names() {
        let storage = Arc::new(MemoryStorage::new());
        let store =
            TransactionStore::load(storage.clone()).expect("Could not load transaction store");

        store.add(groceries_draft()).expect("Could not add transaction");

        let raw = storage
            .read(TRANSACTIONS_KEY)
            .expect("Could not read storage")
            .expect("No transaction data stored");
        let value: serde_json::Value =
            serde_json::from_str(&raw).expect("Stored data is not valid JSON");

        let entry = &value[0];
        assert_eq!(entry["description"], "Compras do Mês");
        assert_eq!(entry["amount"], 950.0);
        assert_eq!(entry["type"], "expense");
        assert_eq!(entry["category"], "Mercado");
        assert_eq!(entry["date"], "2024-05-12");
    }
}
