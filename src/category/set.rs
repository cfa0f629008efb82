//! The session store for the category list.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    category::CategoryName,
    storage::{CATEGORIES_KEY, StoragePort},
};

/// The category labels installed when no list has been stored yet.
const DEFAULT_CATEGORIES: [&str; 9] = [
    "Salário",
    "Aluguel/Condomínio",
    "Água/Luz/Gás",
    "Internet/TV",
    "Mercado",
    "Transporte",
    "Saúde",
    "Lazer",
    "Outros",
];

/// The ordered set of category labels transactions can be filed under.
///
/// Labels are unique and kept in insertion order. The set can never become
/// empty: removing the last remaining label is a no-op. Every mutation
/// writes the JSON-serialized full list back through the storage port
/// before returning.
pub struct CategorySet {
    storage: Arc<dyn StoragePort>,
    labels: Mutex<Vec<String>>,
}

impl CategorySet {
    /// Load the stored category list through `storage`.
    ///
    /// A missing value installs the default list and writes it back, so the
    /// stored state is explicit from the first start.
    ///
    /// # Errors
    /// Returns [Error::CorruptData] if a stored value exists but cannot be
    /// parsed, or a storage error if the read or the initial write fails.
    pub fn load(storage: Arc<dyn StoragePort>) -> Result<Self, Error> {
        let labels: Vec<String> = match storage.read(CATEGORIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|error| {
                Error::CorruptData(CATEGORIES_KEY.to_owned(), error.to_string())
            })?,
            None => {
                let defaults: Vec<String> =
                    DEFAULT_CATEGORIES.iter().map(|label| label.to_string()).collect();
                persist(storage.as_ref(), &defaults)?;
                defaults
            }
        };

        Ok(Self {
            storage,
            labels: Mutex::new(labels),
        })
    }

    /// Append `name` to the list.
    ///
    /// Adding a label that is already present is a no-op, not an error.
    ///
    /// # Errors
    /// Returns an error if the updated list cannot be persisted.
    pub fn add(&self, name: CategoryName) -> Result<(), Error> {
        let mut labels = self.labels.lock().map_err(|_| Error::StoreLock)?;

        if labels.iter().any(|label| label == name.as_ref()) {
            return Ok(());
        }

        labels.push(name.to_string());
        persist(self.storage.as_ref(), &labels)
    }

    /// Delete `name` from the list.
    ///
    /// Removing a label that is not present is a no-op, and so is a removal
    /// that would leave the list empty.
    ///
    /// # Errors
    /// Returns an error if the updated list cannot be persisted.
    pub fn remove(&self, name: &str) -> Result<(), Error> {
        let mut labels = self.labels.lock().map_err(|_| Error::StoreLock)?;

        if labels.len() <= 1 {
            return Ok(());
        }

        let count_before = labels.len();
        labels.retain(|label| label != name);

        if labels.len() != count_before {
            persist(self.storage.as_ref(), &labels)?;
        }

        Ok(())
    }

    /// A snapshot of the list, in insertion order.
    pub fn all(&self) -> Result<Vec<String>, Error> {
        let labels = self.labels.lock().map_err(|_| Error::StoreLock)?;

        Ok(labels.clone())
    }

    /// Whether `name` is currently in the list.
    pub fn contains(&self, name: &str) -> Result<bool, Error> {
        let labels = self.labels.lock().map_err(|_| Error::StoreLock)?;

        Ok(labels.iter().any(|label| label == name))
    }
}

fn persist(storage: &dyn StoragePort, labels: &[String]) -> Result<(), Error> {
    let raw = serde_json::to_string(labels)
        .map_err(|error| Error::JsonSerialization(error.to_string()))?;

    storage.write(CATEGORIES_KEY, &raw)
}
