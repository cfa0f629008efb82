//! The key-value storage layer.
//!
//! The app persists three independent values: the authentication flag, the
//! JSON-serialized transaction collection, and the JSON-serialized category
//! list. Stores read their value once at start-up and write the whole value
//! back on every mutation, so the storage interface is a plain string
//! key-value port with no schema of its own.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::Error;

/// The key under which the authentication flag is stored.
pub(crate) const AUTH_KEY: &str = "fin_v3_auth";
/// The key under which the transaction collection is stored.
pub(crate) const TRANSACTIONS_KEY: &str = "fin_v3_data";
/// The key under which the category list is stored.
pub(crate) const CATEGORIES_KEY: &str = "fin_v3_cats";

/// A string key-value port for persisting application state.
///
/// Implementations must tolerate reads of keys that were never written and
/// removals of keys that do not exist.
pub trait StoragePort: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key was never
    /// written (or has been removed).
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value stored under `key`. Removing a missing key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// Create the key-value table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_store_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// [StoragePort] backed by a single-table SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create a storage port over an open database connection.
    ///
    /// The connection is expected to have been initialized with
    /// [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl StoragePort for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let result = connection
            .prepare("SELECT value FROM store WHERE key = :key")?
            .query_row(&[(":key", key)], |row| row.get(0));

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute("DELETE FROM store WHERE key = ?1", (key,))?;

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_storage_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use super::{SqliteStorage, StoragePort, create_store_table};

    fn get_test_storage() -> SqliteStorage {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_store_table(&connection).expect("Could not create store table");

        SqliteStorage::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn read_missing_key_returns_none() {
        let storage = get_test_storage();

        let value = storage.read("nothing_here").expect("Could not read key");

        assert_eq!(value, None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let storage = get_test_storage();

        storage
            .write("greeting", "olá")
            .expect("Could not write key");
        let value = storage.read("greeting").expect("Could not read key");

        assert_eq!(value, Some("olá".to_owned()));
    }

    #[test]
    fn write_replaces_previous_value() {
        let storage = get_test_storage();

        storage.write("flag", "true").expect("Could not write key");
        storage
            .write("flag", "false")
            .expect("Could not overwrite key");
        let value = storage.read("flag").expect("Could not read key");

        assert_eq!(value, Some("false".to_owned()));
    }

    #[test]
    fn remove_deletes_key() {
        let storage = get_test_storage();

        storage.write("flag", "true").expect("Could not write key");
        storage.remove("flag").expect("Could not remove key");
        let value = storage.read("flag").expect("Could not read key");

        assert_eq!(value, None);
    }

    #[test]
    fn remove_missing_key_is_not_an_error() {
        let storage = get_test_storage();

        let result = storage.remove("never_written");

        assert!(result.is_ok());
    }
}
