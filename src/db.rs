//! Functions for setting up the application database.

use rusqlite::Connection;

use crate::storage::create_store_table;

/// Create the tables for the application in the database at `connection`.
///
/// # Errors
/// Returns an error if the tables cannot be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_store_table(connection)
}
