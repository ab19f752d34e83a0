//! Repository implementations for data access in the registry.
//!
//! Records are only ever inserted and listed; there is no update or delete.

mod person;

pub use person::PersonRepository;

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

pub type DbConn = Arc<Mutex<Connection>>;

/// Acquire the shared connection for the duration of one operation.
pub(crate) fn lock(conn: &DbConn) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| anyhow!("database connection lock poisoned"))
}
