//! # tek-db
//!
//! libSQL local store for Teknofest registrations and evaluations.
//!
//! Holds teams, individuals, project submissions, admins, and evaluations,
//! and enforces the rules the registration API guarantees: one evaluation
//! per admin and project (resubmission updates), a single AI evaluation per
//! project, one-time assignment of individuals, the featured toggle, and
//! superadmin-only weight changes.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use service::TekService;

/// Central database handle.
///
/// Wraps a libSQL database and connection.
pub struct TekDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TekDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let tek_db = Self { db, conn };
        tek_db.run_migrations().await?;
        Ok(tek_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
