// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening booking databases.
//!
//! Every connection enforces foreign keys and waits up to
//! [`BUSY_TIMEOUT_MS`] for the write lock, so a booking that issues
//! `BEGIN IMMEDIATE` while another one commits queues behind it instead of
//! failing at once. File databases additionally run in WAL mode so that
//! availability reads are not blocked by an open booking transaction.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits for the database lock before reporting a storage error.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Journal mode requested when a database is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journal {
    /// Leave `SQLite`'s default; used for in-memory databases.
    Default,
    /// Write-ahead logging; used for database files.
    Wal,
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens `database_url`, configures the connection and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, configured or migrated.
pub fn open_database(
    database_url: &str,
    journal: Journal,
) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?journal, "Opening booking database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    pragma(&mut conn, "foreign_keys = ON")?;
    pragma(&mut conn, &format!("busy_timeout = {BUSY_TIMEOUT_MS}"))?;
    if journal == Journal::Wal {
        pragma(&mut conn, "journal_mode = WAL")?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?;
    debug!(count = applied.len(), "Applied pending migrations");

    ensure_foreign_keys(&mut conn)?;
    Ok(conn)
}

/// Runs `PRAGMA <setting>`; Diesel has no DSL for pragmas.
fn pragma(conn: &mut SqliteConnection, setting: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(format!("PRAGMA {setting}"))
        .execute(conn)
        .map_err(|e| PersistenceError::Storage(format!("PRAGMA {setting}: {e}")))?;
    Ok(())
}

/// Returns `last_insert_rowid()` for this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless `PRAGMA foreign_keys` reports enforcement.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeysDisabled` if enforcement is off.
pub fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeysDisabled);
    }
    Ok(())
}
