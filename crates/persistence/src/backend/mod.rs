// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup and the handful of `SQLite` statements Diesel has no DSL for.

pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Connection-level helpers used by the mutations.
pub trait BookingConnection: Connection {
    /// Returns the id of the row inserted last on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError>;

    /// Fails unless foreign keys are enforced on this connection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeysDisabled` if they are not.
    fn ensure_foreign_keys(&mut self) -> Result<(), PersistenceError>;
}

impl BookingConnection for SqliteConnection {
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_id(self)
    }

    fn ensure_foreign_keys(&mut self) -> Result<(), PersistenceError> {
        sqlite::ensure_foreign_keys(self)
    }
}
