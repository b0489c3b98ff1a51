// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test exercises connection setup and migrations
//! implicitly; these cover the explicit guarantees.

use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.register_technician("Park", "junior").unwrap();

    assert_eq!(db1.list_active_technicians_with_shifts().unwrap().len(), 1);
    assert!(db2.list_active_technicians_with_shifts().unwrap().is_empty());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.count_reservation_rows().unwrap(), 0);
}
