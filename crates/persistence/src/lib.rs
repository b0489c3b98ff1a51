// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for field-service visit booking.
//!
//! This crate stores reference data (customers, businesses, devices,
//! technicians, shift windows, duration policies) and reservations in
//! `SQLite` through Diesel, and runs the booking and transition transactions.
//!
//! ## Transactions
//!
//! - Availability reads run in a plain deferred transaction and take no
//!   write lock; their answer is advisory.
//! - Booking and status transitions run in `BEGIN IMMEDIATE` transactions,
//!   so the eligibility check and the write it guards are serialized against
//!   every other writer.
//! - Any rule violation detected inside a transaction is returned as an
//!   error, and Diesel rolls the transaction back.
//!
//! ## Testing Philosophy
//!
//! - Each test gets its own shared-cache in-memory database
//! - The concurrent-booking test uses a temporary file so that several
//!   connections contend for the real write lock

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, PrimitiveDateTime};
use visit_booking::{Command, TechnicianSelector, TransitionResult};
use visit_booking_domain::{
    BookingPolicy, BusySchedule, DurationPolicy, Reservation, ShiftWindow, Technician,
};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{BookingRequest, ReservationData};
pub use error::PersistenceError;

use backend::BookingConnection;
use backend::sqlite::Journal;

/// Technicians and their occupied intervals, read together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    pub technicians: Vec<Technician>,
    pub busy: BusySchedule,
}

/// Persistence adapter over one `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database instance via an
    /// atomic counter, ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:memdb_booking_{db_id}?mode=memory&cache=shared");
        let conn: SqliteConnection = backend::sqlite::open_database(&url, Journal::Default)?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a file-based `SQLite` database.
    ///
    /// Several adapters may open the same file; they coordinate through
    /// `SQLite` locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not UTF-8 or the database cannot be
    /// opened or migrated.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let url: &str = path
            .to_str()
            .ok_or_else(|| PersistenceError::InvalidDatabasePath(path.display().to_string()))?;
        let conn: SqliteConnection = backend::sqlite::open_database(url, Journal::Wal)?;
        Ok(Self { conn })
    }

    /// Checks that foreign keys are enforced on the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeysDisabled` if they are not.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.ensure_foreign_keys()
    }

    // ========================================================================
    // Reference Data
    // ========================================================================

    /// Registers a customer and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the insert fails.
    pub fn register_customer(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::reference::register_customer(&mut self.conn, name)
    }

    /// Registers a business owned by `customer_id` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the insert fails.
    pub fn register_business(
        &mut self,
        customer_id: i64,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::reference::register_business(&mut self.conn, customer_id, name)
    }

    /// Registers a device at a business and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the business does not exist or the insert fails.
    pub fn register_device(
        &mut self,
        business_id: i64,
        device_size: &str,
        label: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::reference::register_device(&mut self.conn, business_id, device_size, label)
    }

    /// Registers an active technician and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the insert fails.
    pub fn register_technician(&mut self, name: &str, grade: &str) -> Result<i64, PersistenceError> {
        mutations::reference::register_technician(&mut self.conn, name, grade)
    }

    /// Adds a weekly shift window to a technician.
    ///
    /// # Errors
    ///
    /// Returns an error if the technician does not exist or the insert fails.
    pub fn add_shift_window(
        &mut self,
        technician_id: i64,
        shift: &ShiftWindow,
    ) -> Result<i64, PersistenceError> {
        mutations::reference::add_shift_window(&mut self.conn, technician_id, shift)
    }

    /// Activates or deactivates a technician.
    ///
    /// # Errors
    ///
    /// Returns an error if the technician does not exist or the update fails.
    pub fn set_technician_active(
        &mut self,
        technician_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::reference::set_technician_active(&mut self.conn, technician_id, is_active)
    }

    /// Registers a duration policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is not positive, the pair already
    /// exists, or the insert fails.
    pub fn register_duration_policy(
        &mut self,
        device_size: &str,
        service_kind: &str,
        duration_minutes: i64,
    ) -> Result<DurationPolicy, PersistenceError> {
        mutations::reference::register_duration_policy(
            &mut self.conn,
            device_size,
            service_kind,
            duration_minutes,
        )
    }

    /// Retrieves the weekly shift windows of a technician.
    ///
    /// # Errors
    ///
    /// Returns an error if the technician does not exist or the query fails.
    pub fn get_technician_shifts(
        &mut self,
        technician_id: i64,
    ) -> Result<Vec<ShiftWindow>, PersistenceError> {
        queries::reference::get_technician_shifts(&mut self.conn, technician_id)
    }

    /// Retrieves all active technicians with their shifts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_technicians_with_shifts(
        &mut self,
    ) -> Result<Vec<Technician>, PersistenceError> {
        queries::reference::list_active_technicians_with_shifts(&mut self.conn)
    }

    /// Retrieves a duration policy.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PolicyNotFound` if it does not exist.
    pub fn get_duration_policy(&mut self, policy_id: i64) -> Result<DurationPolicy, PersistenceError> {
        queries::reference::get_duration_policy(&mut self.conn, policy_id)
    }

    /// Returns true if the business exists and belongs to the customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn check_business_ownership(
        &mut self,
        business_id: i64,
        customer_id: i64,
    ) -> Result<bool, PersistenceError> {
        queries::reference::check_business_ownership(&mut self.conn, business_id, customer_id)
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Reads active technicians and occupied intervals for a date range from
    /// one consistent snapshot, without taking the write lock.
    ///
    /// Jobs on the surrounding dates are included when `policy`'s buffer
    /// reaches into the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_schedule(
        &mut self,
        start_date: Date,
        end_date: Date,
        policy: &BookingPolicy,
    ) -> Result<ScheduleSnapshot, PersistenceError> {
        let (window_start, window_end) = policy.date_conflict_window(start_date, end_date);
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let technicians: Vec<Technician> =
                queries::reference::list_active_technicians_with_shifts(conn)?;
            let busy: BusySchedule =
                queries::reservations::load_busy_schedule(conn, window_start, window_end)?;
            Ok(ScheduleSnapshot { technicians, busy })
        })
    }

    // ========================================================================
    // Booking & Transitions
    // ========================================================================

    /// Creates a reservation and assigns a technician in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, nobody is eligible, or the
    /// database fails. Nothing is persisted on error.
    pub fn create_and_assign(
        &mut self,
        request: &BookingRequest,
        policy: &BookingPolicy,
        now: PrimitiveDateTime,
        selector: &dyn TechnicianSelector,
    ) -> Result<Reservation, PersistenceError> {
        mutations::booking::create_and_assign(&mut self.conn, request, policy, now, selector)
    }

    /// Applies a start, complete or cancel command.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist, the transition is
    /// rejected, or the database fails.
    pub fn apply_transition(
        &mut self,
        reservation_id: i64,
        command: Command,
        policy: &BookingPolicy,
        now: PrimitiveDateTime,
    ) -> Result<TransitionResult, PersistenceError> {
        mutations::transitions::apply_transition(
            &mut self.conn,
            reservation_id,
            command,
            policy,
            now,
        )
    }

    /// Soft-deletes a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist.
    pub fn soft_delete_reservation(&mut self, reservation_id: i64) -> Result<(), PersistenceError> {
        mutations::transitions::soft_delete_reservation(&mut self.conn, reservation_id)
    }

    // ========================================================================
    // Reservation Queries
    // ========================================================================

    /// Retrieves a reservation with its bookkeeping timestamps.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReservationNotFound` if it does not exist.
    pub fn get_reservation(
        &mut self,
        reservation_id: i64,
    ) -> Result<ReservationData, PersistenceError> {
        queries::reservations::get_reservation(&mut self.conn, reservation_id)
    }

    /// Lists a technician's reservations on a date, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_technician_reservations(
        &mut self,
        technician_id: i64,
        date: Date,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_technician_reservations(&mut self.conn, technician_id, date)
    }

    /// Counts reservation rows, including pending and deleted ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservation_rows(&mut self) -> Result<i64, PersistenceError> {
        use diesel_schema::reservations;
        reservations::table
            .count()
            .get_result(&mut self.conn)
            .map_err(|e| PersistenceError::Storage(format!("count_reservation_rows: {e}")))
    }
}
