// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use visit_booking::CoreError;
use visit_booking_domain::DomainError;

/// Errors returned by the persistence layer.
///
/// Storage failures carry the underlying message only. Lookups that miss and
/// booking rules rejected inside a transaction get their own variants so the
/// caller can tell them apart without parsing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A statement failed or returned something unexpected.
    Storage(String),
    /// The database could not be opened.
    Connection(String),
    /// Applying the embedded migrations failed.
    Migration(String),
    /// The database path is not valid UTF-8.
    InvalidDatabasePath(String),
    /// `PRAGMA foreign_keys` is off on this connection.
    ForeignKeysDisabled,
    /// A stored row could not be converted back into a domain value.
    CorruptRow(String),
    PolicyNotFound(i64),
    BusinessNotFound(i64),
    /// The device does not exist or belongs to another business.
    DeviceNotFound { device_id: i64, business_id: i64 },
    TechnicianNotFound(i64),
    CustomerNotFound(i64),
    /// Missing or soft-deleted.
    ReservationNotFound(i64),
    /// The business belongs to another customer.
    BusinessNotOwned { business_id: i64, customer_id: i64 },
    /// A booking rule rejected the operation and the transaction was rolled back.
    Rejected(CoreError),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
            Self::Connection(msg) => write!(f, "Cannot open database: {msg}"),
            Self::Migration(msg) => write!(f, "Migration failed: {msg}"),
            Self::InvalidDatabasePath(path) => write!(f, "Invalid database path: {path}"),
            Self::ForeignKeysDisabled => write!(f, "Foreign key enforcement is disabled"),
            Self::CorruptRow(msg) => write!(f, "Stored row is invalid: {msg}"),
            Self::PolicyNotFound(id) => write!(f, "Duration policy not found: {id}"),
            Self::BusinessNotFound(id) => write!(f, "Business not found: {id}"),
            Self::DeviceNotFound {
                device_id,
                business_id,
            } => write!(f, "Device {device_id} not found for business {business_id}"),
            Self::TechnicianNotFound(id) => write!(f, "Technician not found: {id}"),
            Self::CustomerNotFound(id) => write!(f, "Customer not found: {id}"),
            Self::ReservationNotFound(id) => write!(f, "Reservation not found: {id}"),
            Self::BusinessNotOwned {
                business_id,
                customer_id,
            } => write!(
                f,
                "Business {business_id} does not belong to customer {customer_id}"
            ),
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Rejected(CoreError::DomainViolation(err))
    }
}
