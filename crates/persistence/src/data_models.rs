// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, Time};
use visit_booking_domain::{
    DomainError, Reservation, ReservationStatus, parse_date, parse_timestamp,
};

use crate::diesel_schema::reservations;
use crate::error::PersistenceError;

/// A request to book one visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    pub policy_id: i64,
    pub reserved_date: Date,
    pub service_time: Time,
}

/// A reservation together with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationData {
    pub reservation: Reservation,
    pub created_at: String,
    pub updated_at: String,
}

/// Diesel Queryable struct for reservation rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = reservations)]
pub struct ReservationRow {
    pub reservation_id: i64,
    pub customer_id: i64,
    pub business_id: i64,
    pub device_id: i64,
    pub policy_id: i64,
    pub technician_id: Option<i64>,
    pub reserved_date: String,
    pub service_start: String,
    pub service_end: String,
    pub status: String,
    pub cancel_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ReservationRow {
    /// Converts the stored text columns back into a domain reservation.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if any column fails to parse.
    pub fn into_data(self) -> Result<ReservationData, PersistenceError> {
        let reservation_id: i64 = self.reservation_id;
        let corrupt = move |e: DomainError| {
            PersistenceError::CorruptRow(format!("reservation {reservation_id}: {e}"))
        };

        let status: ReservationStatus = self.status.parse().map_err(corrupt)?;
        let reservation: Reservation = Reservation {
            reservation_id,
            customer_id: self.customer_id,
            business_id: self.business_id,
            device_id: self.device_id,
            policy_id: self.policy_id,
            technician_id: self.technician_id,
            reserved_date: parse_date(&self.reserved_date).map_err(corrupt)?,
            service_start: parse_timestamp(&self.service_start).map_err(corrupt)?,
            service_end: parse_timestamp(&self.service_end).map_err(corrupt)?,
            status,
            cancel_reason: self.cancel_reason,
        };

        Ok(ReservationData {
            reservation,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Converts the row, dropping bookkeeping timestamps.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if any column fails to parse.
    pub fn into_reservation(self) -> Result<Reservation, PersistenceError> {
        self.into_data().map(|data| data.reservation)
    }
}
