// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation status states and the transitions allowed between them.
//!
//! ```text
//! PENDING ──► CONFIRMED ──► START ──► COMPLETED
//!    │            │           │
//!    └────────────┴───────────┴──► CANCELED
//! ```
//!
//! `PENDING` only exists inside the booking transaction. It is either promoted
//! to `CONFIRMED` or rolled back before commit.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Row inserted, technician not yet assigned.
    Pending,
    /// Technician assigned and committed.
    Confirmed,
    /// Technician has started work on site.
    Start,
    /// Work finished. Terminal.
    Completed,
    /// Canceled by customer or technician. Terminal.
    Canceled,
}

impl ReservationStatus {
    /// Returns the string representation stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Start => "START",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Returns true if a reservation in this status occupies its technician's time.
    ///
    /// Only these statuses take part in double-booking checks.
    #[must_use]
    pub const fn blocks_schedule(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Start)
    }

    /// Checks if a transition from this status to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Start)
                | (Self::Start, Self::Completed)
                | (
                    Self::Pending | Self::Confirmed | Self::Start,
                    Self::Canceled
                )
        )
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "START" => Ok(Self::Start),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidReservationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
