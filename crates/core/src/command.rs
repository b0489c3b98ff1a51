// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Who is asking for a reservation to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The customer who booked the visit.
    Customer(i64),
    /// A field technician.
    Technician(i64),
}

impl Actor {
    /// Returns the role label used in logs and request payloads.
    #[must_use]
    pub const fn role(&self) -> &'static str {
        match self {
            Self::Customer(_) => "customer",
            Self::Technician(_) => "technician",
        }
    }

    /// Returns the identifier of the acting account.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Customer(id) | Self::Technician(id) => *id,
        }
    }
}

/// A command represents a requested reservation transition as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The assigned technician arrives on site.
    StartWork {
        /// The technician performing the work.
        technician_id: i64,
    },
    /// The assigned technician finishes the job.
    CompleteWork {
        /// The technician performing the work.
        technician_id: i64,
    },
    /// The customer or the assigned technician cancels the visit.
    CancelWork {
        /// The party canceling.
        actor: Actor,
        /// Optional free-text reason, stored on the reservation.
        reason: Option<String>,
    },
}

impl Command {
    /// Returns the verb used in error messages.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::StartWork { .. } => "start",
            Self::CompleteWork { .. } => "complete",
            Self::CancelWork { .. } => "cancel",
        }
    }
}
