// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use visit_booking::CoreError;
use visit_booking_domain::DomainError;
use visit_booking_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// caller-facing contract. Every variant maps to exactly one error category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The acting party may not perform the operation.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A booking rule rejected the operation against the current schedule.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal or storage error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the error category: `validation`, `not_found`, `forbidden`,
    /// `conflict` or `system`.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "system",
        }
    }

    /// Returns the specific kind within the category.
    ///
    /// For conflicts this is the violated rule (e.g. `too_close_or_past`),
    /// for validation errors the offending field.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. } => field,
            Self::ResourceNotFound { resource_type, .. } => resource_type,
            Self::Forbidden { action, .. } => action,
            Self::Conflict { rule, .. } => rule,
            Self::Internal { .. } => "storage",
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Forbidden { message, .. }
            | Self::Conflict { message, .. }
            | Self::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Forbidden { action, message } => {
                write!(f, "Forbidden to {action}: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDayOfWeek(_) => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message,
        },
        DomainError::InvalidShiftWindow { .. } => ApiError::InvalidInput {
            field: String::from("shift_window"),
            message,
        },
        DomainError::InvalidDurationMinutes(_) => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidCancelReason(_) => ApiError::InvalidInput {
            field: String::from("reason"),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message,
        },
        DomainError::InvalidBookingPolicy { .. } => ApiError::InvalidInput {
            field: String::from("booking_policy"),
            message,
        },
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::TimeParseError { .. } | DomainError::InvalidServiceInterval { .. } => {
            ApiError::InvalidInput {
                field: String::from("service_time"),
                message,
            }
        }
        DomainError::InvalidReservationStatus(_) | DomainError::InvalidDisabledReason(_) => {
            ApiError::Internal { message }
        }
        DomainError::InvalidStatusTransition { .. } => ApiError::Conflict {
            rule: String::from("invalid_status_transition"),
            message,
        },
        DomainError::PreviousWorkIncomplete { .. } => ApiError::Conflict {
            rule: String::from("previous_work_incomplete"),
            message,
        },
        DomainError::TooCloseOrPast { .. } => ApiError::Conflict {
            rule: String::from("too_close_or_past"),
            message,
        },
        DomainError::TooLateToCancel { .. } => ApiError::Conflict {
            rule: String::from("too_late_to_cancel"),
            message,
        },
        DomainError::NotReservationOwner { .. } => ApiError::Forbidden {
            action: String::from("cancel"),
            message,
        },
        DomainError::NotAssignedTechnician { .. } => ApiError::Forbidden {
            action: String::from("act_on_reservation"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoEligibleTechnician { .. } => ApiError::Conflict {
            rule: String::from("no_eligible_technician"),
            message: err.to_string(),
        },
        CoreError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: err.to_string(),
        },
        CoreError::ClockUnavailable { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are reported as opaque internal errors; their detail is
/// kept in the message for logs only.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        PersistenceError::PolicyNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("duration_policy"),
            message,
        },
        PersistenceError::BusinessNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("business"),
            message,
        },
        PersistenceError::DeviceNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("device"),
            message,
        },
        PersistenceError::TechnicianNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("technician"),
            message,
        },
        PersistenceError::CustomerNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("customer"),
            message,
        },
        PersistenceError::ReservationNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("reservation"),
            message,
        },
        PersistenceError::BusinessNotOwned { .. } => ApiError::Forbidden {
            action: String::from("book"),
            message,
        },
        PersistenceError::Storage(_)
        | PersistenceError::Connection(_)
        | PersistenceError::Migration(_)
        | PersistenceError::InvalidDatabasePath(_)
        | PersistenceError::ForeignKeysDisabled
        | PersistenceError::CorruptRow(_) => ApiError::Internal { message },
    }
}
