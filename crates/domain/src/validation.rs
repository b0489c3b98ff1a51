// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of a cancel reason, in characters.
pub const MAX_CANCEL_REASON_LEN: usize = 500;

/// Maximum length of a display name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Validates and normalizes an optional cancel reason.
///
/// # Arguments
///
/// * `reason` - The free-text reason supplied by the canceling party, if any
///
/// # Returns
///
/// The trimmed reason, or `None` when no reason or only whitespace was given.
///
/// # Errors
///
/// Returns an error if the reason exceeds `MAX_CANCEL_REASON_LEN` characters.
pub fn validate_cancel_reason(reason: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > MAX_CANCEL_REASON_LEN {
        return Err(DomainError::InvalidCancelReason(format!(
            "Cancel reason cannot exceed {MAX_CANCEL_REASON_LEN} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

/// Validates a display name for a customer, business, or technician.
///
/// # Errors
///
/// Returns an error if the name is empty or longer than `MAX_NAME_LEN`.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    Ok(())
}
