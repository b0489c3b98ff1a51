// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, MAX_CANCEL_REASON_LEN, MAX_NAME_LEN, validate_cancel_reason, validate_name};

#[test]
fn test_cancel_reason_is_trimmed() {
    assert_eq!(
        validate_cancel_reason(Some("  schedule changed \n")).unwrap(),
        Some(String::from("schedule changed"))
    );
}

#[test]
fn test_missing_or_blank_cancel_reason_is_none() {
    assert_eq!(validate_cancel_reason(None).unwrap(), None);
    assert_eq!(validate_cancel_reason(Some("   ")).unwrap(), None);
}

#[test]
fn test_cancel_reason_length_limit() {
    let at_limit: String = "x".repeat(MAX_CANCEL_REASON_LEN);
    assert!(validate_cancel_reason(Some(&at_limit)).is_ok());
    let over_limit: String = "x".repeat(MAX_CANCEL_REASON_LEN + 1);
    assert!(matches!(
        validate_cancel_reason(Some(&over_limit)),
        Err(DomainError::InvalidCancelReason(_))
    ));
}

#[test]
fn test_name_validation() {
    assert!(validate_name("Acme Appliances").is_ok());
    assert!(validate_name("").is_err());
    assert!(validate_name(&"n".repeat(MAX_NAME_LEN + 1)).is_err());
}
