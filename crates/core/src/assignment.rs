// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Technician selection.
//!
//! The booking transaction computes the eligible set under the write lock and
//! asks a [`TechnicianSelector`] to pick one. Production uses uniform random
//! selection; tests inject a deterministic selector.

use crate::error::CoreError;
use rand::prelude::RngExt;
use rand::rng;
use time::Duration;
use visit_booking_domain::{BusySchedule, ServiceInterval, Technician, eligible_technicians};

/// Picks one technician out of a non-empty list of eligible candidates.
pub trait TechnicianSelector: Send + Sync {
    /// Returns one of `candidates`, or `None` if the list is empty.
    fn select(&self, candidates: &[i64]) -> Option<i64>;
}

/// Uniform random choice among the candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl TechnicianSelector for RandomSelector {
    fn select(&self, candidates: &[i64]) -> Option<i64> {
        if candidates.is_empty() {
            return None;
        }
        let mut rng = rng();
        candidates.get(rng.random_range(0..candidates.len())).copied()
    }
}

/// Always picks the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligibleSelector;

impl TechnicianSelector for FirstEligibleSelector {
    fn select(&self, candidates: &[i64]) -> Option<i64> {
        candidates.first().copied()
    }
}

/// Chooses the technician for a new job over `interval`.
///
/// # Errors
///
/// Returns `CoreError::NoEligibleTechnician` if nobody is active, on shift,
/// and free of buffer conflicts.
pub fn plan_assignment(
    technicians: &[Technician],
    interval: &ServiceInterval,
    busy: &BusySchedule,
    buffer: Duration,
    selector: &dyn TechnicianSelector,
) -> Result<i64, CoreError> {
    let candidates: Vec<i64> = eligible_technicians(technicians, interval, busy, buffer);
    selector
        .select(&candidates)
        .ok_or(CoreError::NoEligibleTechnician {
            service_start: interval.start(),
        })
}
