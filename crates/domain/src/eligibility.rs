// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The eligible-technician predicate.
//!
//! A technician is eligible for an interval when they are active, one of their
//! shift windows covers the interval, and none of their `CONFIRMED`/`START`
//! jobs conflicts with it once widened by the buffer.
//!
//! Both the availability report and the booking transaction evaluate this
//! same predicate; only the source of the busy intervals differs (a plain
//! read versus a read under the write lock).

use crate::interval::ServiceInterval;
use crate::types::Technician;
use std::collections::HashMap;
use time::Duration;

/// Occupied intervals per technician.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySchedule {
    by_technician: HashMap<i64, Vec<ServiceInterval>>,
}

impl BusySchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occupied interval for a technician.
    pub fn add(&mut self, technician_id: i64, interval: ServiceInterval) {
        self.by_technician
            .entry(technician_id)
            .or_default()
            .push(interval);
    }

    /// Returns the occupied intervals of a technician.
    #[must_use]
    pub fn intervals_for(&self, technician_id: i64) -> &[ServiceInterval] {
        self.by_technician
            .get(&technician_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if the technician has no job conflicting with `interval`.
    #[must_use]
    pub fn is_free(&self, technician_id: i64, interval: &ServiceInterval, buffer: Duration) -> bool {
        !self
            .intervals_for(technician_id)
            .iter()
            .any(|existing| interval.conflicts_with(existing, buffer))
    }
}

impl FromIterator<(i64, ServiceInterval)> for BusySchedule {
    fn from_iter<I: IntoIterator<Item = (i64, ServiceInterval)>>(iter: I) -> Self {
        let mut schedule: Self = Self::new();
        for (technician_id, interval) in iter {
            schedule.add(technician_id, interval);
        }
        schedule
    }
}

/// Returns the technicians whose shift covers `interval`, ignoring existing jobs.
#[must_use]
pub fn technicians_on_shift<'a>(
    technicians: &'a [Technician],
    interval: &ServiceInterval,
) -> Vec<&'a Technician> {
    technicians
        .iter()
        .filter(|technician| technician.is_on_shift_for(interval))
        .collect()
}

/// Returns the IDs of all eligible technicians for `interval`, in input order.
#[must_use]
pub fn eligible_technicians(
    technicians: &[Technician],
    interval: &ServiceInterval,
    busy: &BusySchedule,
    buffer: Duration,
) -> Vec<i64> {
    technicians_on_shift(technicians, interval)
        .into_iter()
        .filter(|technician| busy.is_free(technician.technician_id, interval, buffer))
        .map(|technician| technician.technician_id)
        .collect()
}
