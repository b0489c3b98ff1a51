// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ServiceInterval, format_timestamp, parse_date, parse_time, parse_timestamp};
use time::Duration;
use time::macros::{date, datetime, time};

fn interval(start_hour: u8, start_minute: u8, minutes: u32) -> ServiceInterval {
    let start = time::Time::from_hms(start_hour, start_minute, 0).unwrap();
    ServiceInterval::starting_at(date!(2026 - 10 - 19), start, minutes).unwrap()
}

#[test]
fn test_interval_rejects_empty_and_reversed_bounds() {
    assert!(ServiceInterval::new(datetime!(2026-10-19 10:00), datetime!(2026-10-19 10:00)).is_err());
    assert!(ServiceInterval::new(datetime!(2026-10-19 11:00), datetime!(2026-10-19 10:00)).is_err());
}

#[test]
fn test_interval_rejects_crossing_midnight() {
    let result = ServiceInterval::starting_at(date!(2026 - 10 - 19), time!(23:30), 60);
    assert!(result.is_err());
}

#[test]
fn test_starting_at_computes_end() {
    let job: ServiceInterval = interval(10, 0, 90);
    assert_eq!(job.start(), datetime!(2026-10-19 10:00));
    assert_eq!(job.end(), datetime!(2026-10-19 11:30));
    assert_eq!(job.date(), date!(2026 - 10 - 19));
}

#[test]
fn test_adjacent_intervals_do_not_overlap() {
    assert!(!interval(10, 0, 60).overlaps(&interval(11, 0, 60)));
    assert!(interval(10, 0, 60).overlaps(&interval(10, 59, 60)));
}

#[test]
fn test_buffer_blocks_jobs_near_existing_work() {
    let existing: ServiceInterval = interval(10, 0, 60);
    let buffer: Duration = Duration::minutes(60);

    // Overlaps directly.
    assert!(interval(10, 30, 60).conflicts_with(&existing, buffer));
    // Starts inside the trailing buffer.
    assert!(interval(11, 30, 60).conflicts_with(&existing, buffer));
    // Ends inside the leading buffer.
    assert!(interval(8, 30, 60).conflicts_with(&existing, buffer));
}

#[test]
fn test_job_may_start_exactly_at_buffer_end() {
    let existing: ServiceInterval = interval(10, 0, 60);
    let buffer: Duration = Duration::minutes(60);

    assert!(!interval(12, 0, 60).conflicts_with(&existing, buffer));
    assert!(!interval(8, 0, 60).conflicts_with(&existing, buffer));
}

#[test]
fn test_zero_buffer_reduces_to_overlap() {
    let existing: ServiceInterval = interval(10, 0, 60);
    assert!(!interval(11, 0, 30).conflicts_with(&existing, Duration::ZERO));
    assert!(interval(10, 45, 30).conflicts_with(&existing, Duration::ZERO));
}

#[test]
fn test_time_formats() {
    assert_eq!(parse_date("2026-10-19").unwrap(), date!(2026 - 10 - 19));
    assert!(parse_date("2026-13-01").is_err());
    assert_eq!(parse_time("09:00").unwrap(), time!(9:00));
    assert_eq!(parse_time("17:30:15").unwrap(), time!(17:30:15));
    assert!(parse_time("25:00").is_err());

    let stamp = parse_timestamp("2026-10-19 09:05:00").unwrap();
    assert_eq!(stamp, datetime!(2026-10-19 9:05));
    assert_eq!(format_timestamp(stamp), "2026-10-19 09:05:00");
}
