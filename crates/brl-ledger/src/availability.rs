//! The pure availability decision: does a candidate start instant collide
//! with any existing reservation?
//!
//! # Known asymmetry
//!
//! The rule tests ONLY the candidate's start point: a candidate conflicts
//! with an existing interval iff `existing.start < start < existing.end`.
//! The candidate's end instant is never consulted, so a candidate that
//! begins before an existing reservation and runs into (or past) it is
//! accepted even though the two spans overlap: `[0, 12)` against an
//! existing `[5, 15)` passes. This narrower-than-full-overlap semantics is
//! the ledger's historical contract; upgrading it to the symmetric
//! `a.start < b.end && b.start < a.end` test would change which requests
//! are accepted and is deliberately not done here.

use chrono::{DateTime, Utc};

use brl_types::ReservationInterval;

/// Returns `true` when `candidate_start` falls strictly inside none of the
/// existing reservations.
///
/// Both boundaries of each existing interval are available: a reservation
/// may begin exactly where another begins or ends.
pub fn start_is_available(
    existing: &[ReservationInterval],
    candidate_start: DateTime<Utc>,
) -> bool {
    !existing
        .iter()
        .any(|interval| interval.strictly_contains(candidate_start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn interval(start: i64, end: i64) -> ReservationInterval {
        ReservationInterval::new(t(start), t(end)).unwrap()
    }

    #[test]
    fn empty_ledger_is_always_available() {
        assert!(start_is_available(&[], t(0)));
    }

    #[test]
    fn start_inside_existing_conflicts() {
        // Candidate [10, 20) vs existing [5, 15): start 10 is inside.
        let existing = vec![interval(5, 15)];
        assert!(!start_is_available(&existing, t(10)));
    }

    #[test]
    fn start_before_existing_is_accepted_despite_overlap() {
        // Candidate [0, 12) vs existing [5, 15): the spans overlap, but only
        // the start point (0) is tested and it lies outside [5, 15).
        let existing = vec![interval(5, 15)];
        assert!(start_is_available(&existing, t(0)));
    }

    #[test]
    fn boundaries_are_available() {
        let existing = vec![interval(5, 15)];
        assert!(start_is_available(&existing, t(5)));
        assert!(start_is_available(&existing, t(15)));
    }

    #[test]
    fn any_containing_interval_conflicts() {
        let existing = vec![interval(0, 4), interval(10, 20), interval(30, 40)];
        assert!(!start_is_available(&existing, t(15)));
        assert!(!start_is_available(&existing, t(35)));
        assert!(start_is_available(&existing, t(25)));
    }
}
