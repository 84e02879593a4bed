//! Scheduling-conflict detection.
//!
//! Two events conflict when they belong to the same company, sit on the same
//! calendar date, both hold their slot per the [`SchedulingPolicy`], and
//! their time windows overlap. Windows are compared half-open, so an event
//! ending at 20:00 never collides with one starting at 20:00.
//!
//! Windows are materialized as full timestamps before comparison: an end
//! time at or before the start time places the end on the following day, so
//! a party running 20:00-01:00 correctly overlaps a 23:00 booking instead of
//! being treated as an inverted (empty) interval. One limitation remains:
//! the same-date precondition means that widened window is still never
//! compared against an event *dated* the following day, so a 20:00-01:00
//! party does not collide with a 00:30 booking dated the next morning.

use chrono::NaiveDateTime;

use crate::config::SchedulingPolicy;
use crate::entities::Event;

/// Materializes the real time window of an event as timestamps.
///
/// The stored schedule is a date plus two times of day. An `end_time` at or
/// before `start_time` means service runs past midnight, so the end lands on
/// the next calendar day.
///
/// # Arguments
/// * `event` - The event whose window to compute
///
/// # Returns
/// `(start, end)` timestamps with `start < end`
#[must_use]
pub fn event_window(event: &Event) -> (NaiveDateTime, NaiveDateTime) {
    let start = event.date.and_time(event.start_time);
    let end = if event.end_time <= event.start_time {
        match event.date.succ_opt() {
            Some(next_day) => next_day.and_time(event.end_time),
            // Date overflow at the calendar horizon: saturate
            None => NaiveDateTime::MAX,
        }
    } else {
        event.date.and_time(event.end_time)
    };
    (start, end)
}

/// Whether two events' time windows overlap (half-open comparison).
///
/// Touching boundaries do not overlap: `a` ending exactly when `b` starts is
/// a legal back-to-back booking.
#[must_use]
pub fn windows_overlap(a: &Event, b: &Event) -> bool {
    let (a_start, a_end) = event_window(a);
    let (b_start, b_end) = event_window(b);
    a_start < b_end && a_end > b_start
}

/// Whether `candidate` collides with any slot-holding event in `events`.
///
/// Only events of the same company on the same date whose status the policy
/// blocks are considered; the candidate itself (matched by id) is skipped,
/// so re-checking an already-stored event does not report a self-conflict.
/// The candidate's own status is deliberately ignored: the question asked is
/// "would this booking collide", whatever stage the booking is in.
///
/// # Arguments
/// * `candidate` - The event being placed or re-checked
/// * `events` - Snapshot of the company's events to check against
/// * `policy` - Decides which statuses hold a calendar slot
#[must_use]
pub fn is_conflicting(candidate: &Event, events: &[Event], policy: &SchedulingPolicy) -> bool {
    events.iter().any(|other| {
        other.id != candidate.id
            && other.company_id == candidate.company_id
            && other.date == candidate.date
            && policy.blocks(other.status)
            && windows_overlap(candidate, other)
    })
}

/// Scans a snapshot and reports every slot-holding event that collides with
/// another slot-holding event.
///
/// Both sides of a collision are reported, in the order they appear in
/// `events`. Events whose status the policy does not block are neither
/// reported nor able to cause a collision.
///
/// # Arguments
/// * `events` - Snapshot of events to scan
/// * `policy` - Decides which statuses hold a calendar slot
///
/// # Returns
/// Ids of the conflicting events
#[must_use]
pub fn find_conflicts(events: &[Event], policy: &SchedulingPolicy) -> Vec<i64> {
    events
        .iter()
        .filter(|event| policy.blocks(event.status))
        .filter(|event| is_conflicting(event, events, policy))
        .map(|event| event.id)
        .collect()
}
