//! Calendar views over an event snapshot.
//!
//! Pure slice-in, slice-out helpers: range filtering for the agenda,
//! upcoming bookings for the dashboard, and per-day capacity checks against
//! a company's staffing limit. Ordering is always calendar order (date, then
//! start time).

use chrono::NaiveDate;

use crate::config::SchedulingPolicy;
use crate::entities::Event;

/// Events dated within `[from, to]` (inclusive), in calendar order.
///
/// All statuses are included; the agenda shows cancelled and draft entries
/// too.
#[must_use]
pub fn events_in_range<'a>(events: &'a [Event], from: NaiveDate, to: NaiveDate) -> Vec<&'a Event> {
    let mut agenda: Vec<&Event> = events
        .iter()
        .filter(|event| event.date >= from && event.date <= to)
        .collect();
    agenda.sort_by_key(|event| (event.date, event.start_time));
    agenda
}

/// Slot-holding events dated `today` or later, in calendar order.
#[must_use]
pub fn upcoming_events<'a>(
    events: &'a [Event],
    today: NaiveDate,
    policy: &SchedulingPolicy,
) -> Vec<&'a Event> {
    let mut upcoming: Vec<&Event> = events
        .iter()
        .filter(|event| event.date >= today && policy.blocks(event.status))
        .collect();
    upcoming.sort_by_key(|event| (event.date, event.start_time));
    upcoming
}

/// How many slot-holding events sit on `date`.
#[must_use]
pub fn booked_on(events: &[Event], date: NaiveDate, policy: &SchedulingPolicy) -> usize {
    events
        .iter()
        .filter(|event| event.date == date && policy.blocks(event.status))
        .count()
}

/// Whether `date` already carries as many slot-holding events as the company
/// can staff.
///
/// # Arguments
/// * `events` - Snapshot of the company's events
/// * `date` - Day being considered for another booking
/// * `max_events_per_day` - The company's staffing limit
/// * `policy` - Decides which statuses hold a calendar slot
#[must_use]
pub fn day_at_capacity(
    events: &[Event],
    date: NaiveDate,
    max_events_per_day: u32,
    policy: &SchedulingPolicy,
) -> bool {
    booked_on(events, date, policy) >= max_events_per_day as usize
}
