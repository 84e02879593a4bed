//! Dashboard report generation.
//!
//! Aggregates an event-and-quote snapshot into the numbers the dashboard
//! shows: upcoming bookings, month counters, revenue, quote activity and
//! scheduling conflicts. All functions are surface-agnostic and return
//! structured data; the formatting helpers below turn single records into
//! display lines.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::SchedulingPolicy;
use crate::core::{conflict, quote as quote_logic, schedule};
use crate::entities::{Event, EventStatus, Quote, QuoteStatus};

/// How many upcoming bookings the dashboard lists
pub const UPCOMING_LIMIT: usize = 10;

/// Quotes running out within this many days count as expiring
pub const EXPIRY_WARNING_DAYS: u64 = 7;

/// One upcoming booking as shown on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    /// Event id
    pub id: i64,
    /// Calendar title
    pub title: String,
    /// Hiring client
    pub client_name: String,
    /// Event date
    pub date: NaiveDate,
    /// Service start
    pub start_time: NaiveTime,
    /// Expected guests
    pub guest_count: u32,
    /// Lifecycle status
    pub status: EventStatus,
}

/// The dashboard numbers for one company
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyReport {
    /// Next bookings holding a slot, capped at [`UPCOMING_LIMIT`]
    pub upcoming: Vec<UpcomingEvent>,
    /// Events (any status) dated in the current month
    pub events_this_month: usize,
    /// Slot-holding events dated today or later
    pub confirmed_upcoming: usize,
    /// Proposals still waiting on the client or unfinished
    pub open_proposals: usize,
    /// Final prices of completed events in the current month
    pub month_revenue: Decimal,
    /// Quotes sent and awaiting an answer
    pub pending_quotes: usize,
    /// Sent quotes running out within [`EXPIRY_WARNING_DAYS`]
    pub expiring_quotes: usize,
    /// Ids of slot-holding events that collide with each other
    pub conflicts: Vec<i64>,
}

/// Builds the dashboard report for one company's snapshot.
///
/// # Arguments
/// * `events` - The company's events
/// * `quotes` - The company's quotes
/// * `policy` - Decides which statuses hold a calendar slot
/// * `today` - Reference date for "upcoming", "this month" and expiry
///
/// # Returns
/// A structured `CompanyReport` with every dashboard number filled in
#[must_use]
pub fn company_report(
    events: &[Event],
    quotes: &[Quote],
    policy: &SchedulingPolicy,
    today: NaiveDate,
) -> CompanyReport {
    let upcoming = schedule::upcoming_events(events, today, policy)
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|event| UpcomingEvent {
            id: event.id,
            title: event.title.clone(),
            client_name: event.client_name.clone(),
            date: event.date,
            start_time: event.start_time,
            guest_count: event.guest_count,
            status: event.status,
        })
        .collect();

    let in_current_month =
        |date: NaiveDate| date.year() == today.year() && date.month() == today.month();

    let events_this_month = events
        .iter()
        .filter(|event| in_current_month(event.date))
        .count();

    let confirmed_upcoming = events
        .iter()
        .filter(|event| event.date >= today && policy.blocks(event.status))
        .count();

    let open_proposals = events
        .iter()
        .filter(|event| {
            matches!(
                event.status,
                EventStatus::PendingProposal | EventStatus::ProposalSent | EventStatus::Draft
            )
        })
        .count();

    let month_revenue = events
        .iter()
        .filter(|event| event.status == EventStatus::Completed && in_current_month(event.date))
        .filter_map(|event| event.final_price)
        .sum();

    let pending_quotes = quotes
        .iter()
        .filter(|quote| quote.status == QuoteStatus::Sent)
        .count();

    let expiring_quotes = quotes
        .iter()
        .filter(|quote| quote_logic::expiring_soon(quote, today, EXPIRY_WARNING_DAYS))
        .count();

    let conflicts = conflict::find_conflicts(events, policy);

    CompanyReport {
        upcoming,
        events_this_month,
        confirmed_upcoming,
        open_proposals,
        month_revenue,
        pending_quotes,
        expiring_quotes,
        conflicts,
    }
}

/// Formats a monetary amount with currency sign and cents.
///
/// # Returns
/// Formatted string like "$1700.00" or "-$25.50"
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// One agenda line for an event.
///
/// # Returns
/// Formatted string like
/// `2026-09-12 18:00-23:00 | Silva wedding | 120 guests | confirmed`
#[must_use]
pub fn format_event_line(event: &Event) -> String {
    format!(
        "{} {}-{} | {} | {} guests | {}",
        event.date,
        event.start_time.format("%H:%M"),
        event.end_time.format("%H:%M"),
        event.title,
        event.guest_count,
        event.status
    )
}

/// One summary line for a quote.
///
/// # Returns
/// Formatted string like
/// `QT-20260912-0042-01 | $2210.00 | sent (valid until 2026-10-12)`
#[must_use]
pub fn format_quote_line(quote: &Quote) -> String {
    format!(
        "{} | {} | {} (valid until {})",
        quote.quote_number,
        format_money(quote.total_price),
        quote.status,
        quote.valid_until
    )
}
