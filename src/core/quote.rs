//! Quote issuing and lifecycle.
//!
//! A quote freezes an event's cost calculation into a numbered, versioned
//! offer. Versions within an event are dense (max + 1), the quote number
//! encodes issue date, event and version, and the status machine only
//! allows draft -> sent -> approved/rejected. Amounts are rounded to cents
//! at issue time; the stored record never changes after that.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::core::costing;
use crate::entities::{CostCalculation, Quote, QuoteStatus};
use crate::errors::{Error, Result};

/// How long an offer stands when no validity date is given
pub const DEFAULT_VALIDITY_DAYS: u64 = 30;

/// Amounts a quote carries, frozen from a cost calculation
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTotals {
    /// Summed cost components, rounded to cents
    pub total_cost: Decimal,
    /// Margin applied, in percent
    pub profit_margin: Decimal,
    /// Offered price, rounded to cents
    pub total_price: Decimal,
}

/// Next version number for a quote on `event_id`.
///
/// Versions are dense: one greater than the highest existing version for the
/// event, starting at 1. Quotes for other events in `quotes` are ignored.
#[must_use]
pub fn next_version(quotes: &[Quote], event_id: i64) -> u32 {
    quotes
        .iter()
        .filter(|quote| quote.event_id == event_id)
        .map(|quote| quote.version)
        .max()
        .map_or(1, |highest| highest + 1)
}

/// Human-facing quote number: `QT-YYYYMMDD-<event>-<version>`.
///
/// The event id is zero-padded to four digits and the version to two; wider
/// values keep their full width.
#[must_use]
pub fn quote_number(issued_on: NaiveDate, event_id: i64, version: u32) -> String {
    format!("QT-{}-{event_id:04}-{version:02}", issued_on.format("%Y%m%d"))
}

/// Freezes a cost calculation into quote amounts, rounded to cents.
#[must_use]
pub fn totals_from_calculation(calc: &CostCalculation) -> QuoteTotals {
    QuoteTotals {
        total_cost: costing::aggregate_cost(calc).round_dp(2),
        profit_margin: calc.profit_margin_percent,
        total_price: costing::suggested_price(calc).round_dp(2),
    }
}

/// Assembles a new draft quote for an event.
///
/// Version and number are derived from `existing` and `issued_on`; amounts
/// are frozen from `calc`.
///
/// # Arguments
/// * `id` - Identifier assigned by the caller
/// * `event_id` - Event being priced
/// * `existing` - Quotes already issued (any events; filtered internally)
/// * `calc` - Cost calculation to freeze
/// * `valid_until` - Last date the offer stands
/// * `notes` - Free-form notes for the proposal
/// * `issued_on` - Issue date, encoded into the quote number
#[must_use]
pub fn draft_quote(
    id: i64,
    event_id: i64,
    existing: &[Quote],
    calc: &CostCalculation,
    valid_until: NaiveDate,
    notes: Option<String>,
    issued_on: NaiveDate,
) -> Quote {
    let version = next_version(existing, event_id);
    let totals = totals_from_calculation(calc);
    Quote {
        id,
        event_id,
        quote_number: quote_number(issued_on, event_id, version),
        version,
        total_cost: totals.total_cost,
        profit_margin: totals.profit_margin,
        total_price: totals.total_price,
        valid_until,
        status: QuoteStatus::Draft,
        sent_at: None,
        approved_at: None,
        notes,
    }
}

/// Validity date to use when the caller did not pick one:
/// [`DEFAULT_VALIDITY_DAYS`] after the issue date.
#[must_use]
pub fn default_valid_until(issued_on: NaiveDate) -> NaiveDate {
    issued_on
        .checked_add_days(Days::new(DEFAULT_VALIDITY_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Marks a draft quote as sent.
///
/// # Errors
/// * `Error::InvalidQuoteTransition` - The quote is not a draft
pub fn send(quote: &mut Quote, now: DateTime<Utc>) -> Result<()> {
    if quote.status != QuoteStatus::Draft {
        return Err(Error::InvalidQuoteTransition {
            from: quote.status,
            to: QuoteStatus::Sent,
        });
    }

    quote.status = QuoteStatus::Sent;
    quote.sent_at = Some(now);
    Ok(())
}

/// Marks a sent quote as approved by the client.
///
/// # Errors
/// * `Error::InvalidQuoteTransition` - The quote was never sent, or was
///   already answered
pub fn approve(quote: &mut Quote, now: DateTime<Utc>) -> Result<()> {
    if quote.status != QuoteStatus::Sent {
        return Err(Error::InvalidQuoteTransition {
            from: quote.status,
            to: QuoteStatus::Approved,
        });
    }

    quote.status = QuoteStatus::Approved;
    quote.approved_at = Some(now);
    Ok(())
}

/// Marks a sent quote as rejected by the client.
///
/// # Errors
/// * `Error::InvalidQuoteTransition` - The quote was never sent, or was
///   already answered
pub fn reject(quote: &mut Quote) -> Result<()> {
    if quote.status != QuoteStatus::Sent {
        return Err(Error::InvalidQuoteTransition {
            from: quote.status,
            to: QuoteStatus::Rejected,
        });
    }

    quote.status = QuoteStatus::Rejected;
    Ok(())
}

/// Whether the offer no longer stands on `today`.
///
/// A quote marked expired stays expired; a sent quote expires once its
/// validity date has passed. Drafts and answered quotes never expire.
#[must_use]
pub fn is_expired(quote: &Quote, today: NaiveDate) -> bool {
    match quote.status {
        QuoteStatus::Expired => true,
        QuoteStatus::Sent => quote.valid_until < today,
        QuoteStatus::Draft | QuoteStatus::Approved | QuoteStatus::Rejected => false,
    }
}

/// Whether a sent quote is still standing but runs out within `within_days`
/// of `today`.
#[must_use]
pub fn expiring_soon(quote: &Quote, today: NaiveDate, within_days: u64) -> bool {
    let horizon = today
        .checked_add_days(Days::new(within_days))
        .unwrap_or(NaiveDate::MAX);
    quote.status == QuoteStatus::Sent
        && quote.valid_until >= today
        && quote.valid_until <= horizon
}
