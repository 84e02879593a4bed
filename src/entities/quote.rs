//! Quote entity - A versioned, priced proposal issued for an event.
//!
//! Quotes are immutable once sent; revising a proposal means issuing a new
//! version. `quote_number` encodes issue date, event and version, e.g.
//! `QT-20260912-0042-03`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a quote
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Being prepared, not yet delivered
    Draft,
    /// Delivered to the client, awaiting an answer
    Sent,
    /// Client accepted this version
    Approved,
    /// Client declined this version
    Rejected,
    /// Validity date passed without an answer
    Expired,
}

impl QuoteStatus {
    /// The wire/storage spelling of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for the quote
    pub id: i64,
    /// Event this quote prices
    pub event_id: i64,
    /// Human-facing number, `QT-YYYYMMDD-<event>-<version>`
    pub quote_number: String,
    /// Version within the event, starting at 1
    pub version: u32,
    /// Summed cost components at issue time
    pub total_cost: Decimal,
    /// Profit margin applied, in percent
    pub profit_margin: Decimal,
    /// Price offered to the client
    pub total_price: Decimal,
    /// Last calendar date the offer stands
    pub valid_until: NaiveDate,
    /// Current lifecycle status
    pub status: QuoteStatus,
    /// When the quote was delivered to the client, if it was
    pub sent_at: Option<DateTime<Utc>>,
    /// When the client accepted, if they did
    pub approved_at: Option<DateTime<Utc>>,
    /// Free-form notes shown on the proposal
    pub notes: Option<String>,
}
