//! Error types shared across the crate.
//!
//! Variants fall into two broad classes: validation errors (the input itself
//! is unusable) and not-found errors (a referenced entity is absent from the
//! supplied data). Callers that need to distinguish the classes can use
//! [`Error::is_validation`] / [`Error::is_not_found`].

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::entities::QuoteStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Guest count must be a positive integer, got {count}")]
    InvalidGuestCount { count: u32 },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: Decimal },

    #[error("Invalid monetary amount: {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Profit margin must be between 0 and 100, got {margin}")]
    InvalidMargin { margin: Decimal },

    #[error("Menu item {id} not found")]
    MenuItemNotFound { id: i64 },

    #[error("Event {id} not found")]
    EventNotFound { id: i64 },

    #[error("Quote {id} not found")]
    QuoteNotFound { id: i64 },

    #[error("Payment method {id} not found")]
    PaymentMethodNotFound { id: i64 },

    #[error("Event {event_id} has no cost calculation")]
    MissingCostCalculation { event_id: i64 },

    #[error("An event already starts at {start_time} on {date}")]
    EventSlotTaken { date: NaiveDate, start_time: NaiveTime },

    #[error("Quote cannot move from '{from}' to '{to}'")]
    InvalidQuoteTransition { from: QuoteStatus, to: QuoteStatus },
}

impl Error {
    /// True for errors caused by unusable input values.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidGuestCount { .. }
                | Error::InvalidQuantity { .. }
                | Error::InvalidAmount { .. }
                | Error::InvalidMargin { .. }
                | Error::EventSlotTaken { .. }
                | Error::InvalidQuoteTransition { .. }
        )
    }

    /// True for errors caused by a reference to an absent entity.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::MenuItemNotFound { .. }
                | Error::EventNotFound { .. }
                | Error::QuoteNotFound { .. }
                | Error::PaymentMethodNotFound { .. }
                | Error::MissingCostCalculation { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
