//! Payment method entity - A stored card a company pays its bills with.
//!
//! At most one method per company is the default; switching the default
//! clears the flag from every other method.

use serde::{Deserialize, Serialize};

/// Card network
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Elo,
    Hipercard,
    Other,
}

/// Payment method record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier for the payment method
    pub id: i64,
    /// Owning company
    pub company_id: i64,
    /// Card network
    pub card_brand: CardBrand,
    /// Last four digits of the card number, for display
    pub card_last_four: String,
    /// Expiry month, 1-12
    pub card_exp_month: u8,
    /// Expiry year, four digits
    pub card_exp_year: u16,
    /// Whether this is the company's default method
    pub is_default: bool,
    /// Removed cards are kept for history but unusable
    pub is_active: bool,
}
