//! Company entity - The tenant that owns events, menus, quotes and payment
//! methods.
//!
//! Every other entity carries a `company_id`; computations never mix data
//! across companies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Company record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company
    pub id: i64,
    /// Trading name shown on quotes and reports
    pub name: String,
    /// Contact e-mail address, if registered
    pub email: Option<String>,
    /// Contact phone number, if registered
    pub phone: Option<String>,
    /// Profit margin (percent) applied when a cost calculation does not
    /// specify one
    pub default_profit_margin: Decimal,
    /// How many events this company can staff on a single day
    pub max_events_per_day: u32,
    /// Inactive companies keep their data but accept no new bookings
    pub is_active: bool,
}
