//! Event menu line entity - One menu item attached to one event.
//!
//! A given item appears at most once per event; re-adding it updates the
//! quantity instead of duplicating the line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event menu line record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMenuLine {
    /// Event this line belongs to
    pub event_id: i64,
    /// Menu item being served
    pub menu_item_id: i64,
    /// How many units per guest are planned (fractional quantities are
    /// legal, e.g. half a portion of dessert)
    pub quantity: Decimal,
}
