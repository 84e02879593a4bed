//! Menu item entity - A dish or drink a company can serve, priced per
//! person.
//!
//! Both the internal cost and the client-facing price are stored per person;
//! totals are derived from an event's guest count and the ordered quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu section an item belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Appetizer,
    Main,
    Side,
    Dessert,
    Beverage,
    Other,
}

/// Menu item record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier for the menu item
    pub id: i64,
    /// Owning company
    pub company_id: i64,
    /// Name as printed on proposals (e.g., "Feijoada completa")
    pub name: String,
    /// Menu section
    pub category: MenuCategory,
    /// Longer description for proposals, if any
    pub description: Option<String>,
    /// What one serving costs the company, per guest
    pub cost_per_person: Decimal,
    /// What the client is charged, per guest
    pub price_per_person: Decimal,
    /// Retired items stay referenced by past events but are hidden from new
    /// menus
    pub is_active: bool,
}
