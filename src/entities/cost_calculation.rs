//! Cost calculation entity - The cost breakdown and pricing margin for one
//! event.
//!
//! Each event has at most one calculation. Cost components are optional:
//! an absent component simply contributes nothing to the total, so a partial
//! breakdown is still priceable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit margin (percent) used when none is given explicitly
pub const DEFAULT_PROFIT_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Cost calculation record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostCalculation {
    /// Event this calculation belongs to
    pub event_id: i64,
    /// Food and ingredients
    pub food_cost: Option<Decimal>,
    /// Drinks
    pub beverage_cost: Option<Decimal>,
    /// Waiters, cooks and other staff
    pub staff_cost: Option<Decimal>,
    /// Rented or depreciated equipment
    pub equipment_cost: Option<Decimal>,
    /// Transport of goods and crew
    pub transportation_cost: Option<Decimal>,
    /// Venue rental, when the company books it
    pub venue_cost: Option<Decimal>,
    /// Anything that fits nowhere else
    pub other_costs: Option<Decimal>,
    /// Profit margin to apply on top of the summed costs, in percent
    pub profit_margin_percent: Decimal,
}

impl Default for CostCalculation {
    fn default() -> Self {
        CostCalculation {
            event_id: 0,
            food_cost: None,
            beverage_cost: None,
            staff_cost: None,
            equipment_cost: None,
            transportation_cost: None,
            venue_cost: None,
            other_costs: None,
            profit_margin_percent: DEFAULT_PROFIT_MARGIN,
        }
    }
}
