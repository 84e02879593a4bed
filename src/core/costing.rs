//! Cost and price computation.
//!
//! All money math is exact base-10 [`Decimal`] arithmetic. The same
//! per-person formula backs both the quick estimate and the detailed totals:
//!
//! ```text
//! line total = per-person rate x guest count x quantity
//! ```
//!
//! Cost-calculation totals sum the seven cost components (absent components
//! count as zero) and apply the profit margin on top.

use rust_decimal::Decimal;

use crate::entities::{CostCalculation, EventMenuLine, MenuItem};
use crate::errors::{Error, Result};

/// Cost and price of a single menu line
#[derive(Debug, Clone, PartialEq)]
pub struct LineTotals {
    /// What serving this line costs the company
    pub total_cost: Decimal,
    /// What the client is charged for this line
    pub total_price: Decimal,
}

/// One priced line of an event menu, with the item identified for display
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLineTotals {
    /// Menu item the line refers to
    pub menu_item_id: i64,
    /// Item name at pricing time
    pub name: String,
    /// Ordered quantity
    pub quantity: Decimal,
    /// Cost to the company
    pub total_cost: Decimal,
    /// Price to the client
    pub total_price: Decimal,
}

/// A fully priced event menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTotals {
    /// Per-line breakdown, in input order
    pub lines: Vec<MenuLineTotals>,
    /// Sum of line costs
    pub total_cost: Decimal,
    /// Sum of line prices
    pub total_price: Decimal,
}

/// Prices a single menu line for an event.
///
/// # Arguments
/// * `item` - The menu item being served
/// * `guest_count` - Number of guests at the event
/// * `quantity` - Units per guest; zero is legal and yields zero totals
///
/// # Returns
/// Cost and price totals for the line
///
/// # Errors
/// * `Error::InvalidGuestCount` - `guest_count` is zero
/// * `Error::InvalidQuantity` - `quantity` is negative
pub fn line_totals(item: &MenuItem, guest_count: u32, quantity: Decimal) -> Result<LineTotals> {
    if guest_count == 0 {
        return Err(Error::InvalidGuestCount { count: guest_count });
    }
    if quantity < Decimal::ZERO {
        return Err(Error::InvalidQuantity { quantity });
    }

    let guests = Decimal::from(guest_count);
    Ok(LineTotals {
        total_cost: item.cost_per_person * guests * quantity,
        total_price: item.price_per_person * guests * quantity,
    })
}

/// Sums the cost components of a calculation.
///
/// Absent components contribute nothing, so a partially filled breakdown
/// still totals cleanly.
#[must_use]
pub fn aggregate_cost(calc: &CostCalculation) -> Decimal {
    [
        calc.food_cost,
        calc.beverage_cost,
        calc.staff_cost,
        calc.equipment_cost,
        calc.transportation_cost,
        calc.venue_cost,
        calc.other_costs,
    ]
    .into_iter()
    .flatten()
    .sum()
}

/// Price to ask for the event: summed costs plus the calculation's profit
/// margin.
///
/// A margin of zero returns the bare cost; the margin is a percentage, so
/// 30 means "cost plus 30% of cost".
#[must_use]
pub fn suggested_price(calc: &CostCalculation) -> Decimal {
    let total = aggregate_cost(calc);
    total + total * calc.profit_margin_percent / Decimal::ONE_HUNDRED
}

/// Estimates what serving an event's menu will cost the company.
///
/// Every line is resolved against `catalog` and priced with the per-person
/// formula. The estimate is all-or-nothing: any unknown item or invalid
/// quantity fails the whole computation rather than returning a partial sum.
///
/// # Arguments
/// * `guest_count` - Number of guests at the event
/// * `lines` - The event's menu lines
/// * `catalog` - Menu items the lines may refer to
///
/// # Returns
/// Total estimated cost; zero for an empty menu
///
/// # Errors
/// * `Error::InvalidGuestCount` - `guest_count` is zero
/// * `Error::InvalidQuantity` - A line has a negative quantity
/// * `Error::MenuItemNotFound` - A line refers to an id absent from `catalog`
pub fn estimate_event_cost(
    guest_count: u32,
    lines: &[EventMenuLine],
    catalog: &[MenuItem],
) -> Result<Decimal> {
    if guest_count == 0 {
        return Err(Error::InvalidGuestCount { count: guest_count });
    }

    let guests = Decimal::from(guest_count);
    let mut total = Decimal::ZERO;
    for line in lines {
        if line.quantity < Decimal::ZERO {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        let item = catalog
            .iter()
            .find(|item| item.id == line.menu_item_id)
            .ok_or(Error::MenuItemNotFound {
                id: line.menu_item_id,
            })?;
        total += item.cost_per_person * guests * line.quantity;
    }
    Ok(total)
}

/// Prices every line of an event menu and totals the result.
///
/// Same resolution and validation rules as [`estimate_event_cost`], but
/// returns the full per-line breakdown with client-facing prices alongside
/// costs.
///
/// # Arguments
/// * `guest_count` - Number of guests at the event
/// * `lines` - The event's menu lines
/// * `catalog` - Menu items the lines may refer to
///
/// # Errors
/// * `Error::InvalidGuestCount` - `guest_count` is zero
/// * `Error::InvalidQuantity` - A line has a negative quantity
/// * `Error::MenuItemNotFound` - A line refers to an id absent from `catalog`
pub fn event_menu_totals(
    guest_count: u32,
    lines: &[EventMenuLine],
    catalog: &[MenuItem],
) -> Result<MenuTotals> {
    if guest_count == 0 {
        return Err(Error::InvalidGuestCount { count: guest_count });
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut total_cost = Decimal::ZERO;
    let mut total_price = Decimal::ZERO;
    for line in lines {
        let item = catalog
            .iter()
            .find(|item| item.id == line.menu_item_id)
            .ok_or(Error::MenuItemNotFound {
                id: line.menu_item_id,
            })?;
        let totals = line_totals(item, guest_count, line.quantity)?;
        total_cost += totals.total_cost;
        total_price += totals.total_price;
        priced.push(MenuLineTotals {
            menu_item_id: item.id,
            name: item.name.clone(),
            quantity: line.quantity,
            total_cost: totals.total_cost,
            total_price: totals.total_price,
        });
    }

    Ok(MenuTotals {
        lines: priced,
        total_cost,
        total_price,
    })
}

/// Money left after covering costs at the agreed price.
#[must_use]
pub fn projected_profit(total_cost: Decimal, final_price: Decimal) -> Decimal {
    final_price - total_cost
}

/// Margin actually achieved, as a percentage of the agreed price.
///
/// Returns zero when `final_price` is not positive; a margin against a zero
/// or negative sale price is meaningless.
#[must_use]
pub fn realized_margin(total_cost: Decimal, final_price: Decimal) -> Decimal {
    if final_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    (final_price - total_cost) / final_price * Decimal::ONE_HUNDRED
}
