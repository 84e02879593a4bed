//! Shared test utilities for `buffet-core`.
//!
//! This module provides common helper functions for creating test entities
//! and stores with sensible defaults, so individual tests only spell out the
//! fields they actually care about.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::quote;
use crate::entities::{
    CardBrand, Company, CostCalculation, Event, EventKind, EventMenuLine, EventStatus,
    MenuCategory, MenuItem, PaymentMethod, Quote, QuoteStatus,
};
use crate::store::{CompanyStore, NewEvent, NewMenuItem, NewPaymentMethod};

/// Shorthand for a calendar date; the arguments must form a valid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shorthand for a time of day; the arguments must form a valid time.
pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Shorthand for a UTC timestamp; the arguments must form a valid instant.
pub fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// Creates a test company.
///
/// # Defaults
/// * `id`: 1 (every other test entity points here)
/// * `default_profit_margin`: 30%
/// * `max_events_per_day`: 2
pub fn create_test_company() -> Company {
    Company {
        id: 1,
        name: "Buffet Sabor & Arte".to_string(),
        email: Some("contato@saborearte.example".to_string()),
        phone: None,
        default_profit_margin: dec!(30),
        max_events_per_day: 2,
        is_active: true,
    }
}

/// Creates a test event on the standard fixture slot (2026-09-12, 18:00-23:00).
pub fn create_test_event(id: i64, status: EventStatus) -> Event {
    create_custom_event(id, date(2026, 9, 12), time(18, 0), time(23, 0), status)
}

/// Creates a test event with an explicit schedule.
///
/// # Defaults
/// * `company_id`: 1
/// * `guest_count`: 100
pub fn create_custom_event(
    id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: EventStatus,
) -> Event {
    Event {
        id,
        company_id: 1,
        title: format!("Event {id}"),
        kind: EventKind::Wedding,
        client_name: "Ana Silva".to_string(),
        date,
        start_time,
        end_time,
        guest_count: 100,
        venue: None,
        status,
        estimated_cost: None,
        final_price: None,
        notes: None,
    }
}

/// Creates a test menu item with the given per-person amounts.
pub fn create_test_menu_item(
    id: i64,
    cost_per_person: Decimal,
    price_per_person: Decimal,
) -> MenuItem {
    MenuItem {
        id,
        company_id: 1,
        name: format!("Item {id}"),
        category: MenuCategory::Main,
        description: None,
        cost_per_person,
        price_per_person,
        is_active: true,
    }
}

/// Creates a menu line tying an item to an event.
pub fn menu_line(event_id: i64, menu_item_id: i64, quantity: Decimal) -> EventMenuLine {
    EventMenuLine {
        event_id,
        menu_item_id,
        quantity,
    }
}

/// Creates a fully itemized test cost calculation.
///
/// The components total 1700 (500 food, 200 beverage, 800 staff,
/// 100 equipment, 50 transportation, 0 venue, 50 other) at a 30% margin,
/// giving a suggested price of 2210.00.
pub fn create_test_calculation(event_id: i64) -> CostCalculation {
    CostCalculation {
        event_id,
        food_cost: Some(dec!(500)),
        beverage_cost: Some(dec!(200)),
        staff_cost: Some(dec!(800)),
        equipment_cost: Some(dec!(100)),
        transportation_cost: Some(dec!(50)),
        venue_cost: Some(Decimal::ZERO),
        other_costs: Some(dec!(50)),
        profit_margin_percent: dec!(30),
    }
}

/// Creates a draft test quote numbered as if issued on 2026-09-12.
///
/// Amounts match [`create_test_calculation`]: cost 1700.00, margin 30%,
/// price 2210.00, valid until 2026-10-12.
pub fn create_test_quote(id: i64, event_id: i64, version: u32) -> Quote {
    Quote {
        id,
        event_id,
        quote_number: quote::quote_number(date(2026, 9, 12), event_id, version),
        version,
        total_cost: dec!(1700.00),
        profit_margin: dec!(30),
        total_price: dec!(2210.00),
        valid_until: date(2026, 10, 12),
        status: QuoteStatus::Draft,
        sent_at: None,
        approved_at: None,
        notes: None,
    }
}

/// Creates an active test payment method (Visa ending 4242).
pub fn create_test_payment_method(id: i64, is_default: bool) -> PaymentMethod {
    PaymentMethod {
        id,
        company_id: 1,
        card_brand: CardBrand::Visa,
        card_last_four: "4242".to_string(),
        card_exp_month: 12,
        card_exp_year: 2030,
        is_default,
        is_active: true,
    }
}

/// Creates an empty store owned by [`create_test_company`].
pub fn create_test_store() -> CompanyStore {
    CompanyStore::new(create_test_company())
}

/// Registration input for a confirmed 100-guest event at the given slot.
pub fn new_event_on(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> NewEvent {
    NewEvent {
        title: "Silva wedding".to_string(),
        kind: EventKind::Wedding,
        client_name: "Ana Silva".to_string(),
        date,
        start_time,
        end_time,
        guest_count: 100,
        venue: None,
        status: EventStatus::Confirmed,
        notes: None,
    }
}

/// Registration input for a main-course menu item.
pub fn new_menu_item(
    name: &str,
    cost_per_person: Decimal,
    price_per_person: Decimal,
) -> NewMenuItem {
    NewMenuItem {
        name: name.to_string(),
        category: MenuCategory::Main,
        description: None,
        cost_per_person,
        price_per_person,
    }
}

/// Registration input for a Visa card with the given last four digits.
pub fn new_payment_method(last_four: &str, make_default: bool) -> NewPaymentMethod {
    NewPaymentMethod {
        card_brand: CardBrand::Visa,
        card_last_four: last_four.to_string(),
        card_exp_month: 12,
        card_exp_year: 2030,
        make_default,
    }
}
