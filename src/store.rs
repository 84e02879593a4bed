//! In-memory company store.
//!
//! Stands in for the persistence layer: one store holds one company's
//! records, assigns ids, and guards the write-side invariants (unique
//! calendar slots, one cost calculation per event, margin bounds, a single
//! default payment method). Reads hand out snapshots for the pure
//! computation functions in [`crate::core`]; the store itself never reaches
//! for the clock, so every time-dependent operation takes its reference
//! date explicitly.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchedulingPolicy;
use crate::core::costing::{self, MenuTotals};
use crate::core::quote as quote_logic;
use crate::core::report::{self, CompanyReport};
use crate::core::{conflict, schedule};
use crate::entities::{
    CardBrand, Company, CostCalculation, Event, EventKind, EventMenuLine, EventStatus, MenuCategory,
    MenuItem, PaymentMethod, Quote, QuoteStatus,
};
use crate::errors::{Error, Result};

/// Everything needed to register a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Calendar title
    pub title: String,
    /// Kind of engagement
    pub kind: EventKind,
    /// Hiring client
    pub client_name: String,
    /// Event date
    pub date: NaiveDate,
    /// Service start
    pub start_time: NaiveTime,
    /// Service end; at or before `start_time` means past midnight
    pub end_time: NaiveTime,
    /// Expected guests, must be positive
    pub guest_count: u32,
    /// Venue, if known
    pub venue: Option<String>,
    /// Initial lifecycle status
    pub status: EventStatus,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Everything needed to register a new menu item
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Name as printed on proposals
    pub name: String,
    /// Menu section
    pub category: MenuCategory,
    /// Longer description, if any
    pub description: Option<String>,
    /// Cost to the company per guest, non-negative
    pub cost_per_person: Decimal,
    /// Price to the client per guest, non-negative
    pub price_per_person: Decimal,
}

/// Everything needed to register a new payment method
#[derive(Debug, Clone)]
pub struct NewPaymentMethod {
    /// Card network
    pub card_brand: CardBrand,
    /// Last four digits, for display
    pub card_last_four: String,
    /// Expiry month, 1-12
    pub card_exp_month: u8,
    /// Expiry year, four digits
    pub card_exp_year: u16,
    /// Make this the company default; clears the flag elsewhere
    pub make_default: bool,
}

/// Serialized form of a company's records, as read from a book file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBook {
    /// The company the records belong to
    pub company: Company,
    /// Events on the calendar
    #[serde(default)]
    pub events: Vec<Event>,
    /// The menu catalog
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    /// Menu lines attached to events
    #[serde(default)]
    pub menu_lines: Vec<EventMenuLine>,
    /// Cost calculations, at most one per event
    #[serde(default)]
    pub cost_calculations: Vec<CostCalculation>,
    /// Issued quotes
    #[serde(default)]
    pub quotes: Vec<Quote>,
    /// Stored cards
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

/// In-memory records of a single company
#[derive(Debug, Clone)]
pub struct CompanyStore {
    company: Company,
    events: Vec<Event>,
    menu_items: Vec<MenuItem>,
    menu_lines: Vec<EventMenuLine>,
    cost_calculations: Vec<CostCalculation>,
    quotes: Vec<Quote>,
    payment_methods: Vec<PaymentMethod>,
    next_event_id: i64,
    next_menu_item_id: i64,
    next_quote_id: i64,
    next_payment_method_id: i64,
}

impl CompanyStore {
    /// Creates an empty store for `company`.
    #[must_use]
    pub fn new(company: Company) -> Self {
        CompanyStore {
            company,
            events: Vec::new(),
            menu_items: Vec::new(),
            menu_lines: Vec::new(),
            cost_calculations: Vec::new(),
            quotes: Vec::new(),
            payment_methods: Vec::new(),
            next_event_id: 1,
            next_menu_item_id: 1,
            next_quote_id: 1,
            next_payment_method_id: 1,
        }
    }

    /// Builds a store from a deserialized book, checking every write-side
    /// invariant the book could violate.
    ///
    /// # Errors
    /// Any validation error a live mutation would raise, plus
    /// `Error::Config` for structural problems (duplicate ids, foreign
    /// company ids, duplicate lines, several default payment methods).
    pub fn from_book(book: CompanyBook) -> Result<Self> {
        let company_id = book.company.id;

        check_unique_ids("Event", book.events.iter().map(|event| event.id))?;
        check_unique_ids("Menu item", book.menu_items.iter().map(|item| item.id))?;
        check_unique_ids("Quote", book.quotes.iter().map(|quote| quote.id))?;
        check_unique_ids(
            "Payment method",
            book.payment_methods.iter().map(|method| method.id),
        )?;

        for event in &book.events {
            if event.company_id != company_id {
                return Err(Error::Config {
                    message: format!(
                        "Event {} belongs to company {}, not {company_id}",
                        event.id, event.company_id
                    ),
                });
            }
            if event.guest_count == 0 {
                return Err(Error::InvalidGuestCount {
                    count: event.guest_count,
                });
            }
            if book
                .events
                .iter()
                .any(|other| other.id != event.id && slot_taken(other, event.date, event.start_time))
            {
                return Err(Error::EventSlotTaken {
                    date: event.date,
                    start_time: event.start_time,
                });
            }
        }

        for item in &book.menu_items {
            if item.company_id != company_id {
                return Err(Error::Config {
                    message: format!(
                        "Menu item {} belongs to company {}, not {company_id}",
                        item.id, item.company_id
                    ),
                });
            }
            check_amount(item.cost_per_person)?;
            check_amount(item.price_per_person)?;
        }

        for line in &book.menu_lines {
            if !book.events.iter().any(|event| event.id == line.event_id) {
                return Err(Error::EventNotFound { id: line.event_id });
            }
            if !book.menu_items.iter().any(|item| item.id == line.menu_item_id) {
                return Err(Error::MenuItemNotFound {
                    id: line.menu_item_id,
                });
            }
            if line.quantity <= Decimal::ZERO {
                return Err(Error::InvalidQuantity {
                    quantity: line.quantity,
                });
            }
            let copies = book
                .menu_lines
                .iter()
                .filter(|other| {
                    other.event_id == line.event_id && other.menu_item_id == line.menu_item_id
                })
                .count();
            if copies > 1 {
                return Err(Error::Config {
                    message: format!(
                        "Menu item {} appears {copies} times on event {}",
                        line.menu_item_id, line.event_id
                    ),
                });
            }
        }

        for calc in &book.cost_calculations {
            if !book.events.iter().any(|event| event.id == calc.event_id) {
                return Err(Error::EventNotFound { id: calc.event_id });
            }
            check_calculation(calc)?;
            let copies = book
                .cost_calculations
                .iter()
                .filter(|other| other.event_id == calc.event_id)
                .count();
            if copies > 1 {
                return Err(Error::Config {
                    message: format!("Event {} has {copies} cost calculations", calc.event_id),
                });
            }
        }

        for quote in &book.quotes {
            if !book.events.iter().any(|event| event.id == quote.event_id) {
                return Err(Error::EventNotFound { id: quote.event_id });
            }
            check_amount(quote.total_cost)?;
            check_amount(quote.total_price)?;
            let copies = book
                .quotes
                .iter()
                .filter(|other| {
                    other.event_id == quote.event_id && other.version == quote.version
                })
                .count();
            if copies > 1 {
                return Err(Error::Config {
                    message: format!(
                        "Quote version {} appears {copies} times on event {}",
                        quote.version, quote.event_id
                    ),
                });
            }
        }

        for method in &book.payment_methods {
            if method.company_id != company_id {
                return Err(Error::Config {
                    message: format!(
                        "Payment method {} belongs to company {}, not {company_id}",
                        method.id, method.company_id
                    ),
                });
            }
        }
        let defaults = book
            .payment_methods
            .iter()
            .filter(|method| method.is_default)
            .count();
        if defaults > 1 {
            return Err(Error::Config {
                message: format!("{defaults} payment methods are marked default"),
            });
        }

        let mut store = CompanyStore::new(book.company);
        store.next_event_id = next_id(book.events.iter().map(|event| event.id));
        store.next_menu_item_id = next_id(book.menu_items.iter().map(|item| item.id));
        store.next_quote_id = next_id(book.quotes.iter().map(|quote| quote.id));
        store.next_payment_method_id =
            next_id(book.payment_methods.iter().map(|method| method.id));
        store.events = book.events;
        store.menu_items = book.menu_items;
        store.menu_lines = book.menu_lines;
        store.cost_calculations = book.cost_calculations;
        store.quotes = book.quotes;
        store.payment_methods = book.payment_methods;

        debug!(
            "Loaded book for company {}: {} events, {} menu items, {} quotes",
            store.company.id,
            store.events.len(),
            store.menu_items.len(),
            store.quotes.len()
        );
        Ok(store)
    }

    /// The company the records belong to
    #[must_use]
    pub fn company(&self) -> &Company {
        &self.company
    }

    /// All events, in insertion order
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All menu items, active or not
    #[must_use]
    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    /// Menu items currently offered to clients
    #[must_use]
    pub fn active_menu_items(&self) -> Vec<&MenuItem> {
        self.menu_items.iter().filter(|item| item.is_active).collect()
    }

    /// All issued quotes, in insertion order
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// All stored cards
    #[must_use]
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Looks up an event by id.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    pub fn event(&self, id: i64) -> Result<&Event> {
        self.events
            .iter()
            .find(|event| event.id == id)
            .ok_or(Error::EventNotFound { id })
    }

    /// Looks up a menu item by id.
    ///
    /// # Errors
    /// * `Error::MenuItemNotFound` - No item has this id
    pub fn menu_item(&self, id: i64) -> Result<&MenuItem> {
        self.menu_items
            .iter()
            .find(|item| item.id == id)
            .ok_or(Error::MenuItemNotFound { id })
    }

    /// Looks up a quote by id.
    ///
    /// # Errors
    /// * `Error::QuoteNotFound` - No quote has this id
    pub fn quote(&self, id: i64) -> Result<&Quote> {
        self.quotes
            .iter()
            .find(|quote| quote.id == id)
            .ok_or(Error::QuoteNotFound { id })
    }

    /// Registers a new event and assigns its id.
    ///
    /// The calendar slot (date plus exact start time) must be free; mere
    /// overlap with another event does not block creation and is surfaced
    /// separately by [`CompanyStore::check_event_conflict`].
    ///
    /// # Errors
    /// * `Error::InvalidGuestCount` - Guest count is zero
    /// * `Error::EventSlotTaken` - Another event already starts at the same
    ///   date and time
    pub fn add_event(&mut self, new: NewEvent) -> Result<Event> {
        if new.guest_count == 0 {
            return Err(Error::InvalidGuestCount {
                count: new.guest_count,
            });
        }
        if self
            .events
            .iter()
            .any(|other| slot_taken(other, new.date, new.start_time))
        {
            return Err(Error::EventSlotTaken {
                date: new.date,
                start_time: new.start_time,
            });
        }

        let event = Event {
            id: self.next_event_id,
            company_id: self.company.id,
            title: new.title,
            kind: new.kind,
            client_name: new.client_name,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            guest_count: new.guest_count,
            venue: new.venue,
            status: new.status,
            estimated_cost: None,
            final_price: None,
            notes: new.notes,
        };
        self.next_event_id += 1;
        debug!("Created event {} on {}", event.id, event.date);
        self.events.push(event.clone());
        Ok(event)
    }

    /// Moves an event to a new lifecycle status.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    pub fn set_event_status(&mut self, id: i64, status: EventStatus) -> Result<Event> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(Error::EventNotFound { id })?;
        debug!("Event {} status {} -> {}", id, event.status, status);
        event.status = status;
        Ok(event.clone())
    }

    /// Records the price actually agreed with the client.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::InvalidAmount` - The price is negative
    pub fn record_final_price(&mut self, id: i64, price: Decimal) -> Result<Event> {
        check_amount(price)?;
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(Error::EventNotFound { id })?;
        event.final_price = Some(price);
        debug!("Event {} closed at {}", id, price);
        Ok(event.clone())
    }

    /// Registers a new menu item and assigns its id.
    ///
    /// # Errors
    /// * `Error::InvalidAmount` - Cost or price per person is negative
    pub fn add_menu_item(&mut self, new: NewMenuItem) -> Result<MenuItem> {
        check_amount(new.cost_per_person)?;
        check_amount(new.price_per_person)?;

        let item = MenuItem {
            id: self.next_menu_item_id,
            company_id: self.company.id,
            name: new.name,
            category: new.category,
            description: new.description,
            cost_per_person: new.cost_per_person,
            price_per_person: new.price_per_person,
            is_active: true,
        };
        self.next_menu_item_id += 1;
        debug!("Created menu item {} ({})", item.id, item.name);
        self.menu_items.push(item.clone());
        Ok(item)
    }

    /// Retires a menu item from the active catalog.
    ///
    /// Existing event menus keep referring to it and still price correctly;
    /// it just stops being offered for new menus.
    ///
    /// # Errors
    /// * `Error::MenuItemNotFound` - No item has this id
    pub fn retire_menu_item(&mut self, id: i64) -> Result<MenuItem> {
        let item = self
            .menu_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(Error::MenuItemNotFound { id })?;
        item.is_active = false;
        debug!("Retired menu item {}", id);
        Ok(item.clone())
    }

    /// Menu lines attached to an event, in insertion order
    #[must_use]
    pub fn menu_lines_for(&self, event_id: i64) -> Vec<&EventMenuLine> {
        self.menu_lines
            .iter()
            .filter(|line| line.event_id == event_id)
            .collect()
    }

    /// Puts a menu item on an event's menu, or updates its quantity if it
    /// is already there.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::MenuItemNotFound` - No item has this id
    /// * `Error::InvalidQuantity` - Quantity is zero or negative; remove the
    ///   line instead of zeroing it
    pub fn set_menu_line(
        &mut self,
        event_id: i64,
        menu_item_id: i64,
        quantity: Decimal,
    ) -> Result<EventMenuLine> {
        self.event(event_id)?;
        self.menu_item(menu_item_id)?;
        if quantity <= Decimal::ZERO {
            return Err(Error::InvalidQuantity { quantity });
        }

        if let Some(line) = self
            .menu_lines
            .iter_mut()
            .find(|line| line.event_id == event_id && line.menu_item_id == menu_item_id)
        {
            line.quantity = quantity;
            debug!(
                "Updated menu line (event {}, item {}) to quantity {}",
                event_id, menu_item_id, quantity
            );
            return Ok(line.clone());
        }

        let line = EventMenuLine {
            event_id,
            menu_item_id,
            quantity,
        };
        debug!(
            "Added menu line (event {}, item {}) quantity {}",
            event_id, menu_item_id, quantity
        );
        self.menu_lines.push(line.clone());
        Ok(line)
    }

    /// Takes a menu item off an event's menu.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::MenuItemNotFound` - The item is not on this event's menu
    pub fn remove_menu_line(&mut self, event_id: i64, menu_item_id: i64) -> Result<()> {
        self.event(event_id)?;
        let before = self.menu_lines.len();
        self.menu_lines
            .retain(|line| !(line.event_id == event_id && line.menu_item_id == menu_item_id));
        if self.menu_lines.len() == before {
            return Err(Error::MenuItemNotFound { id: menu_item_id });
        }
        debug!("Removed menu line (event {}, item {})", event_id, menu_item_id);
        Ok(())
    }

    /// Prices an event's full menu.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * Any error from [`costing::event_menu_totals`]
    pub fn event_menu_totals(&self, event_id: i64) -> Result<MenuTotals> {
        let event = self.event(event_id)?;
        let lines: Vec<EventMenuLine> = self
            .menu_lines_for(event_id)
            .into_iter()
            .cloned()
            .collect();
        costing::event_menu_totals(event.guest_count, &lines, &self.menu_items)
    }

    /// Re-estimates what serving an event's menu will cost and stores the
    /// result on the event.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * Any error from [`costing::estimate_event_cost`]; the stored
    ///   estimate is left untouched on failure
    pub fn refresh_estimated_cost(&mut self, event_id: i64) -> Result<Decimal> {
        let event = self.event(event_id)?;
        let lines: Vec<EventMenuLine> = self
            .menu_lines_for(event_id)
            .into_iter()
            .cloned()
            .collect();
        let estimate = costing::estimate_event_cost(event.guest_count, &lines, &self.menu_items)?;

        if let Some(event) = self.events.iter_mut().find(|event| event.id == event_id) {
            event.estimated_cost = Some(estimate);
        }
        debug!("Event {} estimated cost {}", event_id, estimate);
        Ok(estimate)
    }

    /// Creates or replaces the cost calculation for an event.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::InvalidMargin` - Margin outside 0-100
    /// * `Error::InvalidAmount` - A cost component is negative
    pub fn upsert_cost_calculation(&mut self, calc: CostCalculation) -> Result<CostCalculation> {
        self.event(calc.event_id)?;
        check_calculation(&calc)?;

        if let Some(existing) = self
            .cost_calculations
            .iter_mut()
            .find(|existing| existing.event_id == calc.event_id)
        {
            *existing = calc.clone();
            debug!("Replaced cost calculation for event {}", calc.event_id);
        } else {
            debug!("Created cost calculation for event {}", calc.event_id);
            self.cost_calculations.push(calc.clone());
        }
        Ok(calc)
    }

    /// The cost calculation for an event.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::MissingCostCalculation` - The event has none yet
    pub fn cost_calculation(&self, event_id: i64) -> Result<&CostCalculation> {
        self.event(event_id)?;
        self.cost_calculations
            .iter()
            .find(|calc| calc.event_id == event_id)
            .ok_or(Error::MissingCostCalculation { event_id })
    }

    /// Quotes issued for an event, in insertion order
    #[must_use]
    pub fn quotes_for_event(&self, event_id: i64) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|quote| quote.event_id == event_id)
            .collect()
    }

    /// Issues a new draft quote for an event from its cost calculation.
    ///
    /// The version is one greater than the event's highest existing version;
    /// amounts are frozen from the calculation at issue time. With no
    /// `valid_until`, the offer stands for
    /// [`quote_logic::DEFAULT_VALIDITY_DAYS`] days.
    ///
    /// # Arguments
    /// * `event_id` - Event being priced
    /// * `valid_until` - Last date the offer stands, or None for the default
    /// * `notes` - Free-form notes for the proposal
    /// * `today` - Issue date, encoded into the quote number
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    /// * `Error::MissingCostCalculation` - The event has no calculation to
    ///   freeze
    pub fn create_quote(
        &mut self,
        event_id: i64,
        valid_until: Option<NaiveDate>,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Quote> {
        let calc = self.cost_calculation(event_id)?.clone();
        let valid_until = valid_until.unwrap_or_else(|| quote_logic::default_valid_until(today));

        let quote = quote_logic::draft_quote(
            self.next_quote_id,
            event_id,
            &self.quotes,
            &calc,
            valid_until,
            notes,
            today,
        );
        self.next_quote_id += 1;
        debug!("Issued quote {} ({})", quote.id, quote.quote_number);
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Marks a draft quote as sent.
    ///
    /// # Errors
    /// * `Error::QuoteNotFound` - No quote has this id
    /// * `Error::InvalidQuoteTransition` - The quote is not a draft
    pub fn send_quote(&mut self, id: i64, now: DateTime<Utc>) -> Result<Quote> {
        let quote = self
            .quotes
            .iter_mut()
            .find(|quote| quote.id == id)
            .ok_or(Error::QuoteNotFound { id })?;
        quote_logic::send(quote, now)?;
        debug!("Sent quote {}", id);
        Ok(quote.clone())
    }

    /// Marks a sent quote as approved.
    ///
    /// # Errors
    /// * `Error::QuoteNotFound` - No quote has this id
    /// * `Error::InvalidQuoteTransition` - The quote was never sent or was
    ///   already answered
    pub fn approve_quote(&mut self, id: i64, now: DateTime<Utc>) -> Result<Quote> {
        let quote = self
            .quotes
            .iter_mut()
            .find(|quote| quote.id == id)
            .ok_or(Error::QuoteNotFound { id })?;
        quote_logic::approve(quote, now)?;
        debug!("Approved quote {}", id);
        Ok(quote.clone())
    }

    /// Marks a sent quote as rejected.
    ///
    /// # Errors
    /// * `Error::QuoteNotFound` - No quote has this id
    /// * `Error::InvalidQuoteTransition` - The quote was never sent or was
    ///   already answered
    pub fn reject_quote(&mut self, id: i64) -> Result<Quote> {
        let quote = self
            .quotes
            .iter_mut()
            .find(|quote| quote.id == id)
            .ok_or(Error::QuoteNotFound { id })?;
        quote_logic::reject(quote)?;
        debug!("Rejected quote {}", id);
        Ok(quote.clone())
    }

    /// Marks every sent quote whose validity date has passed as expired.
    ///
    /// # Returns
    /// How many quotes were expired
    pub fn expire_stale_quotes(&mut self, today: NaiveDate) -> usize {
        let mut expired = 0;
        for quote in &mut self.quotes {
            if quote.status == QuoteStatus::Sent && quote.valid_until < today {
                quote.status = QuoteStatus::Expired;
                expired += 1;
            }
        }
        if expired > 0 {
            debug!("Expired {} stale quotes", expired);
        }
        expired
    }

    /// Registers a new card and assigns its id.
    ///
    /// With `make_default` set, every other card loses its default flag in
    /// the same operation.
    ///
    /// # Errors
    /// * `Error::Config` - Expiry month outside 1-12
    pub fn add_payment_method(&mut self, new: NewPaymentMethod) -> Result<PaymentMethod> {
        if new.card_exp_month == 0 || new.card_exp_month > 12 {
            return Err(Error::Config {
                message: format!("Expiry month must be 1-12, got {}", new.card_exp_month),
            });
        }

        if new.make_default {
            for method in &mut self.payment_methods {
                method.is_default = false;
            }
        }

        let method = PaymentMethod {
            id: self.next_payment_method_id,
            company_id: self.company.id,
            card_brand: new.card_brand,
            card_last_four: new.card_last_four,
            card_exp_month: new.card_exp_month,
            card_exp_year: new.card_exp_year,
            is_default: new.make_default,
            is_active: true,
        };
        self.next_payment_method_id += 1;
        debug!("Added payment method {}", method.id);
        self.payment_methods.push(method.clone());
        Ok(method)
    }

    /// Makes one active card the company default.
    ///
    /// Read-modify-write over the whole collection: every card's flag is
    /// cleared, then exactly one is set, so the one-default invariant holds
    /// whatever state the collection was in.
    ///
    /// # Errors
    /// * `Error::PaymentMethodNotFound` - No active card has this id
    pub fn set_default_payment_method(&mut self, id: i64) -> Result<PaymentMethod> {
        if !self
            .payment_methods
            .iter()
            .any(|method| method.id == id && method.is_active)
        {
            return Err(Error::PaymentMethodNotFound { id });
        }

        let mut chosen = None;
        for method in &mut self.payment_methods {
            method.is_default = method.id == id;
            if method.is_default {
                chosen = Some(method.clone());
            }
        }
        debug!("Payment method {} is now the default", id);
        chosen.ok_or(Error::PaymentMethodNotFound { id })
    }

    /// Deactivates a card. A removed default leaves the company with no
    /// default until another card is chosen.
    ///
    /// # Errors
    /// * `Error::PaymentMethodNotFound` - No active card has this id
    pub fn remove_payment_method(&mut self, id: i64) -> Result<PaymentMethod> {
        let method = self
            .payment_methods
            .iter_mut()
            .find(|method| method.id == id && method.is_active)
            .ok_or(Error::PaymentMethodNotFound { id })?;
        method.is_active = false;
        method.is_default = false;
        debug!("Removed payment method {}", id);
        Ok(method.clone())
    }

    /// The company's default card, if one is set
    #[must_use]
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods
            .iter()
            .find(|method| method.is_default && method.is_active)
    }

    /// Whether an event collides with another slot-holding event.
    ///
    /// # Errors
    /// * `Error::EventNotFound` - No event has this id
    pub fn check_event_conflict(&self, event_id: i64, policy: &SchedulingPolicy) -> Result<bool> {
        let event = self.event(event_id)?;
        Ok(conflict::is_conflicting(event, &self.events, policy))
    }

    /// Ids of every slot-holding event that collides with another
    #[must_use]
    pub fn conflict_scan(&self, policy: &SchedulingPolicy) -> Vec<i64> {
        conflict::find_conflicts(&self.events, policy)
    }

    /// Whether `date` already carries as many slot-holding events as the
    /// company can staff
    #[must_use]
    pub fn day_at_capacity(&self, date: NaiveDate, policy: &SchedulingPolicy) -> bool {
        schedule::day_at_capacity(&self.events, date, self.company.max_events_per_day, policy)
    }

    /// Builds the dashboard report over the current records
    #[must_use]
    pub fn report(&self, policy: &SchedulingPolicy, today: NaiveDate) -> CompanyReport {
        report::company_report(&self.events, &self.quotes, policy, today)
    }
}

fn slot_taken(other: &Event, date: NaiveDate, start_time: NaiveTime) -> bool {
    other.date == date && other.start_time == start_time
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn check_calculation(calc: &CostCalculation) -> Result<()> {
    if calc.profit_margin_percent < Decimal::ZERO
        || calc.profit_margin_percent > Decimal::ONE_HUNDRED
    {
        return Err(Error::InvalidMargin {
            margin: calc.profit_margin_percent,
        });
    }
    for component in [
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
    {
        check_amount(component)?;
    }
    Ok(())
}

fn check_unique_ids(kind: &str, ids: impl Iterator<Item = i64>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::Config {
                message: format!("{kind} id {id} appears more than once"),
            });
        }
    }
    Ok(())
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_event_assigns_ids_and_rejects_taken_slot() -> Result<()> {
        let mut store = create_test_store();

        let first = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let second = store.add_event(new_event_on(date(2026, 9, 12), time(8, 0), time(12, 0)))?;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let clash = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(20, 0)));
        assert!(matches!(clash, Err(Error::EventSlotTaken { .. })));

        Ok(())
    }

    #[test]
    fn test_add_event_rejects_zero_guests() {
        let mut store = create_test_store();
        let mut new = new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0));
        new.guest_count = 0;

        let result = store.add_event(new);

        assert!(matches!(result, Err(Error::InvalidGuestCount { count: 0 })));
    }

    #[test]
    fn test_overlap_alone_does_not_block_creation() -> Result<()> {
        let mut store = create_test_store();
        store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;

        // Different start time, overlapping window: stored, but flagged
        let overlapping =
            store.add_event(new_event_on(date(2026, 9, 12), time(19, 0), time(22, 0)))?;

        let policy = SchedulingPolicy::default();
        assert!(store.check_event_conflict(overlapping.id, &policy)?);
        assert_eq!(store.conflict_scan(&policy), vec![1, 2]);

        Ok(())
    }

    #[test]
    fn test_set_event_status_and_missing_event() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;

        let updated = store.set_event_status(event.id, EventStatus::Completed)?;
        assert_eq!(updated.status, EventStatus::Completed);

        let missing = store.set_event_status(99, EventStatus::Completed);
        assert!(matches!(missing, Err(Error::EventNotFound { id: 99 })));

        Ok(())
    }

    #[test]
    fn test_menu_line_upsert_and_removal() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let item = store.add_menu_item(new_menu_item("Feijoada", dec!(10), dec!(25)))?;

        store.set_menu_line(event.id, item.id, dec!(1))?;
        let updated = store.set_menu_line(event.id, item.id, dec!(2))?;
        assert_eq!(updated.quantity, dec!(2));
        assert_eq!(store.menu_lines_for(event.id).len(), 1);

        let zero = store.set_menu_line(event.id, item.id, Decimal::ZERO);
        assert!(matches!(zero, Err(Error::InvalidQuantity { .. })));

        store.remove_menu_line(event.id, item.id)?;
        assert!(store.menu_lines_for(event.id).is_empty());

        let gone = store.remove_menu_line(event.id, item.id);
        assert!(matches!(gone, Err(Error::MenuItemNotFound { .. })));

        Ok(())
    }

    #[test]
    fn test_refresh_estimated_cost_persists_on_event() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let feijoada = store.add_menu_item(new_menu_item("Feijoada", dec!(10), dec!(25)))?;
        let juice = store.add_menu_item(new_menu_item("Juice", dec!(4.50), dec!(12)))?;
        store.set_menu_line(event.id, feijoada.id, dec!(1))?;
        store.set_menu_line(event.id, juice.id, dec!(2))?;

        // 100 guests: 10*100*1 + 4.50*100*2 = 1900
        let estimate = store.refresh_estimated_cost(event.id)?;

        assert_eq!(estimate, dec!(1900.00));
        assert_eq!(store.event(event.id)?.estimated_cost, Some(dec!(1900.00)));

        Ok(())
    }

    #[test]
    fn test_retired_item_still_prices_existing_menus() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let item = store.add_menu_item(new_menu_item("Feijoada", dec!(10), dec!(25)))?;
        store.set_menu_line(event.id, item.id, dec!(1))?;

        store.retire_menu_item(item.id)?;

        assert!(store.active_menu_items().is_empty());
        assert_eq!(store.refresh_estimated_cost(event.id)?, dec!(1000));

        Ok(())
    }

    #[test]
    fn test_cost_calculation_upsert_replaces() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;

        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        let replacement = CostCalculation {
            event_id: event.id,
            food_cost: Some(dec!(900)),
            ..CostCalculation::default()
        };
        store.upsert_cost_calculation(replacement)?;

        let stored = store.cost_calculation(event.id)?;
        assert_eq!(stored.food_cost, Some(dec!(900)));
        assert_eq!(stored.beverage_cost, None);

        Ok(())
    }

    #[test]
    fn test_cost_calculation_validation() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;

        let high_margin = CostCalculation {
            event_id: event.id,
            profit_margin_percent: dec!(101),
            ..CostCalculation::default()
        };
        assert!(matches!(
            store.upsert_cost_calculation(high_margin),
            Err(Error::InvalidMargin { .. })
        ));

        let negative_component = CostCalculation {
            event_id: event.id,
            staff_cost: Some(dec!(-1)),
            ..CostCalculation::default()
        };
        assert!(matches!(
            store.upsert_cost_calculation(negative_component),
            Err(Error::InvalidAmount { .. })
        ));

        let orphan = create_test_calculation(99);
        assert!(matches!(
            store.upsert_cost_calculation(orphan),
            Err(Error::EventNotFound { id: 99 })
        ));

        Ok(())
    }

    #[test]
    fn test_create_quote_requires_calculation() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;

        let premature = store.create_quote(event.id, None, None, date(2026, 9, 12));
        assert!(matches!(
            premature,
            Err(Error::MissingCostCalculation { event_id: 1 })
        ));

        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        let quote = store.create_quote(event.id, None, None, date(2026, 9, 12))?;

        assert_eq!(quote.version, 1);
        assert_eq!(quote.quote_number, "QT-20260912-0001-01");
        assert_eq!(quote.total_cost, dec!(1700.00));
        assert_eq!(quote.total_price, dec!(2210.00));
        assert_eq!(quote.valid_until, date(2026, 10, 12));

        Ok(())
    }

    #[test]
    fn test_quote_versions_stay_dense_per_event() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let other = store.add_event(new_event_on(date(2026, 9, 13), time(18, 0), time(23, 0)))?;
        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        store.upsert_cost_calculation(create_test_calculation(other.id))?;

        let v1 = store.create_quote(event.id, None, None, date(2026, 9, 12))?;
        let v2 = store.create_quote(event.id, None, None, date(2026, 9, 13))?;
        let other_v1 = store.create_quote(other.id, None, None, date(2026, 9, 13))?;

        assert_eq!(v1.version, 1);
        assert_eq!(v2.version, 2);
        assert_eq!(other_v1.version, 1);

        Ok(())
    }

    #[test]
    fn test_quote_lifecycle_through_store() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        let quote = store.create_quote(event.id, None, None, date(2026, 9, 12))?;

        let sent = store.send_quote(quote.id, timestamp(2026, 9, 12, 10, 0))?;
        assert_eq!(sent.status, QuoteStatus::Sent);

        let resend = store.send_quote(quote.id, timestamp(2026, 9, 12, 11, 0));
        assert!(matches!(
            resend,
            Err(Error::InvalidQuoteTransition { .. })
        ));

        let approved = store.approve_quote(quote.id, timestamp(2026, 9, 14, 9, 0))?;
        assert_eq!(approved.status, QuoteStatus::Approved);
        assert!(approved.approved_at.is_some());

        Ok(())
    }

    #[test]
    fn test_expire_stale_quotes() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        let quote = store.create_quote(event.id, Some(date(2026, 9, 20)), None, date(2026, 9, 12))?;
        store.send_quote(quote.id, timestamp(2026, 9, 12, 10, 0))?;

        assert_eq!(store.expire_stale_quotes(date(2026, 9, 20)), 0);
        assert_eq!(store.expire_stale_quotes(date(2026, 9, 21)), 1);
        assert_eq!(store.quote(quote.id)?.status, QuoteStatus::Expired);
        // Idempotent: already expired
        assert_eq!(store.expire_stale_quotes(date(2026, 9, 22)), 0);

        Ok(())
    }

    #[test]
    fn test_single_default_payment_method() -> Result<()> {
        let mut store = create_test_store();
        let first = store.add_payment_method(new_payment_method("1111", true))?;
        let second = store.add_payment_method(new_payment_method("2222", true))?;

        // Adding a second default cleared the first
        assert_eq!(store.default_payment_method().map(|m| m.id), Some(second.id));
        let defaults = store
            .payment_methods()
            .iter()
            .filter(|method| method.is_default)
            .count();
        assert_eq!(defaults, 1);

        store.set_default_payment_method(first.id)?;
        assert_eq!(store.default_payment_method().map(|m| m.id), Some(first.id));
        let defaults = store
            .payment_methods()
            .iter()
            .filter(|method| method.is_default)
            .count();
        assert_eq!(defaults, 1);

        Ok(())
    }

    #[test]
    fn test_removed_default_leaves_no_default() -> Result<()> {
        let mut store = create_test_store();
        let method = store.add_payment_method(new_payment_method("1111", true))?;

        store.remove_payment_method(method.id)?;

        assert!(store.default_payment_method().is_none());
        let reuse = store.set_default_payment_method(method.id);
        assert!(matches!(
            reuse,
            Err(Error::PaymentMethodNotFound { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_day_at_capacity_uses_company_limit() -> Result<()> {
        // create_test_company allows two events per day
        let mut store = create_test_store();
        store.add_event(new_event_on(date(2026, 9, 12), time(8, 0), time(12, 0)))?;
        let policy = SchedulingPolicy::default();
        assert!(!store.day_at_capacity(date(2026, 9, 12), &policy));

        store.add_event(new_event_on(date(2026, 9, 12), time(13, 0), time(17, 0)))?;
        assert!(store.day_at_capacity(date(2026, 9, 12), &policy));

        Ok(())
    }

    #[test]
    fn test_from_book_round_trip() -> Result<()> {
        let mut store = create_test_store();
        let event = store.add_event(new_event_on(date(2026, 9, 12), time(18, 0), time(23, 0)))?;
        let item = store.add_menu_item(new_menu_item("Feijoada", dec!(10), dec!(25)))?;
        store.set_menu_line(event.id, item.id, dec!(1))?;
        store.upsert_cost_calculation(create_test_calculation(event.id))?;
        store.create_quote(event.id, None, None, date(2026, 9, 12))?;

        let book = CompanyBook {
            company: store.company().clone(),
            events: store.events().to_vec(),
            menu_items: store.menu_items().to_vec(),
            menu_lines: vec![EventMenuLine {
                event_id: event.id,
                menu_item_id: item.id,
                quantity: dec!(1),
            }],
            cost_calculations: vec![store.cost_calculation(event.id)?.clone()],
            quotes: store.quotes().to_vec(),
            payment_methods: Vec::new(),
        };

        let reloaded = CompanyStore::from_book(book)?;
        assert_eq!(reloaded.events().len(), 1);

        // Id assignment continues past the loaded records
        let mut reloaded = reloaded;
        let next = reloaded.add_event(new_event_on(date(2026, 9, 13), time(18, 0), time(23, 0)))?;
        assert_eq!(next.id, event.id + 1);
        let quote = reloaded.create_quote(event.id, None, None, date(2026, 9, 13))?;
        assert_eq!(quote.version, 2);

        Ok(())
    }

    #[test]
    fn test_from_book_rejects_duplicate_slot() {
        let company = create_test_company();
        let events = vec![
            create_custom_event(1, date(2026, 9, 12), time(18, 0), time(23, 0), EventStatus::Confirmed),
            create_custom_event(2, date(2026, 9, 12), time(18, 0), time(22, 0), EventStatus::Draft),
        ];
        let book = CompanyBook {
            company,
            events,
            menu_items: Vec::new(),
            menu_lines: Vec::new(),
            cost_calculations: Vec::new(),
            quotes: Vec::new(),
            payment_methods: Vec::new(),
        };

        let result = CompanyStore::from_book(book);

        assert!(matches!(result, Err(Error::EventSlotTaken { .. })));
    }

    #[test]
    fn test_from_book_rejects_two_defaults() {
        let company = create_test_company();
        let mut first = create_test_payment_method(1, true);
        first.company_id = company.id;
        let mut second = create_test_payment_method(2, true);
        second.company_id = company.id;
        let book = CompanyBook {
            company,
            events: Vec::new(),
            menu_items: Vec::new(),
            menu_lines: Vec::new(),
            cost_calculations: Vec::new(),
            quotes: Vec::new(),
            payment_methods: vec![first, second],
        };

        let result = CompanyStore::from_book(book);

        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_book_rejects_negative_quote_amounts() {
        let company = create_test_company();
        let events = vec![create_test_event(7, EventStatus::Confirmed)];
        let mut quote = create_test_quote(1, 7, 1);
        quote.total_price = dec!(-2210.00);
        let book = CompanyBook {
            company,
            events,
            menu_items: Vec::new(),
            menu_lines: Vec::new(),
            cost_calculations: Vec::new(),
            quotes: vec![quote],
            payment_methods: Vec::new(),
        };

        let result = CompanyStore::from_book(book);

        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_from_book_rejects_orphan_line() {
        let company = create_test_company();
        let book = CompanyBook {
            company,
            events: Vec::new(),
            menu_items: Vec::new(),
            menu_lines: vec![EventMenuLine {
                event_id: 5,
                menu_item_id: 1,
                quantity: dec!(1),
            }],
            cost_calculations: Vec::new(),
            quotes: Vec::new(),
            payment_methods: Vec::new(),
        };

        let result = CompanyStore::from_book(book);

        assert!(matches!(result, Err(Error::EventNotFound { id: 5 })));
    }
}
