//! Entity module - Plain data records for everything the business tracks.
//! These mirror the persistence layer's tables one to one; computations
//! receive them as snapshots and never talk to storage themselves.

pub mod company;
pub mod cost_calculation;
pub mod event;
pub mod event_menu;
pub mod menu_item;
pub mod payment_method;
pub mod quote;

pub use company::Company;
pub use cost_calculation::{CostCalculation, DEFAULT_PROFIT_MARGIN};
pub use event::{Event, EventKind, EventStatus};
pub use event_menu::EventMenuLine;
pub use menu_item::{MenuCategory, MenuItem};
pub use payment_method::{CardBrand, PaymentMethod};
pub use quote::{Quote, QuoteStatus};
