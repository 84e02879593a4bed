//! Demo binary: loads a company book and prints the dashboard.
//!
//! All behavior lives in the library; this binary only wires configuration
//! and a TOML book file to the store and formats the results.

use std::{env, fs, path::Path};

use buffet_core::config::{self, AppConfig};
use buffet_core::core::{report, schedule};
use buffet_core::errors::{Error, Result};
use buffet_core::store::{CompanyBook, CompanyStore};
use chrono::{Days, Utc};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Days of agenda shown after today
const AGENDA_DAYS: u64 = 30;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = if let Ok(path) = env::var("BUFFET_CONFIG") {
        config::load_config(path)?
    } else if Path::new("config.toml").exists() {
        config::load_default_config()?
    } else {
        AppConfig::default()
    };
    let policy = app_config.scheduling_policy();
    info!("Configuration loaded.");

    // 4. Load the company book
    let book_path = env::args().nth(1).unwrap_or_else(|| "book.toml".to_string());
    let contents = fs::read_to_string(&book_path)?;
    let book: CompanyBook = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse book file {book_path}: {e}"),
    })?;
    let mut store = CompanyStore::from_book(book)?;
    info!("Loaded book for {} from {}.", store.company().name, book_path);

    // 5. Expire stale quotes before reporting
    let now = Utc::now();
    let today = now.date_naive();
    let expired = store.expire_stale_quotes(today);
    if expired > 0 {
        info!("Expired {} stale quotes.", expired);
    }

    // 6. Print the agenda and the dashboard
    println!("== {} ==", store.company().name);

    let horizon = today.checked_add_days(Days::new(AGENDA_DAYS)).unwrap_or(today);
    println!("\nAgenda {today} .. {horizon}:");
    for event in schedule::events_in_range(store.events(), today, horizon) {
        println!("  {}", report::format_event_line(event));
    }

    let dashboard = store.report(&policy, today);
    println!("\nEvents this month:    {}", dashboard.events_this_month);
    println!("Confirmed upcoming:   {}", dashboard.confirmed_upcoming);
    println!("Open proposals:       {}", dashboard.open_proposals);
    println!(
        "Revenue this month:   {}",
        report::format_money(dashboard.month_revenue)
    );
    println!("Pending quotes:       {}", dashboard.pending_quotes);
    println!("Quotes expiring soon: {}", dashboard.expiring_quotes);

    if dashboard.conflicts.is_empty() {
        println!("\nNo scheduling conflicts.");
    } else {
        println!("\nScheduling conflicts:");
        for id in &dashboard.conflicts {
            let event = store.event(*id)?;
            println!("  {}", report::format_event_line(event));
        }
    }

    println!("\nQuotes:");
    for quote in store.quotes() {
        println!("  {}", report::format_quote_line(quote));
    }

    Ok(())
}
