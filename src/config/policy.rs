//! Application configuration loading from config.toml
//!
//! This module loads the scheduling policy (which event statuses block a
//! calendar slot) and company-level defaults from a TOML configuration
//! file. Everything has a sensible default, so a missing file or a partial
//! file still yields a working configuration.

use crate::entities::EventStatus;
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Statuses that hold a calendar slot when no configuration says otherwise.
///
/// This is the union of the two status vocabularies' committed states; a
/// proposal that was merely sent does not reserve the date.
pub const DEFAULT_BLOCKING_STATUSES: [EventStatus; 6] = [
    EventStatus::ProposalAccepted,
    EventStatus::InExecution,
    EventStatus::PostEvent,
    EventStatus::Confirmed,
    EventStatus::InProgress,
    EventStatus::Completed,
];

/// Decides which event statuses make an event occupy its calendar slot.
///
/// Conflict detection and capacity checks only consider events whose status
/// the policy blocks; drafts, open proposals and cancelled events never
/// collide with anything.
#[derive(Clone, Debug)]
pub struct SchedulingPolicy {
    blocking: HashSet<EventStatus>,
}

impl SchedulingPolicy {
    /// Builds a policy from an explicit set of blocking statuses
    pub fn new(blocking: impl IntoIterator<Item = EventStatus>) -> Self {
        SchedulingPolicy {
            blocking: blocking.into_iter().collect(),
        }
    }

    /// Whether an event in `status` holds its calendar slot
    #[must_use]
    pub fn blocks(&self, status: EventStatus) -> bool {
        self.blocking.contains(&status)
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        SchedulingPolicy::new(DEFAULT_BLOCKING_STATUSES)
    }
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Scheduling policy section
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    /// Defaults applied to new companies
    #[serde(default)]
    pub company_defaults: CompanyDefaults,
}

impl AppConfig {
    /// The scheduling policy described by this configuration
    #[must_use]
    pub fn scheduling_policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::new(self.scheduling.blocking_statuses.iter().copied())
    }
}

/// `[scheduling]` section of config.toml
#[derive(Debug, Deserialize)]
pub struct SchedulingConfig {
    /// Event statuses that occupy a calendar slot
    #[serde(default = "default_blocking_statuses")]
    pub blocking_statuses: Vec<EventStatus>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        SchedulingConfig {
            blocking_statuses: default_blocking_statuses(),
        }
    }
}

/// `[company_defaults]` section of config.toml
#[derive(Debug, Deserialize)]
pub struct CompanyDefaults {
    /// Profit margin (percent) for companies that have not set one
    #[serde(default = "default_profit_margin")]
    pub profit_margin_percent: Decimal,
    /// How many events a company can staff per day unless it says otherwise
    #[serde(default = "default_max_events_per_day")]
    pub max_events_per_day: u32,
}

impl Default for CompanyDefaults {
    fn default() -> Self {
        CompanyDefaults {
            profit_margin_percent: default_profit_margin(),
            max_events_per_day: default_max_events_per_day(),
        }
    }
}

fn default_blocking_statuses() -> Vec<EventStatus> {
    DEFAULT_BLOCKING_STATUSES.to_vec()
}

fn default_profit_margin() -> Decimal {
    crate::entities::DEFAULT_PROFIT_MARGIN
}

fn default_max_events_per_day() -> u32 {
    2
}

/// Loads application configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(AppConfig)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A status name is not part of the vocabulary
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads application configuration from the default location (./config.toml)
///
/// # Returns
/// * `Ok(AppConfig)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}
