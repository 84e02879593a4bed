/// Scheduling policy and company defaults from config.toml
pub mod policy;

pub use policy::{
    AppConfig, CompanyDefaults, DEFAULT_BLOCKING_STATUSES, SchedulingConfig, SchedulingPolicy,
    load_config, load_default_config,
};
