/// Scheduling-conflict detection over event snapshots
pub mod conflict;

/// Cost and price computation for menus and cost calculations
pub mod costing;

/// Versioned quote issuing and lifecycle
pub mod quote;

/// Dashboard report aggregation and display formatting
pub mod report;

/// Calendar views and per-day capacity checks
pub mod schedule;
