//! Event entity - A booked (or prospective) engagement on a company's
//! calendar.
//!
//! The schedule is stored as a calendar date plus start/end times of day.
//! An end time at or before the start time means the event runs past
//! midnight into the next day; the scheduling code materializes the real
//! window from these three fields.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What kind of engagement an event is
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Wedding,
    Graduation,
    Birthday,
    Corporate,
    Other,
}

/// Lifecycle status of an event.
///
/// Two status vocabularies are in circulation: the proposal-driven flow
/// (`pending_proposal` through `post_event`) and the shorter draft/confirmed
/// flow. Both are representable; which statuses actually block a calendar
/// slot is decided by [`crate::config::SchedulingPolicy`], not hard-coded
/// here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Client asked for a proposal, nothing sent yet
    PendingProposal,
    /// Proposal delivered, awaiting an answer
    ProposalSent,
    /// Proposal accepted, the date is committed
    ProposalAccepted,
    /// Event day: crew on site
    InExecution,
    /// Event over, wrap-up (returns, settlement) pending
    PostEvent,
    /// Sketched internally, not yet offered to the client
    Draft,
    /// Booking confirmed
    Confirmed,
    /// Event currently running
    InProgress,
    /// Fully done and settled
    Completed,
    /// Called off
    Cancelled,
}

impl EventStatus {
    /// The wire/storage spelling of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventStatus::PendingProposal => "pending_proposal",
            EventStatus::ProposalSent => "proposal_sent",
            EventStatus::ProposalAccepted => "proposal_accepted",
            EventStatus::InExecution => "in_execution",
            EventStatus::PostEvent => "post_event",
            EventStatus::Draft => "draft",
            EventStatus::Confirmed => "confirmed",
            EventStatus::InProgress => "in_progress",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for the event
    pub id: i64,
    /// Owning company
    pub company_id: i64,
    /// Short title shown on the calendar (e.g., "Silva wedding")
    pub title: String,
    /// Kind of engagement
    pub kind: EventKind,
    /// Name of the hiring client
    pub client_name: String,
    /// Calendar date the event starts on
    pub date: NaiveDate,
    /// Time of day service starts
    pub start_time: NaiveTime,
    /// Time of day service ends; at or before `start_time` means the event
    /// ends on the following day
    pub end_time: NaiveTime,
    /// Expected number of guests
    pub guest_count: u32,
    /// Venue address or description, if known
    pub venue: Option<String>,
    /// Current lifecycle status
    pub status: EventStatus,
    /// Last computed cost estimate from the event's menu, if any
    pub estimated_cost: Option<Decimal>,
    /// Price actually agreed with the client, once closed
    pub final_price: Option<Decimal>,
    /// Free-form notes
    pub notes: Option<String>,
}
