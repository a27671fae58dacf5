//! Event logging for simulation replay and auditing.
//!
//! Every state change the simulator makes is recorded as an `Event`, in the
//! order it happened within the tick:
//! - **Growth**: a member joins and attaches to an existing member
//! - **Reintegration**: an expired suspension returns a member to Active
//! - **Sanction**: a member is suspended or banned
//! - **Tick summary**: per-status totals after the tick's sanctions
//!
//! # Example
//!
//! ```rust
//! use community_moderation_sim::models::{Event, EventLog, MemberId};
//!
//! let mut log = EventLog::new();
//! log.log(Event::MemberBanned { tick: 3, member: MemberId(17) });
//!
//! assert_eq!(log.events_at_tick(3).len(), 1);
//! assert_eq!(log.events()[0].event_type(), "MemberBanned");
//! ```

use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// New member joined; `attached_to` is `None` only for the very first member
    MemberJoined {
        tick: usize,
        member: MemberId,
        attached_to: Option<MemberId>,
    },

    /// Suspension expired and the member is Active again
    MemberReintegrated { tick: usize, member: MemberId },

    /// Temporary sanction applied
    MemberSuspended {
        tick: usize,
        member: MemberId,
        duration: u32,
    },

    /// Permanent sanction applied
    MemberBanned { tick: usize, member: MemberId },

    /// Totals recorded at the end of a tick
    TickCompleted {
        tick: usize,
        active: usize,
        suspended: usize,
        banned: usize,
        total: usize,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::MemberJoined { tick, .. }
            | Event::MemberReintegrated { tick, .. }
            | Event::MemberSuspended { tick, .. }
            | Event::MemberBanned { tick, .. }
            | Event::TickCompleted { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::MemberJoined { .. } => "MemberJoined",
            Event::MemberReintegrated { .. } => "MemberReintegrated",
            Event::MemberSuspended { .. } => "MemberSuspended",
            Event::MemberBanned { .. } => "MemberBanned",
            Event::TickCompleted { .. } => "TickCompleted",
        }
    }

    /// Get the member this event concerns, if any
    pub fn member(&self) -> Option<MemberId> {
        match self {
            Event::MemberJoined { member, .. }
            | Event::MemberReintegrated { member, .. }
            | Event::MemberSuspended { member, .. }
            | Event::MemberBanned { member, .. } => Some(*member),
            Event::TickCompleted { .. } => None,
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of logged events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in log order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that occurred during `tick`
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Events whose `event_type()` equals `event_type`
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Full history of one member
    pub fn events_for_member(&self, member: MemberId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.member() == Some(member))
            .collect()
    }
}
