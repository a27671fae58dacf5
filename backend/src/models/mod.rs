//! Domain models for the community simulation

pub mod event;
pub mod graph;
pub mod member;
pub mod population;

// Re-exports
pub use event::{Event, EventLog};
pub use graph::{CommunityGraph, GraphError};
pub use member::{MemberId, MemberStatus};
pub use population::{PopulationError, PopulationState};
