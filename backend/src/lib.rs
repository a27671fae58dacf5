//! Community Moderation Simulator - Rust Engine
//!
//! Discrete-time simulation of a growing online community under two
//! enforcement policies: permanent exclusion and temporary suspension with
//! reintegration.
//!
//! # Architecture
//!
//! - **models**: Domain types (MemberId, MemberStatus, CommunityGraph, PopulationState, events)
//! - **growth**: Newcomer arrivals with uniform random attachment
//! - **policy**: Moderation lottery (fixed-count and rate-based variants)
//! - **orchestrator**: Main simulation loop, policy comparison, result digests
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Every member is exactly one of Active, Suspended, Banned
//! 2. Banned is terminal; members are never removed
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod growth;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use growth::{GrowthConfig, GrowthModel};
pub use models::{
    event::{Event, EventLog},
    graph::{CommunityGraph, GraphError},
    member::{MemberId, MemberStatus},
    population::{PopulationError, PopulationState},
};
pub use orchestrator::{
    compare_policies, run_simulation, ConfigError, PolicyComparison, SeriesPoint,
    SimulationConfig, SimulationError, SimulationResult, Simulator, TickResult,
};
pub use policy::{DurationDistribution, ModerationPolicy, Sanction, SanctionDecision, SanctionMode};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn community_moderation_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    m.add_function(wrap_pyfunction!(ffi::simulator::run_simulation, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulator::compare_policies, m)?)?;
    Ok(())
}
