//! Orchestrator - main simulation loop
//!
//! See `engine.rs` for the tick loop, `comparison.rs` for the two-policy
//! experiment and `digest.rs` for result fingerprints.

pub mod comparison;
pub mod digest;
pub mod engine;

// Re-export main types for convenience
pub use comparison::{compare_policies, PolicyComparison};
pub use digest::compute_config_hash;
pub use engine::{
    run_simulation, ConfigError, SeriesPoint, SimulationConfig, SimulationError, SimulationResult,
    Simulator, TickResult,
};
