//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. Every random draw in a simulation run
//! (growth counts, attachment targets, sanction counts, member selection,
//! sanction durations) MUST go through one `RngManager` owned by the run.

mod xorshift;

pub use xorshift::RngManager;
