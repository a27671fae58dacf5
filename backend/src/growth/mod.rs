//! Growth module for deterministic member arrivals.
//!
//! Each tick admits a random number of new members. Every newcomer attaches to
//! one member who was already in the community before this tick's growth,
//! chosen uniformly over all of them regardless of moderation status.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same joiners and attachments
//! 2. **Pre-growth targets**: Attachment targets are drawn before any newcomer
//!    becomes visible, so newcomers never attach to each other
//! 3. **Status-blind attachment**: Banned and suspended members can still be
//!    attachment targets
//!
//! # Example
//!
//! ```
//! use community_moderation_sim::growth::{GrowthConfig, GrowthModel};
//! use community_moderation_sim::{CommunityGraph, PopulationState, RngManager};
//!
//! let mut rng = RngManager::new(42);
//! let mut graph = CommunityGraph::with_random_attachment(10, &mut rng);
//! let mut population = PopulationState::with_active_members(10);
//!
//! let model = GrowthModel::new(GrowthConfig { growth_range: (5, 5) });
//! let joined = model.grow(&mut graph, &mut population, 0, &mut rng).unwrap();
//!
//! assert_eq!(joined.len(), 5);
//! assert_eq!(graph.member_count(), 15);
//! assert_eq!(population.total(), 15);
//! ```

use crate::models::{CommunityGraph, GraphError, MemberId, PopulationError, PopulationState};
use crate::orchestrator::ConfigError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while admitting new members
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrowthError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Population error: {0}")]
    Population(#[from] PopulationError),
}

/// Configuration for member arrivals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// New members per tick (min, max), both inclusive
    pub growth_range: (usize, usize),
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            growth_range: (20, 60),
        }
    }
}

impl GrowthConfig {
    /// Check the range is well formed (low ≤ high)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (low, high) = self.growth_range;
        if low > high {
            return Err(ConfigError::InvertedRange {
                name: "growth_range",
                low,
                high,
            });
        }
        Ok(())
    }
}

/// A newcomer and the pre-existing member it attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub member: MemberId,
    /// `None` only when the community was empty before this tick
    pub attached_to: Option<MemberId>,
}

/// Admits new members each tick.
#[derive(Debug, Clone)]
pub struct GrowthModel {
    config: GrowthConfig,
}

impl GrowthModel {
    /// Create a growth model. Call `GrowthConfig::validate` first.
    pub fn new(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Admit this tick's newcomers.
    ///
    /// Draws the arrival count from `growth_range`, then one attachment target
    /// per newcomer from the pre-growth member set, then adds the newcomers to
    /// the graph and registers them as Active in `population`.
    ///
    /// # Returns
    ///
    /// One `Attachment` per newcomer in join order; its length is the number
    /// of members added.
    pub fn grow(
        &self,
        graph: &mut CommunityGraph,
        population: &mut PopulationState,
        _tick: usize,
        rng: &mut RngManager,
    ) -> Result<Vec<Attachment>, GrowthError> {
        let (low, high) = self.config.growth_range;
        let num_joining = rng.range_inclusive(low, high);

        // Targets come from the pre-growth graph
        let targets: Vec<Option<MemberId>> = (0..num_joining)
            .map(|_| graph.sample_existing_uniform(rng))
            .collect();

        let mut joined = Vec::with_capacity(num_joining);
        for attached_to in targets {
            let member = graph.add_member();
            if let Some(existing) = attached_to {
                graph.attach(member, existing)?;
            }
            joined.push(Attachment {
                member,
                attached_to,
            });
        }

        population.extend(joined.iter().map(|a| a.member))?;
        Ok(joined)
    }
}
