//! Simulation Engine
//!
//! Main simulation loop integrating all components:
//! - Member growth (deterministic arrivals with random attachment)
//! - Reintegration (suspension timers count down)
//! - Moderation lottery (policy selects and sanctions Active members)
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! ```text
//! For each tick t in 0..iterations:
//! 1. GrowthModel::grow              (newcomers join as Active)
//! 2. decrement_and_reintegrate      (expired suspensions return to Active)
//! 3. ModerationPolicy::decide/apply (sanctions drawn from the post-reintegration Active set)
//! 4. Record (t, count(Active))
//! ```
//!
//! The order is load-bearing: newcomers can be sanctioned on the tick they join,
//! and a member reintegrated at step 2 is an ordinary Active candidate at step 3.
//!
//! # Example
//!
//! ```rust
//! use community_moderation_sim::orchestrator::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig {
//!     initial_member_count: 100,
//!     iterations: 5,
//!     growth_range: (20, 20),
//!     ban_count_range: (5, 5),
//!     ..SimulationConfig::default()
//! };
//!
//! let mut simulator = Simulator::new(config).unwrap();
//! let result = simulator.run().unwrap();
//!
//! assert_eq!(result.active_counts(), vec![115, 130, 145, 160, 175]);
//! ```

use crate::growth::{GrowthConfig, GrowthError, GrowthModel};
use crate::models::event::{Event, EventLog};
use crate::models::{CommunityGraph, MemberStatus, PopulationError, PopulationState};
use crate::orchestrator::digest;
use crate::policy::{check_weights, ModerationPolicy, Sanction, DEFAULT_SANCTION_DURATIONS};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Defaults reproduce the reference experiment: 5700 initial members,
/// 36 monthly ticks, 20-60 newcomers and 3-12 sanctions per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Members present before the first tick
    pub initial_member_count: usize,

    /// Number of ticks to simulate
    pub iterations: usize,

    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Newcomers per tick (min, max), inclusive
    pub growth_range: (usize, usize),

    /// Sanctions per tick (min, max), inclusive; a floor for the rate-based policy
    pub ban_count_range: (usize, usize),

    /// Temporary suspensions with reintegration instead of permanent bans
    pub reintegration_enabled: bool,

    /// Possible suspension lengths in ticks; required when reintegration is enabled
    pub sanction_durations: Vec<u32>,

    /// Probability per entry of `sanction_durations`
    pub duration_weights: Option<Vec<f64>>,

    /// Selects the rate-based policy; must lie in [0, 1)
    pub base_ban_rate: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_member_count: 5700,
            iterations: 36,
            rng_seed: 42,
            growth_range: (20, 60),
            ban_count_range: (3, 12),
            reintegration_enabled: false,
            sanction_durations: DEFAULT_SANCTION_DURATIONS.to_vec(),
            duration_weights: None,
            base_ban_rate: None,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Same configuration under permanent exclusion
    pub fn exclusion(&self) -> Self {
        Self {
            reintegration_enabled: false,
            ..self.clone()
        }
    }

    /// Same configuration under temporary suspension with reintegration
    pub fn with_reintegration(&self) -> Self {
        Self {
            reintegration_enabled: true,
            ..self.clone()
        }
    }

    /// Growth parameters as consumed by `GrowthModel`
    pub fn growth_config(&self) -> GrowthConfig {
        GrowthConfig {
            growth_range: self.growth_range,
        }
    }

    /// SHA-256 fingerprint of this configuration
    pub fn config_hash(&self) -> Result<String, SimulationError> {
        digest::compute_config_hash(self)
    }

    /// Validate configuration
    ///
    /// Every rule is checked before any tick runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        if self.initial_member_count == 0 {
            return Err(ConfigError::ZeroInitialMembers);
        }

        self.growth_config().validate()?;

        let (low, high) = self.ban_count_range;
        if low > high {
            return Err(ConfigError::InvertedRange {
                name: "ban_count_range",
                low,
                high,
            });
        }

        if self.reintegration_enabled {
            if self.sanction_durations.is_empty() {
                return Err(ConfigError::MissingSanctionDurations);
            }
            if let Some(index) = self.sanction_durations.iter().position(|d| *d == 0) {
                return Err(ConfigError::NonPositiveDuration { index });
            }
        }

        if let Some(weights) = &self.duration_weights {
            check_weights(&self.sanction_durations, weights)?;
        }

        if let Some(rate) = self.base_ban_rate {
            if !(0.0..1.0).contains(&rate) {
                return Err(ConfigError::InvalidBaseRate(rate));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration validation errors
///
/// All of these are fatal and reported before the first tick.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("iterations must be > 0")]
    ZeroIterations,

    #[error("initial_member_count must be > 0")]
    ZeroInitialMembers,

    #[error("sanction_durations must not be empty when reintegration is enabled")]
    MissingSanctionDurations,

    #[error("sanction_durations[{index}] must be at least 1 tick")]
    NonPositiveDuration { index: usize },

    #[error("duration_weights has {weights} entries but sanction_durations has {durations}")]
    WeightCountMismatch { durations: usize, weights: usize },

    #[error("duration_weights[{index}] must be a finite non-negative number")]
    NegativeWeight { index: usize },

    #[error("duration_weights must sum to 1 (got {sum})")]
    WeightsDoNotSumToOne { sum: f64 },

    #[error("{name} has low {low} greater than high {high}")]
    InvertedRange {
        name: &'static str,
        low: usize,
        high: usize,
    },

    #[error("base_ban_rate must lie in [0, 1) (got {0})")]
    InvalidBaseRate(f64),

    #[error("initial graph has {actual} members but initial_member_count is {expected}")]
    InitialGraphMismatch { expected: usize, actual: usize },

    #[error("Malformed configuration: {0}")]
    Parse(String),
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Growth error: {0}")]
    Growth(#[from] GrowthError),

    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    #[error("Run already completed all {iterations} iterations")]
    RunFinished { iterations: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Results
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    pub tick: usize,

    /// Newcomers admitted this tick
    pub num_joined: usize,

    /// Suspensions that expired this tick
    pub num_reintegrated: usize,

    /// Members sanctioned this tick (bans + suspensions)
    pub num_sanctioned: usize,

    pub num_banned: usize,

    pub num_suspended: usize,

    /// Totals after this tick's sanctions
    pub active_count: usize,
    pub suspended_count: usize,
    pub banned_count: usize,
    pub total_members: usize,
}

/// One point of the active-population series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub tick: usize,
    pub active_count: usize,
}

/// Ordered `(tick, active_count)` series, one point per tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    points: Vec<SeriesPoint>,
}

impl SimulationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, tick: usize, active_count: usize) {
        self.points.push(SeriesPoint { tick, active_count });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// x values
    pub fn ticks(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.tick).collect()
    }

    /// y values
    pub fn active_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.active_count).collect()
    }

    pub fn as_pairs(&self) -> Vec<(usize, usize)> {
        self.points.iter().map(|p| (p.tick, p.active_count)).collect()
    }

    pub fn final_active_count(&self) -> Option<usize> {
        self.points.last().map(|p| p.active_count)
    }

    /// Drop every point at or after `tick`
    pub fn truncate_at(&mut self, tick: usize) {
        self.points.retain(|p| p.tick < tick);
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self)
            .map_err(|e| SimulationError::SerializationError(format!("Result serialization failed: {}", e)))
    }

    /// SHA-256 of the JSON form; equal digests mean byte-identical series
    pub fn digest(&self) -> Result<String, SimulationError> {
        Ok(digest::sha256_hex(self.to_json()?.as_bytes()))
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Orchestrates one simulation run
///
/// Owns the community graph, population state, policy, and the single RNG
/// for the duration of the run.
///
/// # Determinism
///
/// All randomness is via `rng_manager`. Same seed + same config + same initial
/// graph = identical `SimulationResult`.
pub struct Simulator {
    config: SimulationConfig,

    graph: CommunityGraph,

    population: PopulationState,

    growth: GrowthModel,

    policy: ModerationPolicy,

    /// Deterministic RNG
    rng_manager: RngManager,

    /// Event log (all simulation events)
    event_log: EventLog,

    current_tick: usize,

    tick_history: Vec<TickResult>,

    series: SimulationResult,
}

impl Simulator {
    /// Create a simulator with a randomly attached initial community
    ///
    /// Convenience constructor that also plays the initial-graph builder: it
    /// calls `CommunityGraph::with_random_attachment` with the seeded generator,
    /// which then carries on driving the run. The tick loop itself never builds
    /// a graph; use `with_graph` to supply one built elsewhere.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = RngManager::new(config.rng_seed);
        let graph = CommunityGraph::with_random_attachment(config.initial_member_count, &mut rng);
        Self::with_graph_and_rng(config, graph, rng)
    }

    /// Create a simulator over an externally constructed initial community
    pub fn with_graph(config: SimulationConfig, graph: CommunityGraph) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_graph_and_rng(config, graph, rng)
    }

    /// Create a simulator with an injected randomness source
    ///
    /// Every initial member starts Active. `graph` must hold exactly
    /// `initial_member_count` members.
    pub fn with_graph_and_rng(
        config: SimulationConfig,
        graph: CommunityGraph,
        rng: RngManager,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        if graph.member_count() != config.initial_member_count {
            return Err(ConfigError::InitialGraphMismatch {
                expected: config.initial_member_count,
                actual: graph.member_count(),
            }
            .into());
        }

        let policy = ModerationPolicy::from_config(&config)?;
        let growth = GrowthModel::new(config.growth_config());
        let population = PopulationState::with_active_members(graph.member_count());

        Ok(Self {
            config,
            graph,
            population,
            growth,
            policy,
            rng_manager: rng,
            event_log: EventLog::new(),
            current_tick: 0,
            tick_history: Vec::new(),
            series: SimulationResult::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Index of the next tick to execute
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick >= self.config.iterations
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn graph(&self) -> &CommunityGraph {
        &self.graph
    }

    pub fn population(&self) -> &PopulationState {
        &self.population
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn tick_history(&self) -> &[TickResult] {
        &self.tick_history
    }

    /// Series recorded so far
    pub fn series(&self) -> &SimulationResult {
        &self.series
    }

    pub fn active_count(&self) -> usize {
        self.population.count(MemberStatus::Active)
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// # Returns
    ///
    /// * `Ok(TickResult)` - Tick executed and recorded
    /// * `Err(SimulationError::RunFinished)` - All iterations already ran
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::RunFinished {
                iterations: self.config.iterations,
            });
        }
        let tick = self.current_tick;

        // STEP 1: GROWTH
        let joined = self.growth.grow(
            &mut self.graph,
            &mut self.population,
            tick,
            &mut self.rng_manager,
        )?;
        for attachment in &joined {
            self.event_log.log(Event::MemberJoined {
                tick,
                member: attachment.member,
                attached_to: attachment.attached_to,
            });
        }

        // STEP 2: REINTEGRATION
        let reintegrated = self.population.decrement_and_reintegrate();
        for &member in &reintegrated {
            self.event_log.log(Event::MemberReintegrated { tick, member });
        }

        // STEP 3: MODERATION
        let decisions = self
            .policy
            .decide(&self.population, tick, &mut self.rng_manager);

        let mut num_banned = 0;
        let mut num_suspended = 0;
        for decision in &decisions {
            let member = decision.member;
            match decision.sanction {
                Sanction::Ban => {
                    self.population.apply_ban(member)?;
                    self.event_log.log(Event::MemberBanned { tick, member });
                    num_banned += 1;
                }
                Sanction::Suspend { duration } => {
                    self.population.apply_suspension(member, duration)?;
                    self.event_log.log(Event::MemberSuspended {
                        tick,
                        member,
                        duration,
                    });
                    num_suspended += 1;
                }
            }
        }

        // STEP 4: RECORD
        let result = TickResult {
            tick,
            num_joined: joined.len(),
            num_reintegrated: reintegrated.len(),
            num_sanctioned: decisions.len(),
            num_banned,
            num_suspended,
            active_count: self.population.count(MemberStatus::Active),
            suspended_count: self.population.count(MemberStatus::Suspended),
            banned_count: self.population.count(MemberStatus::Banned),
            total_members: self.population.total(),
        };

        self.series.push(tick, result.active_count);
        self.event_log.log(Event::TickCompleted {
            tick,
            active: result.active_count,
            suspended: result.suspended_count,
            banned: result.banned_count,
            total: result.total_members,
        });
        self.tick_history.push(result.clone());
        self.current_tick += 1;

        Ok(result)
    }

    /// Run every remaining tick and return the full series
    pub fn run(&mut self) -> Result<SimulationResult, SimulationError> {
        while !self.is_finished() {
            self.tick()?;
        }
        Ok(self.series.clone())
    }
}

/// Build a simulator from `config` and run it to completion
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, SimulationError> {
    Simulator::new(config.clone())?.run()
}
