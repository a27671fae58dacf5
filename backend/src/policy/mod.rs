//! Moderation Policy Module
//!
//! Decides, each tick, how many Active members to sanction, which ones, and
//! whether the sanction is permanent or temporary.
//!
//! # Overview
//!
//! One `ModerationPolicy` covers both enforcement regimes. Two variants differ
//! only in how the sanction count is computed:
//!
//! 1. **FixedCount**: draw a count uniformly from `ban_count_range`
//! 2. **RateBased**: `max(floor(active × rate), draw(ban_count_range))`, where
//!    `rate` is `base_rate` under reintegration and `2 × base_rate` under
//!    exclusion (permanent bans are modelled as the harsher regime)
//!
//! Both clamp the count to the Active population, select members uniformly
//! without replacement from the Active set, and hand back `SanctionDecision`s
//! for the simulator to apply. `SanctionMode` decides between bans and
//! suspensions with a drawn duration.
//!
//! # Example
//!
//! ```rust
//! use community_moderation_sim::policy::{ModerationPolicy, SanctionMode};
//! use community_moderation_sim::{PopulationState, RngManager};
//!
//! let policy = ModerationPolicy::FixedCount {
//!     ban_count_range: (5, 5),
//!     mode: SanctionMode::Permanent,
//! };
//! let population = PopulationState::with_active_members(100);
//! let mut rng = RngManager::new(1);
//!
//! let decisions = policy.decide(&population, 0, &mut rng);
//! assert_eq!(decisions.len(), 5);
//! ```

use crate::models::{MemberId, PopulationState};
use crate::orchestrator::{ConfigError, SimulationConfig};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Suspension lengths used when none are configured
pub const DEFAULT_SANCTION_DURATIONS: [u32; 3] = [1, 6, 12];

/// Weights the rate-based policy applies to `DEFAULT_SANCTION_DURATIONS`
pub const DEFAULT_DURATION_WEIGHTS: [f64; 3] = [0.7, 0.2, 0.1];

/// Tolerance when checking that duration weights sum to 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How suspension durations are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DurationDistribution {
    /// Every configured duration equally likely
    Uniform { durations: Vec<u32> },

    /// Explicit discrete probabilities, one per duration
    Weighted { durations: Vec<u32>, weights: Vec<f64> },
}

impl DurationDistribution {
    /// Uniform draw over `durations`
    pub fn uniform(durations: Vec<u32>) -> Result<Self, ConfigError> {
        check_durations(&durations)?;
        Ok(DurationDistribution::Uniform { durations })
    }

    /// Weighted draw over `durations`; weights must match in length and sum to 1
    pub fn weighted(durations: Vec<u32>, weights: Vec<f64>) -> Result<Self, ConfigError> {
        check_durations(&durations)?;
        check_weights(&durations, &weights)?;
        Ok(DurationDistribution::Weighted { durations, weights })
    }

    pub fn durations(&self) -> &[u32] {
        match self {
            DurationDistribution::Uniform { durations }
            | DurationDistribution::Weighted { durations, .. } => durations,
        }
    }

    /// Draw one duration (ticks, always ≥ 1)
    pub fn sample(&self, rng: &mut RngManager) -> u32 {
        let idx = match self {
            DurationDistribution::Uniform { durations } => rng.index(durations.len()),
            DurationDistribution::Weighted { weights, .. } => {
                rng.weighted_index(weights).unwrap_or(0)
            }
        };
        self.durations()[idx]
    }
}

/// Kind of sanction a policy hands out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SanctionMode {
    /// Exclusion: every sanction is a permanent ban
    Permanent,

    /// Reintegration: every sanction is a suspension of drawn length
    Temporary(DurationDistribution),
}

/// Sanction to apply to a single member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sanction {
    Ban,
    Suspend { duration: u32 },
}

/// Decision about one selected member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanctionDecision {
    pub member: MemberId,
    pub sanction: Sanction,
}

/// Moderation policy, one variant per way of sizing the per-tick sanction lottery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModerationPolicy {
    /// Sanction count drawn uniformly from `ban_count_range`
    FixedCount {
        ban_count_range: (usize, usize),
        mode: SanctionMode,
    },

    /// Sanction count proportional to the Active population, floored by a draw
    /// from `ban_count_range`
    RateBased {
        base_rate: f64,
        ban_count_range: (usize, usize),
        mode: SanctionMode,
    },
}

impl ModerationPolicy {
    /// Build the policy a validated configuration describes
    ///
    /// RateBased is selected when `base_ban_rate` is set. Under reintegration,
    /// explicit `duration_weights` win; otherwise RateBased pairs
    /// `DEFAULT_DURATION_WEIGHTS` with `DEFAULT_SANCTION_DURATIONS` and every
    /// other case draws uniformly.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let rate_based = config.base_ban_rate.is_some();

        let mode = if config.reintegration_enabled {
            let durations = config.sanction_durations.clone();
            let distribution = match &config.duration_weights {
                Some(weights) => DurationDistribution::weighted(durations, weights.clone())?,
                None if rate_based && durations == DEFAULT_SANCTION_DURATIONS => {
                    DurationDistribution::weighted(durations, DEFAULT_DURATION_WEIGHTS.to_vec())?
                }
                None => DurationDistribution::uniform(durations)?,
            };
            SanctionMode::Temporary(distribution)
        } else {
            SanctionMode::Permanent
        };

        let ban_count_range = config.ban_count_range;
        Ok(match config.base_ban_rate {
            Some(base_rate) => ModerationPolicy::RateBased {
                base_rate,
                ban_count_range,
                mode,
            },
            None => ModerationPolicy::FixedCount {
                ban_count_range,
                mode,
            },
        })
    }

    pub fn mode(&self) -> &SanctionMode {
        match self {
            ModerationPolicy::FixedCount { mode, .. } | ModerationPolicy::RateBased { mode, .. } => {
                mode
            }
        }
    }

    /// Whether sanctioned members can come back
    pub fn reintegration_enabled(&self) -> bool {
        matches!(self.mode(), SanctionMode::Temporary(_))
    }

    /// Rate actually applied by the RateBased variant
    ///
    /// Exclusion doubles the base rate.
    pub fn effective_rate(&self) -> Option<f64> {
        match self {
            ModerationPolicy::FixedCount { .. } => None,
            ModerationPolicy::RateBased { base_rate, .. } => Some(if self.reintegration_enabled() {
                *base_rate
            } else {
                2.0 * base_rate
            }),
        }
    }

    /// How many members to sanction this tick, already clamped to `active_count`
    pub fn sanction_count(&self, active_count: usize, rng: &mut RngManager) -> usize {
        let requested = match self {
            ModerationPolicy::FixedCount {
                ban_count_range: (low, high),
                ..
            } => rng.range_inclusive(*low, *high),
            ModerationPolicy::RateBased {
                ban_count_range: (low, high),
                ..
            } => {
                let rate = self.effective_rate().unwrap_or_default();
                let proportional = (active_count as f64 * rate).floor() as usize;
                proportional.max(rng.range_inclusive(*low, *high))
            }
        };

        requested.min(active_count)
    }

    /// Run this tick's moderation lottery.
    ///
    /// Selection is uniform without replacement over the post-reintegration
    /// Active set, so a member is never sanctioned twice in one tick and
    /// non-active members are never selected. With no Active members the
    /// result is empty.
    pub fn decide(
        &self,
        population: &PopulationState,
        _tick: usize,
        rng: &mut RngManager,
    ) -> Vec<SanctionDecision> {
        let active = population.active_ids();
        let num_sanctions = self.sanction_count(active.len(), rng);
        if num_sanctions == 0 {
            return Vec::new();
        }

        let selected = rng.sample_without_replacement(&active, num_sanctions);
        selected
            .into_iter()
            .map(|member| {
                let sanction = match self.mode() {
                    SanctionMode::Permanent => Sanction::Ban,
                    SanctionMode::Temporary(distribution) => Sanction::Suspend {
                        duration: distribution.sample(rng),
                    },
                };
                SanctionDecision { member, sanction }
            })
            .collect()
    }
}

fn check_durations(durations: &[u32]) -> Result<(), ConfigError> {
    if durations.is_empty() {
        return Err(ConfigError::MissingSanctionDurations);
    }
    if let Some(pos) = durations.iter().position(|d| *d == 0) {
        return Err(ConfigError::NonPositiveDuration { index: pos });
    }
    Ok(())
}

pub(crate) fn check_weights(durations: &[u32], weights: &[f64]) -> Result<(), ConfigError> {
    if weights.len() != durations.len() {
        return Err(ConfigError::WeightCountMismatch {
            durations: durations.len(),
            weights: weights.len(),
        });
    }
    if let Some(pos) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
        return Err(ConfigError::NegativeWeight { index: pos });
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightsDoNotSumToOne { sum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;

    fn temporary_uniform(durations: Vec<u32>) -> SanctionMode {
        SanctionMode::Temporary(DurationDistribution::uniform(durations).unwrap())
    }

    #[test]
    fn test_fixed_count_clamps_to_active() {
        let policy = ModerationPolicy::FixedCount {
            ban_count_range: (1000, 1000),
            mode: SanctionMode::Permanent,
        };
        let population = PopulationState::with_active_members(10);
        let mut rng = RngManager::new(3);

        let decisions = policy.decide(&population, 0, &mut rng);
        assert_eq!(decisions.len(), 10);
    }

    #[test]
    fn test_no_active_members_means_no_sanctions() {
        let policy = ModerationPolicy::FixedCount {
            ban_count_range: (3, 12),
            mode: SanctionMode::Permanent,
        };
        let mut population = PopulationState::with_active_members(2);
        population.apply_ban(MemberId(0)).unwrap();
        population.apply_ban(MemberId(1)).unwrap();
        let mut rng = RngManager::new(3);

        assert!(policy.decide(&population, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_only_active_members_selected() {
        let policy = ModerationPolicy::FixedCount {
            ban_count_range: (5, 5),
            mode: temporary_uniform(vec![3]),
        };
        let mut population = PopulationState::with_active_members(10);
        for id in 0..5 {
            population.apply_ban(MemberId(id)).unwrap();
        }
        let mut rng = RngManager::new(77);

        let decisions = policy.decide(&population, 0, &mut rng);
        assert_eq!(decisions.len(), 5);
        for d in decisions {
            assert_eq!(population.status(d.member), Some(MemberStatus::Active));
            assert_eq!(d.sanction, Sanction::Suspend { duration: 3 });
        }
    }

    #[test]
    fn test_rate_doubles_under_exclusion() {
        let exclusion = ModerationPolicy::RateBased {
            base_rate: 0.05,
            ban_count_range: (3, 12),
            mode: SanctionMode::Permanent,
        };
        let reintegration = ModerationPolicy::RateBased {
            base_rate: 0.05,
            ban_count_range: (3, 12),
            mode: temporary_uniform(vec![1]),
        };
        assert_eq!(exclusion.effective_rate(), Some(0.1));
        assert_eq!(reintegration.effective_rate(), Some(0.05));
    }

    #[test]
    fn test_rate_based_uses_proportional_floor() {
        let policy = ModerationPolicy::RateBased {
            base_rate: 0.05,
            ban_count_range: (3, 12),
            mode: SanctionMode::Permanent,
        };
        let mut rng = RngManager::new(9);
        // 1000 active × 0.10 = 100 dominates any draw in [3, 12]
        assert_eq!(policy.sanction_count(1000, &mut rng), 100);
        // 10 active × 0.10 = 1, so the draw wins (then clamps to 10)
        let small = policy.sanction_count(10, &mut rng);
        assert!((3..=10).contains(&small));
    }

    #[test]
    fn test_weighted_duration_distribution_shape() {
        let dist =
            DurationDistribution::weighted(vec![1, 6, 12], DEFAULT_DURATION_WEIGHTS.to_vec())
                .unwrap();
        let mut rng = RngManager::new(31337);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match dist.sample(&mut rng) {
                1 => counts[0] += 1,
                6 => counts[1] += 1,
                12 => counts[2] += 1,
                other => panic!("unexpected duration {}", other),
            }
        }
        assert!((6500..7500).contains(&counts[0]), "{:?}", counts);
        assert!((1600..2400).contains(&counts[1]), "{:?}", counts);
        assert!((700..1300).contains(&counts[2]), "{:?}", counts);
    }

    #[test]
    fn test_weight_validation() {
        assert!(matches!(
            DurationDistribution::weighted(vec![1, 6], vec![1.0]),
            Err(ConfigError::WeightCountMismatch { durations: 2, weights: 1 })
        ));
        assert!(matches!(
            DurationDistribution::weighted(vec![1, 6], vec![0.5, 0.6]),
            Err(ConfigError::WeightsDoNotSumToOne { .. })
        ));
        assert!(matches!(
            DurationDistribution::uniform(vec![]),
            Err(ConfigError::MissingSanctionDurations)
        ));
        assert!(matches!(
            DurationDistribution::uniform(vec![1, 0]),
            Err(ConfigError::NonPositiveDuration { index: 1 })
        ));
    }
}
