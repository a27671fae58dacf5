//! Exclusion vs. reintegration comparison
//!
//! Runs one base configuration twice, sequentially: once with permanent bans and
//! once with temporary suspensions. Each run gets its own seeded generator and
//! its own initial community built from the same seed, so both start from the
//! same community and differ only in policy.

use crate::orchestrator::{run_simulation, SimulationConfig, SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// Paired series for the two enforcement policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyComparison {
    pub exclusion: SimulationResult,
    pub reintegration: SimulationResult,
}

impl PolicyComparison {
    /// Reintegration minus exclusion active count, per tick
    pub fn gap_series(&self) -> Vec<(usize, i64)> {
        self.exclusion
            .points()
            .iter()
            .zip(self.reintegration.points())
            .map(|(ex, re)| (ex.tick, re.active_count as i64 - ex.active_count as i64))
            .collect()
    }

    /// Gap at the last tick
    pub fn final_gap(&self) -> Option<i64> {
        self.gap_series().last().map(|(_, gap)| *gap)
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| {
            SimulationError::SerializationError(format!("Comparison serialization failed: {}", e))
        })
    }
}

/// Run `base` under exclusion, then under reintegration
///
/// `base.reintegration_enabled` is ignored.
pub fn compare_policies(base: &SimulationConfig) -> Result<PolicyComparison, SimulationError> {
    let exclusion = run_simulation(&base.exclusion())?;
    let reintegration = run_simulation(&base.with_reintegration())?;

    Ok(PolicyComparison {
        exclusion,
        reintegration,
    })
}
