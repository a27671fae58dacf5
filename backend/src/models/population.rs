//! Population State
//!
//! Per-member moderation status and remaining suspension time, stored as
//! parallel vectors indexed by `MemberId`.
//!
//! # Critical Invariants
//!
//! 1. **Partition**: `count(Active) + count(Suspended) + count(Banned) == total()`
//! 2. **Transitions**: only Active→Suspended, Active→Banned, Suspended→Active
//! 3. **Timers**: a freshly suspended member has timer ≥ 1; Active and Banned
//!    members carry timer 0

use crate::models::member::{MemberId, MemberStatus};
use thiserror::Error;

/// Errors from population mutations
///
/// The simulator only sanctions members it drew from `active_ids()`, so these
/// indicate a caller bug rather than a runtime condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PopulationError {
    #[error("Unknown member {0}")]
    UnknownMember(MemberId),

    #[error("Member ids must be added in join order: expected {expected}, got {got}")]
    NonSequentialId { expected: MemberId, got: MemberId },

    #[error("Illegal status transition for {member}: {from} -> {to}")]
    InvalidTransition {
        member: MemberId,
        from: MemberStatus,
        to: MemberStatus,
    },

    #[error("Suspension duration must be at least 1 tick")]
    ZeroDuration,
}

/// Status and sanction timer for every member
///
/// # Example
///
/// ```rust
/// use community_moderation_sim::{MemberId, MemberStatus, PopulationState};
///
/// let mut population = PopulationState::new();
/// population.extend((0..3).map(MemberId)).unwrap();
/// population.apply_suspension(MemberId(1), 1).unwrap();
///
/// assert_eq!(population.count(MemberStatus::Suspended), 1);
/// let back = population.decrement_and_reintegrate();
/// assert_eq!(back, vec![MemberId(1)]);
/// assert_eq!(population.count(MemberStatus::Active), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PopulationState {
    statuses: Vec<MemberStatus>,
    timers: Vec<u32>,
    /// Running per-status totals, indexed by `MemberStatus::slot`
    counts: [usize; 3],
}

impl PopulationState {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population of `count` Active members with ids `0..count`
    pub fn with_active_members(count: usize) -> Self {
        Self {
            statuses: vec![MemberStatus::Active; count],
            timers: vec![0; count],
            counts: [count, 0, 0],
        }
    }

    /// Register new members as Active with timer 0
    ///
    /// Ids must continue the join sequence exactly.
    pub fn extend<I>(&mut self, ids: I) -> Result<(), PopulationError>
    where
        I: IntoIterator<Item = MemberId>,
    {
        for id in ids {
            let expected = MemberId::from(self.statuses.len());
            if id != expected {
                return Err(PopulationError::NonSequentialId { expected, got: id });
            }
            self.statuses.push(MemberStatus::Active);
            self.timers.push(0);
            self.counts[MemberStatus::Active.slot()] += 1;
        }
        Ok(())
    }

    /// Age every suspension by one tick and reintegrate the expired ones
    ///
    /// Returns the reintegrated members in id order.
    pub fn decrement_and_reintegrate(&mut self) -> Vec<MemberId> {
        let mut reintegrated = Vec::new();

        for (idx, status) in self.statuses.iter_mut().enumerate() {
            if *status != MemberStatus::Suspended {
                continue;
            }
            let timer = &mut self.timers[idx];
            *timer = timer.saturating_sub(1);
            if *timer == 0 {
                *status = MemberStatus::Active;
                reintegrated.push(MemberId::from(idx));
            }
        }

        self.counts[MemberStatus::Suspended.slot()] -= reintegrated.len();
        self.counts[MemberStatus::Active.slot()] += reintegrated.len();
        reintegrated
    }

    /// Ids of all Active members, in id order
    pub fn active_ids(&self) -> Vec<MemberId> {
        self.ids_with_status(MemberStatus::Active)
    }

    /// Ids of all members currently holding `status`, in id order
    pub fn ids_with_status(&self, status: MemberStatus) -> Vec<MemberId> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == status)
            .map(|(idx, _)| MemberId::from(idx))
            .collect()
    }

    /// Permanently ban an Active member
    pub fn apply_ban(&mut self, id: MemberId) -> Result<(), PopulationError> {
        self.transition(id, MemberStatus::Banned)?;
        self.timers[id.index()] = 0;
        Ok(())
    }

    /// Suspend an Active member for `duration` ticks
    pub fn apply_suspension(&mut self, id: MemberId, duration: u32) -> Result<(), PopulationError> {
        if duration == 0 {
            return Err(PopulationError::ZeroDuration);
        }
        self.transition(id, MemberStatus::Suspended)?;
        self.timers[id.index()] = duration;
        Ok(())
    }

    /// Number of members currently holding `status`
    pub fn count(&self, status: MemberStatus) -> usize {
        self.counts[status.slot()]
    }

    /// Total members ever registered
    pub fn total(&self) -> usize {
        self.statuses.len()
    }

    /// Current status of a member
    pub fn status(&self, id: MemberId) -> Option<MemberStatus> {
        self.statuses.get(id.index()).copied()
    }

    /// Remaining suspension ticks of a member
    pub fn timer(&self, id: MemberId) -> Option<u32> {
        self.timers.get(id.index()).copied()
    }

    fn transition(&mut self, id: MemberId, to: MemberStatus) -> Result<(), PopulationError> {
        let from = self
            .status(id)
            .ok_or(PopulationError::UnknownMember(id))?;

        if !from.can_transition_to(to) {
            return Err(PopulationError::InvalidTransition {
                member: id,
                from,
                to,
            });
        }

        self.statuses[id.index()] = to;
        self.counts[from.slot()] -= 1;
        self.counts[to.slot()] += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(n: u64) -> PopulationState {
        let mut p = PopulationState::new();
        p.extend((0..n).map(MemberId)).unwrap();
        p
    }

    #[test]
    fn test_extend_rejects_gaps() {
        let mut p = population(2);
        let err = p.extend([MemberId(3)]).unwrap_err();
        assert_eq!(
            err,
            PopulationError::NonSequentialId {
                expected: MemberId(2),
                got: MemberId(3)
            }
        );
        assert_eq!(p.total(), 2);
    }

    #[test]
    fn test_banned_cannot_be_suspended() {
        let mut p = population(1);
        p.apply_ban(MemberId(0)).unwrap();
        let err = p.apply_suspension(MemberId(0), 3).unwrap_err();
        assert!(matches!(err, PopulationError::InvalidTransition { .. }));
        assert_eq!(p.count(MemberStatus::Banned), 1);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut p = population(1);
        assert_eq!(
            p.apply_suspension(MemberId(0), 0),
            Err(PopulationError::ZeroDuration)
        );
        assert_eq!(p.status(MemberId(0)), Some(MemberStatus::Active));
    }

    #[test]
    fn test_multi_tick_suspension_counts_down() {
        let mut p = population(1);
        p.apply_suspension(MemberId(0), 3).unwrap();

        assert!(p.decrement_and_reintegrate().is_empty());
        assert_eq!(p.timer(MemberId(0)), Some(2));
        assert!(p.decrement_and_reintegrate().is_empty());
        assert_eq!(p.decrement_and_reintegrate(), vec![MemberId(0)]);
        assert_eq!(p.timer(MemberId(0)), Some(0));
        assert_eq!(p.count(MemberStatus::Suspended), 0);
    }

    #[test]
    fn test_with_active_members_matches_extend() {
        let a = PopulationState::with_active_members(5);
        let b = population(5);
        assert_eq!(a.active_ids(), b.active_ids());
        assert_eq!(a.count(MemberStatus::Active), 5);
    }
}
