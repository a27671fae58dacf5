//! Member identity and moderation status
//!
//! A member is nothing but an identifier; every mutable fact about it lives in
//! `PopulationState`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Member identifier, assigned sequentially in join order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    /// Position of this member in join order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member_{:06}", self.0)
    }
}

impl From<usize> for MemberId {
    fn from(index: usize) -> Self {
        MemberId(index as u64)
    }
}

/// Moderation status of a member
///
/// Allowed transitions:
/// - Active → Suspended
/// - Active → Banned
/// - Suspended → Active (reintegration)
///
/// Banned is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    Suspended,
    Banned,
}

impl MemberStatus {
    /// All statuses, in counter order
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Active,
        MemberStatus::Suspended,
        MemberStatus::Banned,
    ];

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: MemberStatus) -> bool {
        matches!(
            (self, next),
            (MemberStatus::Active, MemberStatus::Suspended)
                | (MemberStatus::Active, MemberStatus::Banned)
                | (MemberStatus::Suspended, MemberStatus::Active)
        )
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            MemberStatus::Active => 0,
            MemberStatus::Suspended => 1,
            MemberStatus::Banned => 2,
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemberStatus::Active => "active",
            MemberStatus::Suspended => "suspended",
            MemberStatus::Banned => "banned",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banned_is_terminal() {
        for next in MemberStatus::ALL {
            assert!(!MemberStatus::Banned.can_transition_to(next));
        }
    }

    #[test]
    fn test_suspended_only_returns_to_active() {
        assert!(MemberStatus::Suspended.can_transition_to(MemberStatus::Active));
        assert!(!MemberStatus::Suspended.can_transition_to(MemberStatus::Banned));
        assert!(!MemberStatus::Suspended.can_transition_to(MemberStatus::Suspended));
    }

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId(42).to_string(), "member_000042");
    }
}
