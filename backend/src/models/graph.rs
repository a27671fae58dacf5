//! Community graph bookkeeping
//!
//! Records who joined and whom they attached to. Moderation never reads the
//! edges; they exist so the growth history can be inspected or exported.
//!
//! # Invariants
//!
//! 1. Member ids are `0..member_count()`, assigned in join order
//! 2. Members are never removed (banned members stay as nodes)
//! 3. Every edge endpoint is a known member

use crate::models::member::MemberId;
use crate::rng::RngManager;
use thiserror::Error;

/// Errors from graph mutation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown member {0}: not yet added to the community graph")]
    UnknownMember(MemberId),
}

/// Members in join order plus attachment edges
///
/// # Example
///
/// ```rust
/// use community_moderation_sim::{CommunityGraph, RngManager};
///
/// let mut rng = RngManager::new(7);
/// let mut graph = CommunityGraph::new();
/// let first = graph.add_member();
/// let target = graph.sample_existing_uniform(&mut rng).unwrap();
/// let second = graph.add_member();
/// graph.attach(second, target).unwrap();
///
/// assert_eq!(target, first);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommunityGraph {
    member_count: usize,
    /// (new member, existing member) in attachment order
    edges: Vec<(MemberId, MemberId)>,
}

impl CommunityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an initial community of `num_members` by random attachment
    ///
    /// Each member after the first is connected to one earlier member chosen
    /// uniformly at random. Stands in for an externally constructed graph.
    pub fn with_random_attachment(num_members: usize, rng: &mut RngManager) -> Self {
        let mut graph = Self::new();
        for _ in 0..num_members {
            let target = graph.sample_existing_uniform(rng);
            let id = graph.add_member();
            if let Some(existing) = target {
                graph.edges.push((id, existing));
            }
        }
        graph
    }

    /// Append a member with the next sequential id
    pub fn add_member(&mut self) -> MemberId {
        let id = MemberId::from(self.member_count);
        self.member_count += 1;
        id
    }

    /// Record an attachment edge from `id` to `existing_id`
    pub fn attach(&mut self, id: MemberId, existing_id: MemberId) -> Result<(), GraphError> {
        for member in [id, existing_id] {
            if !self.contains(member) {
                return Err(GraphError::UnknownMember(member));
            }
        }
        self.edges.push((id, existing_id));
        Ok(())
    }

    /// Uniformly random member over every known id, regardless of status
    ///
    /// Returns `None` only for an empty graph.
    pub fn sample_existing_uniform(&self, rng: &mut RngManager) -> Option<MemberId> {
        if self.member_count == 0 {
            return None;
        }
        Some(MemberId::from(rng.index(self.member_count)))
    }

    /// Whether `id` has been added
    pub fn contains(&self, id: MemberId) -> bool {
        id.index() < self.member_count
    }

    /// Total members ever added
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    /// All member ids in join order
    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        (0..self.member_count).map(MemberId::from)
    }

    /// Number of attachment edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Attachment edges in the order they were recorded
    pub fn edges(&self) -> &[(MemberId, MemberId)] {
        &self.edges
    }

    /// Members sharing an edge with `id` (either direction)
    pub fn neighbors(&self, id: MemberId) -> Vec<MemberId> {
        self.edges
            .iter()
            .filter_map(|&(a, b)| match (a == id, b == id) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .collect()
    }
}
