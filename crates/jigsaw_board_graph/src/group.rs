// SPDX-License-Identifier: MIT OR Apache-2.0
//! Grouping ledger: which nodes must move together.

use crate::node::NodeId;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Adjacency ledger over connected nodes.
///
/// Each entry maps a node to every other node transitively connected to it
/// (self-exclusive). The relation is symmetric and re-closed in full on every
/// merge, so a single membership lookup always returns the whole group.
///
/// Connections are one-way commitments: there is no split operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupLedger {
    members: IndexMap<NodeId, IndexSet<NodeId>>,
}

impl GroupLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the groups of `a` and `b` into one.
    ///
    /// The union of both groups plus the two endpoints becomes the new
    /// group, and every member's set is rewritten to the union minus itself.
    /// Pairwise-only linking would leave previously-separate groups unaware
    /// of each other's membership; the rewrite restores transitive closure
    /// in one pass. Groups not involved in the merge are untouched.
    pub fn merge(&mut self, a: NodeId, b: NodeId) {
        let mut union: IndexSet<NodeId> = IndexSet::new();
        if let Some(group) = self.members.get(&a) {
            union.extend(group.iter().copied());
        }
        if let Some(group) = self.members.get(&b) {
            union.extend(group.iter().copied());
        }
        union.insert(a);
        union.insert(b);

        for member in &union {
            let mut others = union.clone();
            others.swap_remove(member);
            self.members.insert(*member, others);
        }
    }

    /// Every other node in `id`'s group, in ledger insertion order.
    /// Empty for nodes that were never connected.
    pub fn group_of(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.members
            .get(&id)
            .into_iter()
            .flat_map(|group| group.iter().copied())
    }

    /// Check whether two nodes belong to the same group
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        self.members.get(&a).is_some_and(|group| group.contains(&b))
    }

    /// Number of nodes that belong to any group
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether no connection has ever been recorded
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
