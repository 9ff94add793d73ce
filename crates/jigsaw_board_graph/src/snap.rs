// SPDX-License-Identifier: MIT OR Apache-2.0
//! Snap geometry and group-rigid position reconciliation.

use crate::group::GroupLedger;
use crate::node::{NodeId, PlacedNode, Point};
use crate::piece::EdgePosition;
use crate::proximity::ConnectionCandidate;
use indexmap::IndexMap;

/// How a confirmed connection repositions the assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPolicy {
    /// Only the dragged node is corrected; other group members stay put
    SingleNode,
    /// The dragged node's whole pre-merge group translates by the snap
    /// delta, keeping a previously-assembled sub-cluster rigid
    #[default]
    GroupConsistent,
}

/// Position that puts the dragged node exactly adjacent to the target.
///
/// The dragged node lands one `piece_size` away from the target along the
/// axis implied by the dragged edge: a dragged `left` edge sits to the
/// target's right, and so on. The matched ports coincide exactly afterwards,
/// however close or far the drag ended.
pub fn snap_position(target: Point, dragged_edge: EdgePosition, piece_size: f32) -> Point {
    match dragged_edge {
        EdgePosition::Left => Point::new(target.x + piece_size, target.y),
        EdgePosition::Right => Point::new(target.x - piece_size, target.y),
        EdgePosition::Top => Point::new(target.x, target.y + piece_size),
        EdgePosition::Bottom => Point::new(target.x, target.y - piece_size),
    }
}

/// Compute the position corrections for a confirmed connection.
///
/// Returns `(node, new_position)` pairs, dragged node first, as a pure value;
/// the caller applies them and then merges the ledger. Under
/// [`SnapPolicy::GroupConsistent`] every member of the dragged node's
/// pre-merge group receives the same delta the snap applied to the dragged
/// node. The target's group is the anchor and never moves.
///
/// If either endpoint has vanished from the node store the list is empty and
/// the connection should be abandoned.
pub fn reconcile(
    candidate: &ConnectionCandidate,
    nodes: &IndexMap<NodeId, PlacedNode>,
    ledger: &GroupLedger,
    piece_size: f32,
    policy: SnapPolicy,
) -> Vec<(NodeId, Point)> {
    let Some(target) = nodes.get(&candidate.target) else {
        return Vec::new();
    };
    let Some(dragged) = nodes.get(&candidate.dragged) else {
        return Vec::new();
    };

    let snapped = snap_position(target.position, candidate.dragged_edge, piece_size);
    let mut corrections = vec![(candidate.dragged, snapped)];

    if policy == SnapPolicy::GroupConsistent {
        let delta = snapped - dragged.position;
        for member in ledger.group_of(candidate.dragged) {
            if member == candidate.dragged || member == candidate.target {
                continue;
            }
            if let Some(node) = nodes.get(&member) {
                corrections.push((member, node.position + delta));
            }
        }
    }

    corrections
}
