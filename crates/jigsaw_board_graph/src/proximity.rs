// SPDX-License-Identifier: MIT OR Apache-2.0
//! Proximity search for connection candidates around a dragged node.

use crate::node::{NodeId, PlacedNode};
use crate::piece::EdgePosition;

/// A provisional connection between one of the dragged node's edges and a
/// nearby node's facing edge. Ephemeral: computed per tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionCandidate {
    /// The node being dragged
    pub dragged: NodeId,
    /// The stationary node in range
    pub target: NodeId,
    /// Edge on the dragged node
    pub dragged_edge: EdgePosition,
    /// Edge on the target node
    pub target_edge: EdgePosition,
    /// Port-to-port distance at the time of the search
    pub distance: f32,
}

/// Find every valid edge pair within `radius` of the dragged node.
///
/// A pair is valid when the two edges face each other and their shapes
/// interlock (flat edges never enumerate). Results are written into `out`
/// sorted ascending by port distance; the front element is the commit
/// candidate, the whole list drives port highlighting. Ties keep the order
/// nodes were visited in.
///
/// The buffer is caller-owned and cleared on entry: this runs on every
/// pointer-move tick, so the per-call cost stays at one pass over the
/// placed nodes with no allocation once the buffer has grown.
pub fn find_candidates<'a>(
    dragged: &PlacedNode,
    nodes: impl IntoIterator<Item = &'a PlacedNode>,
    piece_size: f32,
    radius: f32,
    out: &mut Vec<ConnectionCandidate>,
) {
    out.clear();

    for target in nodes {
        if target.id == dragged.id {
            continue;
        }

        for (dragged_edge, dragged_shape) in dragged.piece.connectable_edges() {
            for (target_edge, target_shape) in target.piece.connectable_edges() {
                if !dragged_edge.is_opposite(target_edge)
                    || !dragged_shape.is_complementary(target_shape)
                {
                    continue;
                }

                let dragged_port = dragged.port_position(dragged_edge, piece_size);
                let target_port = target.port_position(target_edge, piece_size);
                let distance = dragged_port.distance(target_port);

                if distance < radius {
                    out.push(ConnectionCandidate {
                        dragged: dragged.id,
                        target: target.id,
                        dragged_edge,
                        target_edge,
                        distance,
                    });
                }
            }
        }
    }

    out.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
