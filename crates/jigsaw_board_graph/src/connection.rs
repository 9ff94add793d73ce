// SPDX-License-Identifier: MIT OR Apache-2.0
//! Committed connections between placed nodes.

use crate::node::NodeId;
use crate::piece::{EdgePosition, EdgeShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One endpoint of a connection: an edge and the shape cut into it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRef {
    /// Which side of the piece
    pub edge: EdgePosition,
    /// The shape on that side
    pub shape: EdgeShape,
}

impl std::fmt::Display for PortRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.edge, self.shape)
    }
}

/// A committed connection between two placed nodes, emitted to the host
/// canvas so it can draw a persistent edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// The node that was dragged into place
    pub source: NodeId,
    /// The stationary node it joined
    pub target: NodeId,
    /// Edge and shape on the source side
    pub source_port: PortRef,
    /// Edge and shape on the target side
    pub target_port: PortRef,
}

impl Connection {
    /// Validate and create a connection between two port references.
    ///
    /// The edges must face each other and the shapes must interlock; the two
    /// nodes must be distinct.
    pub fn new(
        source: NodeId,
        target: NodeId,
        source_port: PortRef,
        target_port: PortRef,
    ) -> Result<Self, ConnectionError> {
        if source == target {
            return Err(ConnectionError::SelfConnection(source));
        }
        if !source_port.edge.is_opposite(target_port.edge) {
            return Err(ConnectionError::EdgesNotOpposite(
                source_port.edge,
                target_port.edge,
            ));
        }
        if !source_port.shape.is_complementary(target_port.shape) {
            return Err(ConnectionError::ShapesNotComplementary(
                source_port.shape,
                target_port.shape,
            ));
        }

        Ok(Self {
            id: ConnectionId::new(),
            source,
            target,
            source_port,
            target_port,
        })
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The two edges do not face each other
    #[error("edges do not face each other: {0} / {1}")]
    EdgesNotOpposite(EdgePosition, EdgePosition),

    /// The two edge shapes do not interlock
    #[error("shapes do not interlock: {0} / {1}")]
    ShapesNotComplementary(EdgeShape, EdgeShape),

    /// A node cannot connect to itself
    #[error("node cannot connect to itself: {0}")]
    SelfConnection(NodeId),
}
