//! The result of a routing query.

use sr_core::{EdgeId, NodeId};
use sr_graph::CostPolicy;

/// A found route: a connected walk through the base topology, with the cost
/// under the view it was searched on and the physical length regardless of
/// view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Which weighted view produced this route.
    pub policy: CostPolicy,

    /// Visited nodes in order.  `nodes.len() == edges.len() + 1`; a trivial
    /// route (start == end) is a single node with no edges.
    pub nodes: Vec<NodeId>,

    /// Traversed edges in order, from source to destination.
    pub edges: Vec<EdgeId>,

    /// Total cost under `policy`'s cost function.
    pub total_cost: f64,

    /// Total physical length in metres (identical across views for the same
    /// edge sequence).
    pub total_length_m: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        *self.nodes.last().expect("route has at least one node")
    }
}
