//! Route-subsystem error type.

use thiserror::Error;

use sr_core::NodeId;

/// Errors produced by `sr-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Valid start/end nodes exist but no path connects them.  Since all
    /// three views share one topology, this outcome is identical across
    /// variants for a given node pair.
    #[error("no route from {from} to {to}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),
}

pub type RouteResult<T> = Result<T, RouteError>;
