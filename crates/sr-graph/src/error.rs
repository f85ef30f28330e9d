//! Graph-subsystem error type.

use thiserror::Error;

use sr_core::{GeoPoint, NodeId};

/// Errors produced by `sr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Malformed build input (negative/NaN length, bad node reference,
    /// invalid coordinate).  Raised at build time, never clamped.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No edge lies within the query radius of the coordinate.
    #[error("no edge within {radius_m} m of {pos}")]
    NoEdgeNear { pos: GeoPoint, radius_m: f64 },

    /// No node lies within the query radius of the coordinate.
    #[error("no node within {radius_m} m of {pos}")]
    NoNodeNear { pos: GeoPoint, radius_m: f64 },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),
}

impl GraphError {
    /// `true` for the spatial-query miss variants: nothing in range of the
    /// coordinate, distinct from an unreachable route.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NoEdgeNear { .. } | GraphError::NoNodeNear { .. })
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
