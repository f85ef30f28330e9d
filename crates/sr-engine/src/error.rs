//! Engine-level error type.
//!
//! Wraps every subsystem error while keeping the three caller-relevant
//! conditions distinguishable: *not found* (a coordinate with nothing in
//! snapping range), *unreachable* (valid endpoints, no connecting path), and
//! *invalid input* (malformed data or configuration).

use thiserror::Error;

use sr_core::CoreError;
use sr_graph::GraphError;
use sr_risk::RiskError;
use sr_route::RouteError;

/// Errors produced by `sr-engine`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("routing error: {0}")]
    Route(#[from] RouteError),
}

impl EngineError {
    /// `true` for the not-found condition: a request coordinate with no node
    /// or edge within the configured radius.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Graph(e) if e.is_not_found())
    }

    /// `true` when valid endpoints exist but no path connects them.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, EngineError::Route(RouteError::Unreachable { .. }))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
