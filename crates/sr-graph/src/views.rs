//! Weighted cost views over one shared topology.
//!
//! # Design
//!
//! Rather than three independently stored graphs, the three routing policies
//! share a single [`RoadGraph`] and differ only in a per-edge cost array:
//!
//! | Policy      | `cost(edge)`                          |
//! |-------------|---------------------------------------|
//! | `Fastest`   | `length`                              |
//! | `Safest`    | `length · (1 + k_safe · risk)`        |
//! | `Optimized` | `length · (1 + k_opt  · risk)`        |
//!
//! With `0 ≤ k_opt ≤ k_safe` and `risk ≥ 0` this guarantees, per edge,
//! `cost_Fastest ≤ cost_Optimized ≤ cost_Safest`, and an edge with zero risk
//! costs exactly its length in all three views.
//!
//! `GraphViews` is immutable after build.  Changing risk contributions means
//! building a fresh `GraphViews` and atomically swapping it in at the engine
//! layer — never mutating a published view in place.

use std::fmt;

use crate::network::RoadGraph;
use crate::{GraphError, GraphResult};
use sr_core::EdgeId;

// ── CostPolicy ────────────────────────────────────────────────────────────────

/// Which of the three weighted views a search runs against.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostPolicy {
    Fastest,
    Safest,
    Optimized,
}

impl CostPolicy {
    /// All policies, in the order a request computes them.
    pub const ALL: [CostPolicy; 3] =
        [CostPolicy::Fastest, CostPolicy::Safest, CostPolicy::Optimized];
}

impl fmt::Display for CostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CostPolicy::Fastest   => "fastest",
            CostPolicy::Safest    => "safest",
            CostPolicy::Optimized => "optimized",
        };
        f.write_str(s)
    }
}

// ── GraphViews ────────────────────────────────────────────────────────────────

/// The three per-edge cost arrays derived from one topology and one risk map.
///
/// Indexed by `EdgeId`; same length as the graph's edge arrays.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphViews {
    fastest:   Vec<f64>,
    safest:    Vec<f64>,
    optimized: Vec<f64>,

    /// The constants the views were built with, kept for provenance.
    pub k_safe: f64,
    pub k_opt:  f64,
}

impl GraphViews {
    /// Derive all three views from `graph` and the per-edge `risk` array.
    ///
    /// Fails with [`GraphError::InvalidInput`] on a risk array of the wrong
    /// length, a negative or non-finite risk value, invalid blend constants,
    /// or any resulting cost that is not finite.  Edge lengths were already
    /// validated by the graph builder.
    pub fn build(graph: &RoadGraph, risk: &[f64], k_safe: f64, k_opt: f64) -> GraphResult<Self> {
        if risk.len() != graph.edge_count() {
            return Err(GraphError::InvalidInput(format!(
                "risk array length {} does not match edge count {}",
                risk.len(),
                graph.edge_count()
            )));
        }
        for (i, &r) in risk.iter().enumerate() {
            if !r.is_finite() || r < 0.0 {
                return Err(GraphError::InvalidInput(format!(
                    "edge {i} has invalid risk contribution {r}"
                )));
            }
        }
        for (name, k) in [("k_safe", k_safe), ("k_opt", k_opt)] {
            if !k.is_finite() || k < 0.0 {
                return Err(GraphError::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {k}"
                )));
            }
        }
        if k_opt > k_safe {
            return Err(GraphError::InvalidInput(format!(
                "k_opt ({k_opt}) must not exceed k_safe ({k_safe})"
            )));
        }

        let weighted = |k: f64| -> GraphResult<Vec<f64>> {
            graph
                .edge_length_m
                .iter()
                .zip(risk)
                .enumerate()
                .map(|(i, (&len, &r))| {
                    let cost = len * (1.0 + k * r);
                    if !cost.is_finite() {
                        return Err(GraphError::InvalidInput(format!(
                            "edge {i} cost overflow: length {len}, risk {r}, k {k}"
                        )));
                    }
                    Ok(cost)
                })
                .collect()
        };

        Ok(Self {
            fastest:   graph.edge_length_m.clone(),
            safest:    weighted(k_safe)?,
            optimized: weighted(k_opt)?,
            k_safe,
            k_opt,
        })
    }

    /// The cost of `edge` under `policy`.
    #[inline]
    pub fn cost(&self, policy: CostPolicy, edge: EdgeId) -> f64 {
        self.costs(policy)[edge.index()]
    }

    /// The full per-edge cost array for `policy`.
    #[inline]
    pub fn costs(&self, policy: CostPolicy) -> &[f64] {
        match policy {
            CostPolicy::Fastest   => &self.fastest,
            CostPolicy::Safest    => &self.safest,
            CostPolicy::Optimized => &self.optimized,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.fastest.len()
    }
}
