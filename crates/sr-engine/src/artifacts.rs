//! The artifact build pipeline.
//!
//! One build runs the full derivation chain for a dataset version:
//!
//! 1. spatial index over the road graph,
//! 2. severity-to-edge assignment,
//! 3. the three weighted views,
//! 4. the heatmap grid over the network's bounding box.
//!
//! The outputs are immutable once built and always mutually consistent —
//! they all derive from the same `(graph, records, config)` inputs.  The
//! build is idempotent: unchanged inputs produce identical artifacts.

use std::sync::Arc;

use sr_core::{CoreError, EngineConfig};
use sr_graph::{GraphViews, RoadGraph, SpatialIndex};
use sr_risk::{assign_risk, build_heat, CrimeRecord, HeatGrid, RiskMap};

use crate::EngineResult;

// ── Artifacts ─────────────────────────────────────────────────────────────────

/// One consistent, immutable set of derived routing data.
///
/// Query methods live here rather than on the engine so that a caller
/// holding a snapshot sees one dataset version across multiple calls even
/// while a rebuild swaps the engine's current set underneath.
pub struct Artifacts {
    pub graph:   RoadGraph,
    pub index:   SpatialIndex,
    pub views:   GraphViews,
    pub risk:    RiskMap,
    pub heat:    HeatGrid,

    /// The record dataset the artifacts were built from, indexed by
    /// `CrimeId`.  Kept for route statistics provenance.
    pub records: Vec<CrimeRecord>,

    /// The configuration the artifacts were built with.
    pub config:  EngineConfig,
}

// ── BuildReport ───────────────────────────────────────────────────────────────

/// Counts summarizing one artifact build.
///
/// Unassociated and out-of-bounds records are diagnostics, not errors — a
/// build that drops records still succeeds, and the caller decides whether
/// the counts warrant attention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildReport {
    pub node_count:   usize,
    pub edge_count:   usize,
    pub record_count: usize,

    /// Records that contributed risk to some edge.
    pub associated_count: usize,

    /// Records farther than the association radius from every edge.
    pub unassociated_count: usize,

    /// Records outside the heatmap bounding box.
    pub out_of_bounds_count: usize,
}

// ── Build ─────────────────────────────────────────────────────────────────────

/// Run the full build pipeline.
///
/// Fails without partial output on an invalid configuration, an invalid
/// record, or an empty graph; on success every artifact reflects the same
/// inputs.  The result is wrapped in [`Arc`] so the engine can publish it by
/// pointer swap.
pub fn build_artifacts(
    graph:   RoadGraph,
    records: Vec<CrimeRecord>,
    config:  EngineConfig,
) -> EngineResult<(Arc<Artifacts>, BuildReport)> {
    config.validate()?;

    let bbox = graph
        .bounding_box()
        .ok_or_else(|| CoreError::InvalidInput("cannot build artifacts over an empty graph".into()))?;

    let index = SpatialIndex::build(&graph);
    let risk  = assign_risk(&graph, &index, &records, config.association_radius_m)?;
    let views = GraphViews::build(&graph, &risk.edge_risk, config.k_safe, config.k_opt)?;
    let heat  = build_heat(&records, config.cell_size_m, bbox)?;

    let report = BuildReport {
        node_count:          graph.node_count(),
        edge_count:          graph.edge_count(),
        record_count:        records.len(),
        associated_count:    risk.associated_count(),
        unassociated_count:  risk.unassociated.len(),
        out_of_bounds_count: heat.out_of_bounds.len(),
    };

    let artifacts = Arc::new(Artifacts { graph, index, views, risk, heat, records, config });
    Ok((artifacts, report))
}
