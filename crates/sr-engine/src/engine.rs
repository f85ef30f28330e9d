//! The engine facade: snapshot queries over an atomically-swappable
//! artifact set.
//!
//! Reads never block on a rebuild.  A rebuild constructs the next artifact
//! set off to the side and publishes it with a single `Arc` swap — only
//! after the whole pipeline succeeded.  A failed rebuild leaves the current
//! set untouched, so in-flight and subsequent queries keep serving the last
//! good dataset version.

use std::sync::{Arc, RwLock};

use sr_core::{EngineConfig, GeoPoint};
use sr_graph::{CostPolicy, RoadGraph};
use sr_risk::CrimeRecord;
use sr_route::{compose_stats, find_route, Route, RouteStats};

use crate::artifacts::{build_artifacts, Artifacts, BuildReport};
use crate::EngineResult;

// ── Snapshot queries ──────────────────────────────────────────────────────────

impl Artifacts {
    /// Route between two request coordinates under `policy`.
    ///
    /// Each coordinate snaps to the nearest road node within the configured
    /// snap radius; a coordinate with no node in range fails with the
    /// not-found condition rather than snapping arbitrarily far.
    pub fn route(&self, start: GeoPoint, end: GeoPoint, policy: CostPolicy) -> EngineResult<Route> {
        let from = self.index.nearest_node_within(start, self.config.snap_radius_m)?;
        let to   = self.index.nearest_node_within(end, self.config.snap_radius_m)?;
        Ok(find_route(&self.graph, &self.views, policy, from, to)?)
    }

    /// Route under all three variants at once, in `CostPolicy::ALL` order.
    ///
    /// Both coordinates snap **once**; the three searches share the
    /// resolved node pair.  Per-variant results are independent; since all
    /// views share one topology, the variants agree on reachability.  With
    /// the `parallel` feature the three searches run on Rayon's thread
    /// pool.
    pub fn route_all(&self, start: GeoPoint, end: GeoPoint) -> [EngineResult<Route>; 3] {
        let snapped = (
            self.index.nearest_node_within(start, self.config.snap_radius_m),
            self.index.nearest_node_within(end, self.config.snap_radius_m),
        );
        let (from, to) = match snapped {
            (Ok(from), Ok(to)) => (from, to),
            // A snap failure fails every variant with the same condition;
            // re-derive the error per slot.
            _ => return CostPolicy::ALL.map(|policy| self.route(start, end, policy)),
        };

        #[cfg(not(feature = "parallel"))]
        {
            CostPolicy::ALL
                .map(|policy| Ok(find_route(&self.graph, &self.views, policy, from, to)?))
        }

        #[cfg(feature = "parallel")]
        {
            let (fast, (safe, opt)) = rayon::join(
                || find_route(&self.graph, &self.views, CostPolicy::Fastest, from, to),
                || {
                    rayon::join(
                        || find_route(&self.graph, &self.views, CostPolicy::Safest, from, to),
                        || find_route(&self.graph, &self.views, CostPolicy::Optimized, from, to),
                    )
                },
            );
            [
                fast.map_err(crate::EngineError::from),
                safe.map_err(crate::EngineError::from),
                opt.map_err(crate::EngineError::from),
            ]
        }
    }

    /// The non-empty heatmap cells of this snapshot.
    pub fn heat(&self) -> &[sr_risk::HeatCell] {
        &self.heat.cells
    }

    /// Compose statistics for a route found on this snapshot.
    pub fn stats(&self, route: &Route) -> RouteStats {
        compose_stats(
            route,
            &self.risk,
            &self.records,
            self.config.risk_medium_per_m,
            self.config.risk_high_per_m,
        )
    }
}

// ── RouteEngine ───────────────────────────────────────────────────────────────

/// Shared engine handle serving queries from the current artifact set.
pub struct RouteEngine {
    current: RwLock<Arc<Artifacts>>,
}

impl RouteEngine {
    /// Build the initial artifact set and start serving it.
    pub fn new(
        graph:   RoadGraph,
        records: Vec<CrimeRecord>,
        config:  EngineConfig,
    ) -> EngineResult<(Self, BuildReport)> {
        let (artifacts, report) = build_artifacts(graph, records, config)?;
        Ok((Self { current: RwLock::new(artifacts) }, report))
    }

    /// The current artifact set.
    ///
    /// Cheap (`Arc` clone); the returned snapshot stays valid and internally
    /// consistent even if a rebuild swaps the current set afterwards.
    pub fn snapshot(&self) -> Arc<Artifacts> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            // A panicked reader cannot leave the Arc inconsistent; recover.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Rebuild from a new dataset version and publish on success.
    ///
    /// The pipeline runs to completion before the swap, so a failure leaves
    /// the engine serving the previous artifact set unchanged.
    pub fn rebuild(
        &self,
        graph:   RoadGraph,
        records: Vec<CrimeRecord>,
        config:  EngineConfig,
    ) -> EngineResult<BuildReport> {
        let (artifacts, report) = build_artifacts(graph, records, config)?;
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = artifacts;
        Ok(report)
    }

    // ── Convenience queries on the current snapshot ───────────────────────

    pub fn route(&self, start: GeoPoint, end: GeoPoint, policy: CostPolicy) -> EngineResult<Route> {
        self.snapshot().route(start, end, policy)
    }

    pub fn route_all(&self, start: GeoPoint, end: GeoPoint) -> [EngineResult<Route>; 3] {
        self.snapshot().route_all(start, end)
    }
}
