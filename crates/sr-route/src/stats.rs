//! Route statistics composition.
//!
//! Summarizes a found route against the risk data that shaped it: total
//! length, aggregate risk bucketed into an ordered level, and a per-crime-
//! type breakdown of the records on the traversed edges.  Output ordering is
//! fixed (count descending, label ascending) so rendered statistics are
//! stable across runs.

use std::fmt;

use rustc_hash::FxHashMap;

use sr_risk::{CrimeRecord, RiskMap};

use crate::route::Route;

// ── RiskLevel ─────────────────────────────────────────────────────────────────

/// Ordered risk bucket for a whole route.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a length-normalized risk (total risk per metre) by the two
    /// configured thresholds.
    pub fn bucket(risk_per_m: f64, medium_per_m: f64, high_per_m: f64) -> RiskLevel {
        if risk_per_m >= high_per_m {
            RiskLevel::High
        } else if risk_per_m >= medium_per_m {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low    => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High   => "high",
        };
        f.write_str(s)
    }
}

// ── RouteStats ────────────────────────────────────────────────────────────────

/// Composed statistics for one route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStats {
    pub total_length_m: f64,

    /// Sum of risk contributions over traversed edges.
    pub total_risk: f64,

    /// `total_risk / total_length_m` (0 for a zero-length route).
    pub risk_per_m: f64,

    pub risk_level: RiskLevel,

    /// Crime-type counts over records associated with traversed edges,
    /// sorted descending by count, ties ascending by label.
    pub breakdown: Vec<(String, u32)>,
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Compose statistics for `route` from the risk map and the record dataset
/// (indexed by `CrimeId`).
///
/// `medium_per_m` / `high_per_m` are the configured risk-level thresholds.
pub fn compose_stats(
    route:        &Route,
    risk:         &RiskMap,
    records:      &[CrimeRecord],
    medium_per_m: f64,
    high_per_m:   f64,
) -> RouteStats {
    let total_risk: f64 = route.edges.iter().map(|&e| risk.risk_of(e)).sum();

    let risk_per_m = if route.total_length_m > 0.0 {
        total_risk / route.total_length_m
    } else {
        0.0
    };

    // ── Crime-type breakdown over traversed edges ─────────────────────────
    let mut counts: FxHashMap<&str, u32> = FxHashMap::default();
    for &edge in &route.edges {
        for &crime in &risk.records_by_edge[edge.index()] {
            let kind = records[crime.index()].kind.as_str();
            *counts.entry(kind).or_insert(0) += 1;
        }
    }
    let mut breakdown: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(kind, n)| (kind.to_string(), n))
        .collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    RouteStats {
        total_length_m: route.total_length_m,
        total_risk,
        risk_per_m,
        risk_level: RiskLevel::bucket(risk_per_m, medium_per_m, high_per_m),
        breakdown,
    }
}
