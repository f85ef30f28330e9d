//! Engine configuration.
//!
//! Every build-time tunable of the routing engine lives here; nothing is
//! hard-coded inside the build pipeline.  The blend constants and radii have
//! no canonical values, so the application crate must choose and document
//! them — `validate()` only enforces the structural constraints that keep
//! the cost model sound.

use crate::{CoreError, CoreResult};

/// Build-time constants for the routing engine.
///
/// Typically loaded from a TOML/JSON file by the application crate and
/// passed to the artifact build.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Max distance (metres) from a crime record to an edge for the record
    /// to contribute risk to that edge.  Records farther than this from
    /// every edge are counted as unassociated.
    pub association_radius_m: f64,

    /// Max distance (metres) a request coordinate may be from the nearest
    /// road node.  Beyond this the request fails with `NotFound` rather
    /// than snapping to an arbitrary far-away node.
    pub snap_radius_m: f64,

    /// Risk multiplier of the SAFEST view: `cost = length·(1 + k_safe·risk)`.
    pub k_safe: f64,

    /// Risk multiplier of the OPTIMIZED view.  Must satisfy
    /// `0 ≤ k_opt ≤ k_safe` so the per-edge cost ordering
    /// FASTEST ≤ OPTIMIZED ≤ SAFEST holds.
    pub k_opt: f64,

    /// Heatmap grid cell size in metres.
    pub cell_size_m: f64,

    /// Normalized-risk threshold (total risk / total length, per metre)
    /// at which a route's risk level becomes MEDIUM.
    pub risk_medium_per_m: f64,

    /// Threshold at which a route's risk level becomes HIGH.
    /// Must be `≥ risk_medium_per_m`.
    pub risk_high_per_m: f64,
}

impl EngineConfig {
    /// Reject structurally invalid configurations.
    ///
    /// Fails fast with [`CoreError::InvalidInput`]; values are never
    /// clamped into range.
    pub fn validate(&self) -> CoreResult<()> {
        fn finite_non_negative(name: &str, v: f64) -> CoreResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
            Ok(())
        }

        finite_non_negative("association_radius_m", self.association_radius_m)?;
        finite_non_negative("snap_radius_m", self.snap_radius_m)?;
        finite_non_negative("k_safe", self.k_safe)?;
        finite_non_negative("k_opt", self.k_opt)?;
        finite_non_negative("risk_medium_per_m", self.risk_medium_per_m)?;
        finite_non_negative("risk_high_per_m", self.risk_high_per_m)?;

        if self.k_opt > self.k_safe {
            return Err(CoreError::InvalidInput(format!(
                "k_opt ({}) must not exceed k_safe ({})",
                self.k_opt, self.k_safe
            )));
        }
        if !(self.cell_size_m.is_finite() && self.cell_size_m > 0.0) {
            return Err(CoreError::InvalidInput(format!(
                "cell_size_m must be finite and positive, got {}",
                self.cell_size_m
            )));
        }
        if self.risk_medium_per_m > self.risk_high_per_m {
            return Err(CoreError::InvalidInput(format!(
                "risk_medium_per_m ({}) must not exceed risk_high_per_m ({})",
                self.risk_medium_per_m, self.risk_high_per_m
            )));
        }
        Ok(())
    }
}
