//! Crime record type.

use sr_core::{CrimeId, GeoPoint};

use crate::{RiskError, RiskResult};

/// One crime observation, already scored by the external severity model.
///
/// The timestamp is provenance only — no time-windowed weighting happens in
/// this engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrimeRecord {
    /// Identifier assigned in dataset row order.
    pub id: CrimeId,

    pub pos: GeoPoint,

    /// Crime-type label (e.g. "theft", "assault"), used for route
    /// statistics breakdowns.
    pub kind: String,

    /// Externally predicted severity in `[0, 1]`.
    pub severity: f64,

    /// Unix timestamp of the occurrence (provenance).
    pub unix_time_secs: i64,
}

impl CrimeRecord {
    /// Reject records the rest of the pipeline must never see: invalid
    /// coordinates or a severity outside `[0, 1]`.
    pub fn validate(&self) -> RiskResult<()> {
        if !self.pos.is_valid() {
            return Err(RiskError::InvalidInput(format!(
                "record {} has invalid coordinate {}",
                self.id, self.pos
            )));
        }
        if !self.severity.is_finite() || !(0.0..=1.0).contains(&self.severity) {
            return Err(RiskError::InvalidInput(format!(
                "record {} has severity {} outside [0, 1]",
                self.id, self.severity
            )));
        }
        Ok(())
    }
}
