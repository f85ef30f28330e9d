//! Heatmap aggregation.
//!
//! Bins crime records into a uniform metric grid over a bounding box,
//! independent of any route.  Each in-bounds record adds its severity to the
//! cell containing its coordinate; cells that end up with zero intensity are
//! omitted (sparse output).
//!
//! # Order independence
//!
//! Floating-point summation is not associative, so intensities are
//! accumulated in a fixed order — per cell, ascending `CrimeId` — regardless
//! of how the input slice is permuted.  Two runs over shuffled inputs
//! produce bit-identical grids.

use rustc_hash::FxHashMap;

use sr_core::{BoundingBox, CellId, GeoPoint};

use crate::records::CrimeRecord;
use crate::{RiskError, RiskResult};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── HeatCell / HeatGrid ───────────────────────────────────────────────────────

/// One non-empty bin of the intensity grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatCell {
    pub id: CellId,

    /// Geographic center of the cell (for rendering).
    pub center: GeoPoint,

    /// Severity-weighted sum of the records in this cell.
    pub intensity: f64,
}

/// Sparse heatmap: non-empty cells sorted ascending by `CellId`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatGrid {
    pub cells: Vec<HeatCell>,

    pub bbox:        BoundingBox,
    pub cell_size_m: f64,

    /// Records whose coordinate fell outside the bounding box.
    /// A diagnostic count, not an error.
    pub out_of_bounds: Vec<sr_core::CrimeId>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Bin `records` into a `cell_size_m` grid over `bbox`.
///
/// Deterministic and order-independent: permuting `records` cannot change
/// any cell's final intensity.  Fails with [`RiskError::InvalidInput`] on a
/// non-positive cell size or an invalid record.
pub fn build_heat(
    records:     &[CrimeRecord],
    cell_size_m: f64,
    bbox:        BoundingBox,
) -> RiskResult<HeatGrid> {
    if !(cell_size_m.is_finite() && cell_size_m > 0.0) {
        return Err(RiskError::InvalidInput(format!(
            "cell_size_m must be finite and positive, got {cell_size_m}"
        )));
    }

    // Metre offsets inside the box, equirectangular at the box center's
    // latitude.  Consistent with the spatial index's projection error bounds
    // at city scale.
    let cos_lat0 = bbox.center().lat.to_radians().cos();

    // Grid dimensions.  The box is inclusive on its max edge, so a record
    // sitting exactly on it clamps into the last row/column instead of
    // binning one past the grid.
    let north_extent_m = EARTH_RADIUS_M * (bbox.max.lat - bbox.min.lat).to_radians();
    let east_extent_m  = EARTH_RADIUS_M * (bbox.max.lon - bbox.min.lon).to_radians() * cos_lat0;
    let last_row = ((north_extent_m / cell_size_m).ceil().max(1.0) as u32) - 1;
    let last_col = ((east_extent_m / cell_size_m).ceil().max(1.0) as u32) - 1;

    let cell_of = |p: GeoPoint| -> CellId {
        let north_m = EARTH_RADIUS_M * (p.lat - bbox.min.lat).to_radians();
        let east_m  = EARTH_RADIUS_M * (p.lon - bbox.min.lon).to_radians() * cos_lat0;
        CellId::from_row_col(
            ((north_m / cell_size_m).floor() as u32).min(last_row),
            ((east_m / cell_size_m).floor() as u32).min(last_col),
        )
    };

    // ── Bucket records per cell ───────────────────────────────────────────
    let mut by_cell: FxHashMap<CellId, Vec<(sr_core::CrimeId, f64)>> = FxHashMap::default();
    let mut out_of_bounds = Vec::new();

    for record in records {
        record.validate()?;
        if !bbox.contains(record.pos) {
            out_of_bounds.push(record.id);
            continue;
        }
        by_cell
            .entry(cell_of(record.pos))
            .or_default()
            .push((record.id, record.severity));
    }
    out_of_bounds.sort_unstable();

    // ── Sum in (CellId, CrimeId) order ────────────────────────────────────
    let mut cell_ids: Vec<CellId> = by_cell.keys().copied().collect();
    cell_ids.sort_unstable();

    let mut cells = Vec::with_capacity(cell_ids.len());
    for id in cell_ids {
        let mut entries = by_cell.remove(&id).unwrap_or_default();
        entries.sort_unstable_by_key(|&(crime, _)| crime);

        let intensity: f64 = entries.iter().map(|&(_, s)| s).sum();
        // Sparse representation: a cell holding only zero-severity records
        // is indistinguishable from an empty one.
        if intensity == 0.0 {
            continue;
        }

        cells.push(HeatCell {
            id,
            center: cell_center(id, bbox, cell_size_m, cos_lat0),
            intensity,
        });
    }

    Ok(HeatGrid { cells, bbox, cell_size_m, out_of_bounds })
}

/// Geographic center of a grid cell (inverse of the binning projection).
///
/// The last row/column may only partially cover the box; their centers are
/// clamped inside it so every reported center is a valid box coordinate.
fn cell_center(id: CellId, bbox: BoundingBox, cell_size_m: f64, cos_lat0: f64) -> GeoPoint {
    let north_m = (id.row() as f64 + 0.5) * cell_size_m;
    let east_m  = (id.col() as f64 + 0.5) * cell_size_m;
    GeoPoint::new(
        (bbox.min.lat + (north_m / EARTH_RADIUS_M).to_degrees()).min(bbox.max.lat),
        (bbox.min.lon + (east_m / (EARTH_RADIUS_M * cos_lat0)).to_degrees()).min(bbox.max.lon),
    )
}
