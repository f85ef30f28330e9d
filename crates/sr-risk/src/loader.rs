//! CSV crime-record loader.
//!
//! # CSV format
//!
//! One row per record, severity already computed by the external model:
//!
//! ```csv
//! lat,lon,kind,severity,unix_time_secs
//! 18.5204,73.8567,theft,0.5,1700000000
//! 18.5310,73.8446,assault,0.7,1700003600
//! ```
//!
//! `CrimeId`s are assigned in row order, which fixes the deterministic
//! accumulation order used by risk assignment and heatmap binning.
//! Malformed rows fail the whole load — a partially ingested dataset must
//! never reach the build pipeline.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sr_core::{CrimeId, GeoPoint};

use crate::records::CrimeRecord;
use crate::{RiskError, RiskResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CrimeRow {
    lat:            f64,
    lon:            f64,
    kind:           String,
    severity:       f64,
    unix_time_secs: i64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load pre-scored crime records from a CSV file.
pub fn load_records_csv(path: &Path) -> RiskResult<Vec<CrimeRecord>> {
    let file = std::fs::File::open(path).map_err(RiskError::Io)?;
    load_records_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_records_reader<R: Read>(reader: R) -> RiskResult<Vec<CrimeRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<CrimeRow>().enumerate() {
        let row = result.map_err(|e| RiskError::Parse(e.to_string()))?;
        let record = CrimeRecord {
            id:             CrimeId(i as u32),
            pos:            GeoPoint::new(row.lat, row.lon),
            kind:           row.kind,
            severity:       row.severity,
            unix_time_secs: row.unix_time_secs,
        };
        record.validate()?;
        records.push(record);
    }

    Ok(records)
}
