//! `sr-risk` — crime records, severity-to-edge assignment, and heatmap
//! aggregation.
//!
//! Severity prediction is an external boundary: every record arrives already
//! scored in `[0, 1]` by the caller's model.  This crate only distributes
//! those scores — onto road edges (for the weighted views) and onto a grid
//! (for visualization).
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`records`] | `CrimeRecord`                                               |
//! | [`loader`]  | CSV ingestion of pre-scored records                         |
//! | [`assign`]  | `assign_risk` — nearest-edge severity attribution, `RiskMap`|
//! | [`heatmap`] | `build_heat` — sparse severity grid, `HeatCell`, `HeatGrid` |
//! | [`error`]   | `RiskError`, `RiskResult<T>`                                |

pub mod assign;
pub mod error;
pub mod heatmap;
pub mod loader;
pub mod records;


pub use assign::{assign_risk, RiskMap};
pub use error::{RiskError, RiskResult};
pub use heatmap::{build_heat, HeatCell, HeatGrid};
pub use loader::{load_records_csv, load_records_reader};
pub use records::CrimeRecord;
