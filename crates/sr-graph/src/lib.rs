//! `sr-graph` — road network, spatial indexing, and weighted cost views.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadGraph` (CSR), `RoadGraphBuilder`                       |
//! | [`index`]   | `SpatialIndex` — nearest-edge / radius / nearest-node       |
//! | [`views`]   | `CostPolicy`, `GraphViews` (fastest / safest / optimized)   |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod network;
pub mod views;


pub use error::{GraphError, GraphResult};
pub use index::SpatialIndex;
pub use network::{RoadGraph, RoadGraphBuilder};
pub use views::{CostPolicy, GraphViews};
