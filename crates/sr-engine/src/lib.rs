//! `sr-engine` — artifact build pipeline and engine facade.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`artifacts`] | `Artifacts`, `BuildReport`, `build_artifacts`             |
//! | [`engine`]    | `RouteEngine` — snapshot queries, atomic rebuild swap     |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.           |
//! | `parallel` | `route_all` runs the three variants on Rayon's thread pool.  |

pub mod artifacts;
pub mod engine;
pub mod error;


pub use artifacts::{build_artifacts, Artifacts, BuildReport};
pub use engine::RouteEngine;
pub use error::{EngineError, EngineResult};
