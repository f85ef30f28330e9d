//! `sr-route` — informed shortest-path search and route statistics.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`astar`] | `find_route` — deterministic A* over one `GraphViews` policy  |
//! | [`route`] | `Route` — nodes, edges, cost, physical length                 |
//! | [`stats`] | `compose_stats`, `RiskLevel`, `RouteStats`                    |
//! | [`error`] | `RouteError`, `RouteResult<T>`                                |

pub mod astar;
pub mod error;
pub mod route;
pub mod stats;

#[cfg(test)]
mod tests;

pub use astar::find_route;
pub use error::{RouteError, RouteResult};
pub use route::Route;
pub use stats::{compose_stats, RiskLevel, RouteStats};
