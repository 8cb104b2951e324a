//! `tp-core` — foundational types for the `tollpath` route engine.
//!
//! This crate is a dependency of every other `tp-*` crate.  It has no `tp-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`                                        |
//! | [`geo`]    | `Point` (planar drawing coordinates)                      |
//! | [`config`] | `CostConfig`, `TollPolicy`                                |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CostConfig, TollPolicy};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EdgeId, NodeId};
