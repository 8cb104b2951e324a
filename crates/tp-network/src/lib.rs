//! `tp-network` — road graph, cost model, and adjacency index.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`graph`]     | `RoadGraph`, `RoadGraphBuilder`, raw input records          |
//! | [`cost`]      | `CostModel`, `EdgeCost`, `fuel_used`, `toll`                |
//! | [`adjacency`] | `AdjacencyIndex` (bidirectional CSR of precomputed costs)   |
//! | [`loader`]    | `load_graph_json`, `load_graph_reader`                      |
//! | [`error`]     | `DataError`, `CostError`                                    |
//!
//! # Data flow
//!
//! ```text
//! RawGraph ──load──▶ RoadGraph ──AdjacencyIndex::build(model)──▶ AdjacencyIndex
//! ```
//!
//! A `RoadGraph` is immutable once built.  An `AdjacencyIndex` is derived from
//! one graph and one `CostModel`; build a new index whenever either changes.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `tp-core` types.        |

pub mod adjacency;
pub mod cost;
pub mod error;
pub mod graph;
pub mod loader;


pub use adjacency::{AdjacencyIndex, Neighbor};
pub use cost::{CostModel, EdgeCost};
pub use error::{CostError, CostResult, DataError, DataResult};
pub use graph::{Edge, EdgeAttrs, RawEdge, RawGraph, RawKey, RawNode, RoadGraph, RoadGraphBuilder};
pub use loader::{load_graph_json, load_graph_reader};
