//! `tp-route` — least-cost route search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`heap`]   | `MinHeap`, binary min-heap keyed by tentative cost         |
//! | [`router`] | `Router` trait, `Route`, `DijkstraRouter`                  |
//! | [`report`] | `RouteReport`, route with node keys, for output            |
//! | [`batch`]  | `route_many`, many queries against one graph/index         |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                             |
//!
//! # Outcomes
//!
//! A query returns `Ok(Some(route))`, `Ok(None)` when start and end are
//! disconnected, or `Err(RouteError)` when the query itself is invalid.  No
//! path is an ordinary answer, not an error.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `route_many` runs queries on Rayon's thread pool.      |
//! | `serde`    | `RouteReport` implements `Serialize`.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tp_network::{load_graph_json, AdjacencyIndex, CostModel};
//! use tp_route::{DijkstraRouter, RouteReport, Router};
//!
//! let graph = load_graph_json(Path::new("data/points.json"))?;
//! let index = AdjacencyIndex::build(&graph, CostModel::default())?;
//! match DijkstraRouter.route_by_key(&graph, &index, "A", "C")? {
//!     Some(route) => println!("{}", RouteReport::new(&graph, &route)?),
//!     None        => println!("No path found!"),
//! }
//! ```

pub mod batch;
pub mod error;
pub mod heap;
pub mod report;
pub mod router;

#[cfg(test)]
mod tests;

pub use batch::route_many;
pub use error::{RouteError, RouteResult};
pub use heap::MinHeap;
pub use report::RouteReport;
pub use router::{DijkstraRouter, Route, Router};
