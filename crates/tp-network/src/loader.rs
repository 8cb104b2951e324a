//! JSON graph loader.
//!
//! # Format
//!
//! ```json
//! {
//!   "nodes": [ { "id": "A", "x": 0, "y": 0 }, { "id": 2, "x": 40, "y": 10 } ],
//!   "edges": [
//!     { "from": "A", "to": 2, "length": 50, "efficiency": 20,
//!       "consumption_factor": 1, "traffic_weight": 1 }
//!   ]
//! }
//! ```
//!
//! Node ids may be strings or integers (see [`crate::graph`]).  Unknown fields
//! are ignored.

use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::graph::{RawGraph, RoadGraph};
use crate::DataResult;

/// Load and validate a road graph from a JSON file.
pub fn load_graph_json(path: &Path) -> DataResult<RoadGraph> {
    debug!("loading road graph from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_graph_reader(BufReader::new(file))
}

/// Like [`load_graph_json`] but accepts any `Read` source.
pub fn load_graph_reader<R: Read>(reader: R) -> DataResult<RoadGraph> {
    let raw: RawGraph = serde_json::from_reader(reader)?;
    RoadGraph::load(raw)
}
