//! Bidirectional adjacency index with precomputed hop costs.
//!
//! # Data layout
//!
//! Compressed Sparse Row, as in a directed road network, except that every
//! stored edge contributes two entries: `from → to` and `to → from`.  Given a
//! `NodeId n`, its neighbor entries occupy:
//!
//! ```text
//! entry_*[ row_start[n] .. row_start[n+1] ]
//! ```
//!
//! Entries of one node keep edge-list order.  Each entry carries the hop cost
//! directly so the search never looks an edge up by endpoints.
//!
//! The index is a cache derived from one `RoadGraph` and one `CostModel`.  It
//! is never mutated after `build`; build a new one when either input changes.

use log::debug;

use tp_core::{EdgeId, NodeId};

use crate::cost::{CostModel, EdgeCost};
use crate::graph::RoadGraph;
use crate::{DataError, DataResult};

/// One neighbor entry: reach `node` over `edge` for `cost`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub edge: EdgeId,
    pub cost: f64,
}

pub struct AdjacencyIndex {
    /// CSR row pointer.  Length = `node_count + 1`.
    row_start: Vec<usize>,

    entry_node: Vec<NodeId>,
    entry_edge: Vec<EdgeId>,
    entry_cost: Vec<f64>,

    /// Cost annotation per stored edge, indexed by `EdgeId`.
    edge_costs: Vec<EdgeCost>,

    /// `(from, to)` of each source edge, indexed by `EdgeId`.
    edge_ends: Vec<(NodeId, NodeId)>,

    model: CostModel,
}

impl AdjacencyIndex {
    /// Derive every edge's cost under `model` and index both directions.
    ///
    /// Time complexity: O(N + E).
    pub fn build(graph: &RoadGraph, model: CostModel) -> DataResult<Self> {
        let node_count = graph.node_count();
        let edges = graph.edges();

        let edge_costs = edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                model
                    .edge_cost(&e.attrs)
                    .map_err(|source| DataError::Cost { edge: EdgeId(i as u32), source })
            })
            .collect::<DataResult<Vec<EdgeCost>>>()?;

        // Row pointer: count both directions per edge, then prefix-sum.
        let mut row_start = vec![0usize; node_count + 1];
        for e in edges {
            row_start[e.from.index() + 1] += 1;
            row_start[e.to.index() + 1] += 1;
        }
        for i in 1..=node_count {
            row_start[i] += row_start[i - 1];
        }
        let entry_count = row_start[node_count];
        debug_assert_eq!(entry_count, edges.len() * 2);

        // Fill in scan order so each row keeps edge-list order.
        let mut cursor     = row_start.clone();
        let mut entry_node = vec![NodeId::INVALID; entry_count];
        let mut entry_edge = vec![EdgeId::INVALID; entry_count];
        let mut entry_cost = vec![0.0f64; entry_count];

        for (i, e) in edges.iter().enumerate() {
            let id   = EdgeId(i as u32);
            let cost = edge_costs[i].total;
            for (at, to) in [(e.from, e.to), (e.to, e.from)] {
                let slot = cursor[at.index()];
                entry_node[slot] = to;
                entry_edge[slot] = id;
                entry_cost[slot] = cost;
                cursor[at.index()] += 1;
            }
        }

        debug!(
            "adjacency index built: {} nodes, {} entries, fuel price {}",
            node_count,
            entry_count,
            model.fuel_price()
        );

        let edge_ends = edges.iter().map(|e| (e.from, e.to)).collect();

        Ok(Self { row_start, entry_node, entry_edge, entry_cost, edge_costs, edge_ends, model })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.row_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_costs.len()
    }

    /// Number of neighbor entries (twice the edge count).
    pub fn entry_count(&self) -> usize {
        self.entry_node.len()
    }

    /// `true` if this index was built from a graph with `graph`'s nodes and
    /// edge endpoints.  O(E).
    pub fn matches(&self, graph: &RoadGraph) -> bool {
        self.node_count() == graph.node_count()
            && self.edge_ends.len() == graph.edge_count()
            && self
                .edge_ends
                .iter()
                .zip(graph.edges())
                .all(|(&(from, to), e)| from == e.from && to == e.to)
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Neighbor entries of `node`, in edge-list order.
    ///
    /// # Panics
    /// Panics if `node` is not a node of the indexed graph.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = Neighbor> + '_ {
        let start = self.row_start[node.index()];
        let end   = self.row_start[node.index() + 1];
        (start..end).map(move |i| Neighbor {
            node: self.entry_node[i],
            edge: self.entry_edge[i],
            cost: self.entry_cost[i],
        })
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.row_start[node.index() + 1] - self.row_start[node.index()]
    }

    /// Cost annotation of a stored edge.
    pub fn edge_cost(&self, edge: EdgeId) -> Option<&EdgeCost> {
        self.edge_costs.get(edge.index())
    }
}
