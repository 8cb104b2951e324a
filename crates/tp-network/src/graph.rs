//! Road graph representation, input records, and builder.
//!
//! # Identifiers
//!
//! Input data names nodes by an external key that may be a JSON string or a
//! JSON integer.  Both coerce to one `String` key (`7` and `"7"` are the same
//! node); anything else fails to decode.  Inside the graph each node gets a
//! dense [`NodeId`] in load order, and each stored edge an [`EdgeId`].
//!
//! # Validation
//!
//! [`RoadGraphBuilder::build`] (and therefore [`RoadGraph::load`]) checks, in
//! order:
//!
//! 1. node keys are non-empty and unique,
//! 2. both endpoints of every edge name a loaded node,
//! 3. `length`, `efficiency`, `consumption_factor`, `traffic_weight` are
//!    finite and non-negative,
//! 4. fuel use can be derived (a zero `efficiency` is reported as
//!    [`CostError::DivideByZero`](crate::CostError::DivideByZero)).
//!
//! The first violation aborts the build.

use log::debug;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use tp_core::{EdgeId, NodeId, Point};

use crate::cost;
use crate::{DataError, DataResult};

// ── Raw input records ─────────────────────────────────────────────────────────

/// A node identifier as decoded from input data.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawKey {
    Int(i64),
    Text(String),
}

impl RawKey {
    /// Coerce to the graph's single key type.
    pub fn into_key(self) -> String {
        match self {
            RawKey::Int(n) => n.to_string(),
            RawKey::Text(s) => s,
        }
    }
}

impl From<&str> for RawKey {
    fn from(s: &str) -> Self {
        RawKey::Text(s.to_owned())
    }
}

impl From<i64> for RawKey {
    fn from(n: i64) -> Self {
        RawKey::Int(n)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RawNode {
    pub id: RawKey,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// One edge as decoded from input data.  Derived values such as `fuelUsed` or
/// `toll` are not read even if present.
#[derive(Deserialize, Clone, Debug)]
pub struct RawEdge {
    pub from: RawKey,
    pub to: RawKey,
    pub length: f64,
    pub efficiency: f64,
    pub consumption_factor: f64,
    /// Absent in some datasets; 1.0 is uncongested.
    #[serde(default = "uncongested")]
    pub traffic_weight: f64,
}

fn uncongested() -> f64 {
    1.0
}

impl RawEdge {
    pub fn attrs(&self) -> EdgeAttrs {
        EdgeAttrs {
            length:             self.length,
            efficiency:         self.efficiency,
            consumption_factor: self.consumption_factor,
            traffic_weight:     self.traffic_weight,
        }
    }
}

/// The decoded `{ nodes: [...], edges: [...] }` record.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// Physical and economic attributes of a road segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAttrs {
    /// Physical distance.
    pub length: f64,
    /// Distance per unit of fuel.
    pub efficiency: f64,
    /// Fuel-price or unit-conversion multiplier.
    pub consumption_factor: f64,
    /// Congestion multiplier.
    pub traffic_weight: f64,
}

impl EdgeAttrs {
    pub fn new(length: f64, efficiency: f64, consumption_factor: f64, traffic_weight: f64) -> Self {
        Self { length, efficiency, consumption_factor, traffic_weight }
    }

    /// `(field name, value)` pairs in validation order.
    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("length",             self.length),
            ("efficiency",         self.efficiency),
            ("consumption_factor", self.consumption_factor),
            ("traffic_weight",     self.traffic_weight),
        ]
    }
}

/// A stored road segment.  `from`/`to` are the nominal direction; the search
/// treats every edge as traversable both ways.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub attrs: EdgeAttrs,
}

impl Edge {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Validated, immutable road graph.
///
/// Do not construct directly; use [`RoadGraph::load`] or [`RoadGraphBuilder`].
#[derive(Debug, Clone)]
pub struct RoadGraph {
    node_keys: Vec<String>,
    node_pos:  Vec<Point>,
    key_index: FxHashMap<String, NodeId>,
    edges:     Vec<Edge>,
}

impl RoadGraph {
    /// Validate a decoded graph record and build the graph.
    pub fn load(raw: RawGraph) -> DataResult<RoadGraph> {
        let mut b = RoadGraphBuilder::with_capacity(raw.nodes.len(), raw.edges.len());
        for node in raw.nodes {
            b.add_node(node.id.into_key(), Point::new(node.x, node.y));
        }
        for edge in raw.edges {
            let attrs = edge.attrs();
            b.add_road(edge.from.into_key(), edge.to.into_key(), attrs);
        }
        b.build()
    }

    /// Construct a graph with no nodes or edges.
    pub fn empty() -> Self {
        Self {
            node_keys: Vec::new(),
            node_pos:  Vec::new(),
            key_index: FxHashMap::default(),
            edges:     Vec::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_keys.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// O(1) key → id lookup.
    #[inline]
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.key_index.get(key).copied()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_keys.len()
    }

    pub fn node_key(&self, node: NodeId) -> Option<&str> {
        self.node_keys.get(node.index()).map(String::as_str)
    }

    pub fn node_pos(&self, node: NodeId) -> Option<Point> {
        self.node_pos.get(node.index()).copied()
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge.index())
    }

    /// All stored edges, indexed by `EdgeId`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_keys.len()).map(|i| NodeId(i as u32))
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes and edges are named by key, so edges may be added before their
/// endpoints.  All validation happens in `build()`.
///
/// # Example
///
/// ```
/// use tp_core::Point;
/// use tp_network::{EdgeAttrs, RoadGraphBuilder};
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_node("A", Point::new(0.0, 0.0));
/// b.add_node("B", Point::new(10.0, 0.0));
/// b.add_road("A", "B", EdgeAttrs::new(50.0, 20.0, 1.0, 1.0));
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct RoadGraphBuilder {
    nodes: Vec<(String, Point)>,
    roads: Vec<PendingRoad>,
}

struct PendingRoad {
    from:  String,
    to:    String,
    attrs: EdgeAttrs,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            roads: Vec::with_capacity(roads),
        }
    }

    /// Add a node.  Ids are assigned sequentially from 0 in call order.
    pub fn add_node(&mut self, key: impl Into<String>, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((key.into(), pos));
        id
    }

    /// Add a road segment with nominal direction `from` → `to`.
    pub fn add_road(&mut self, from: impl Into<String>, to: impl Into<String>, attrs: EdgeAttrs) -> EdgeId {
        let id = EdgeId(self.roads.len() as u32);
        self.roads.push(PendingRoad { from: from.into(), to: to.into(), attrs });
        id
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.roads.len() }

    /// Validate and produce a [`RoadGraph`].
    pub fn build(self) -> DataResult<RoadGraph> {
        if u32::try_from(self.nodes.len()).is_err() {
            return Err(DataError::TooLarge("nodes"));
        }
        if u32::try_from(self.roads.len()).is_err() {
            return Err(DataError::TooLarge("edges"));
        }

        // ── Nodes ─────────────────────────────────────────────────────────
        let mut key_index: FxHashMap<String, NodeId> = FxHashMap::default();
        key_index.reserve(self.nodes.len());
        let mut node_keys = Vec::with_capacity(self.nodes.len());
        let mut node_pos  = Vec::with_capacity(self.nodes.len());

        for (i, (key, pos)) in self.nodes.into_iter().enumerate() {
            if key.is_empty() {
                return Err(DataError::InvalidIdentifier(key));
            }
            if key_index.insert(key.clone(), NodeId(i as u32)).is_some() {
                return Err(DataError::DuplicateNode(key));
            }
            node_keys.push(key);
            node_pos.push(pos);
        }

        // ── Edges ─────────────────────────────────────────────────────────
        let mut edges = Vec::with_capacity(self.roads.len());
        for (i, road) in self.roads.into_iter().enumerate() {
            let id = EdgeId(i as u32);
            let resolve = |endpoint: &'static str, key: String| {
                key_index
                    .get(&key)
                    .copied()
                    .ok_or(DataError::DanglingEndpoint { edge: id, endpoint, key })
            };
            let from = resolve("from", road.from)?;
            let to   = resolve("to", road.to)?;

            validate_attrs(id, &road.attrs)?;
            edges.push(Edge { from, to, attrs: road.attrs });
        }

        debug!("road graph built: {} nodes, {} edges", node_keys.len(), edges.len());

        Ok(RoadGraph { node_keys, node_pos, key_index, edges })
    }
}

fn validate_attrs(edge: EdgeId, attrs: &EdgeAttrs) -> DataResult<()> {
    for (field, value) in attrs.fields() {
        if !value.is_finite() || value < 0.0 {
            return Err(DataError::InvalidAttribute { edge, field, value });
        }
    }
    cost::fuel_used(attrs).map_err(|source| DataError::Cost { edge, source })?;
    Ok(())
}
