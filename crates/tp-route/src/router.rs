//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait, so an application can swap in
//! another search (A*, bidirectional) without touching the graph crates.
//!
//! # Cost
//!
//! A hop costs `fuel_used * fuel_price + toll`, precomputed in the
//! [`AdjacencyIndex`].  A [`Route`] reports the sum plus its fuel/toll
//! breakdown.

use log::debug;

use tp_core::{EdgeId, NodeId};
use tp_network::{AdjacencyIndex, RoadGraph};

use crate::heap::MinHeap;
use crate::{RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, `start` and `end` inclusive.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order; one fewer than `nodes`.
    pub edges: Vec<EdgeId>,
    /// Sum of hop costs along the route.
    pub total_cost: f64,
    /// Fuel consumed along the route.
    pub fuel_used: f64,
    /// `fuel_used` priced at the index's fuel price.
    pub fuel_cost: f64,
    /// Tolls charged along the route.
    pub toll_cost: f64,
}

impl Route {
    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// `true` if the start and end are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable least-cost routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: many queries may run at once
/// against the same immutable graph and index.
pub trait Router: Send + Sync {
    /// Compute the least-cost route from `from` to `to`.
    ///
    /// Returns `Ok(None)` if no path exists.  `from == to` yields a one-node
    /// route of cost 0.  Fails with [`RouteError`] when either node is not in
    /// `graph` or `index` was built from a different graph.
    fn route(
        &self,
        graph: &RoadGraph,
        index: &AdjacencyIndex,
        from:  NodeId,
        to:    NodeId,
    ) -> RouteResult<Option<Route>>;

    /// Like [`route`](Self::route) but with endpoints named by node key.
    ///
    /// Keys are matched exactly; trimming is the caller's job.
    fn route_by_key(
        &self,
        graph: &RoadGraph,
        index: &AdjacencyIndex,
        from:  &str,
        to:    &str,
    ) -> RouteResult<Option<Route>> {
        let resolve = |key: &str| {
            graph
                .node_id(key)
                .ok_or_else(|| RouteError::InvalidQuery { key: key.to_owned() })
        };
        let from = resolve(from)?;
        let to   = resolve(to)?;
        self.route(graph, index, from, to)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with lazy deletion over the bidirectional
/// [`AdjacencyIndex`].
///
/// Among several equal-cost routes, the one whose nodes were settled first
/// is returned.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &RoadGraph,
        index: &AdjacencyIndex,
        from:  NodeId,
        to:    NodeId,
    ) -> RouteResult<Option<Route>> {
        validate_query(graph, index, from, to)?;
        dijkstra(graph, index, from, to)
    }
}

fn validate_query(
    graph: &RoadGraph,
    index: &AdjacencyIndex,
    from:  NodeId,
    to:    NodeId,
) -> RouteResult<()> {
    if !index.matches(graph) {
        return Err(RouteError::IndexMismatch {
            graph_nodes: graph.node_count(),
            graph_edges: graph.edge_count(),
            index_nodes: index.node_count(),
            index_edges: index.edge_count(),
        });
    }
    for node in [from, to] {
        if !graph.contains(node) {
            return Err(RouteError::UnknownNode(node));
        }
    }
    Ok(())
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Per-query scratch state; dropped when the query returns.
struct SearchState {
    /// dist[v] = best known cost to reach v.
    dist:      Vec<f64>,
    /// prev_edge[v] = edge that reached v; `EdgeId::INVALID` if unreached.
    prev_edge: Vec<EdgeId>,
    /// visited[v] = v's cost is final.
    visited:   Vec<bool>,
    frontier:  MinHeap<NodeId>,
}

impl SearchState {
    fn new(node_count: usize) -> Self {
        Self {
            dist:      vec![f64::INFINITY; node_count],
            prev_edge: vec![EdgeId::INVALID; node_count],
            visited:   vec![false; node_count],
            frontier:  MinHeap::with_capacity(node_count),
        }
    }
}

fn dijkstra(
    graph: &RoadGraph,
    index: &AdjacencyIndex,
    from:  NodeId,
    to:    NodeId,
) -> RouteResult<Option<Route>> {
    let mut state = SearchState::new(graph.node_count());
    state.dist[from.index()] = 0.0;
    state.frontier.insert(from, 0.0);

    let mut settled = 0usize;

    while let Some((node, _)) = state.frontier.extract_min() {
        // Stale entry: node was settled by an earlier, cheaper extraction.
        if state.visited[node.index()] {
            continue;
        }
        state.visited[node.index()] = true;
        settled += 1;

        if node == to {
            break;
        }

        let base = state.dist[node.index()];
        for nb in index.neighbors(node) {
            let candidate = base + nb.cost;
            if candidate < state.dist[nb.node.index()] {
                state.dist[nb.node.index()] = candidate;
                state.prev_edge[nb.node.index()] = nb.edge;
                state.frontier.insert(nb.node, candidate);
            }
        }
    }

    let total = state.dist[to.index()];
    if !total.is_finite() {
        debug!("no route from {from} to {to} ({settled} nodes settled)");
        return Ok(None);
    }

    let route = reconstruct(graph, index, &state.prev_edge, from, to, total)?;
    debug!(
        "route {from} → {to}: {} hops, cost {:.2} ({settled} nodes settled)",
        route.hops(),
        route.total_cost
    );
    Ok(Some(route))
}

/// Walk `prev_edge` back from `to` to `from`.
///
/// `to` is reached, so a chain that does not lead back to `from` means the
/// index and graph disagree.
fn reconstruct(
    graph:     &RoadGraph,
    index:     &AdjacencyIndex,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    total:     f64,
) -> RouteResult<Route> {
    let mut nodes = vec![to];
    let mut edges = Vec::new();
    let mut cur = to;

    while cur != from {
        let broken = RouteError::BrokenChain { node: cur };
        let e = prev_edge[cur.index()];
        if !e.is_valid() || edges.len() >= prev_edge.len() {
            return Err(broken);
        }
        cur = graph.edge(e).and_then(|edge| edge.other(cur)).ok_or(broken)?;
        edges.push(e);
        nodes.push(cur);
    }
    nodes.reverse();
    edges.reverse();

    let (mut fuel_used, mut fuel_cost, mut toll_cost) = (0.0, 0.0, 0.0);
    for &e in &edges {
        let c = index
            .edge_cost(e)
            .ok_or(RouteError::BrokenChain { node: to })?;
        fuel_used += c.fuel_used;
        fuel_cost += c.fuel_cost;
        toll_cost += c.toll;
    }

    Ok(Route { nodes, edges, total_cost: total, fuel_used, fuel_cost, toll_cost })
}
