//! Route-query error type.

use thiserror::Error;

use tp_core::NodeId;

/// A query that cannot be answered.  "No path" is not an error; see
/// [`Router::route`](crate::Router::route).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("invalid query: no node with key {key:?}")]
    InvalidQuery { key: String },

    #[error("invalid query: {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error(
        "adjacency index ({index_nodes} nodes, {index_edges} edges) does not match \
         graph ({graph_nodes} nodes, {graph_edges} edges)"
    )]
    IndexMismatch {
        graph_nodes: usize,
        graph_edges: usize,
        index_nodes: usize,
        index_edges: usize,
    },

    #[error("route to {node} cannot be traced back over the graph's edges")]
    BrokenChain { node: NodeId },
}

pub type RouteResult<T> = Result<T, RouteError>;
