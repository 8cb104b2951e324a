//! Many independent queries against one graph and index.
//!
//! The graph and index are only read, so queries need no coordination.  With
//! the `parallel` feature they run on Rayon's thread pool.

use tp_core::NodeId;
use tp_network::{AdjacencyIndex, RoadGraph};

use crate::{Route, RouteResult, Router};

/// Answer every `(from, to)` query.  Results are in query order.
pub fn route_many<R: Router>(
    router:  &R,
    graph:   &RoadGraph,
    index:   &AdjacencyIndex,
    queries: &[(NodeId, NodeId)],
) -> Vec<RouteResult<Option<Route>>> {
    #[cfg(not(feature = "parallel"))]
    {
        queries
            .iter()
            .map(|&(from, to)| router.route(graph, index, from, to))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|&(from, to)| router.route(graph, index, from, to))
            .collect()
    }
}
