//! Route output keyed by node identifiers.
//!
//! A [`Route`] speaks in dense `NodeId`s; `RouteReport` maps them back to the
//! keys the input used, which is what renderers and text output need.

use std::fmt;

use tp_network::RoadGraph;

use crate::{Route, RouteError, RouteResult};

/// `{ "path": [...], "totalCost": ... }` plus the fuel/toll breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteReport {
    pub path:       Vec<String>,
    pub total_cost: f64,
    pub fuel_used:  f64,
    pub fuel_cost:  f64,
    pub toll_cost:  f64,
}

impl RouteReport {
    /// Fails with [`RouteError::UnknownNode`] if `route` names a node that
    /// `graph` does not have.
    pub fn new(graph: &RoadGraph, route: &Route) -> RouteResult<Self> {
        let path = route
            .nodes
            .iter()
            .map(|&n| {
                graph
                    .node_key(n)
                    .map(str::to_owned)
                    .ok_or(RouteError::UnknownNode(n))
            })
            .collect::<RouteResult<Vec<String>>>()?;
        Ok(Self {
            path,
            total_cost: route.total_cost,
            fuel_used:  route.fuel_used,
            fuel_cost:  route.fuel_cost,
            toll_cost:  route.toll_cost,
        })
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Best Route: {} | Fuel Cost: {:.2} | Toll Cost: {:.2} | Total Cost: {:.2}",
            self.path.join(" → "),
            self.fuel_cost,
            self.toll_cost,
            self.total_cost
        )
    }
}
