//! Edge cost model: fuel consumption plus toll.
//!
//! # Formulae
//!
//! See [`tp_core::config`] for the full tariff.  In short:
//!
//! ```text
//! fuel_used = length / efficiency * consumption_factor
//! total     = fuel_used * fuel_price + toll
//! ```
//!
//! The toll depends only on edge attributes, never on traversal direction.

use tp_core::{CoreResult, CostConfig, TollPolicy};

use crate::graph::EdgeAttrs;
use crate::{CostError, CostResult};

/// Fuel consumed traversing an edge.
///
/// A zero `efficiency` is rejected rather than producing an infinite value.
pub fn fuel_used(attrs: &EdgeAttrs) -> CostResult<f64> {
    if attrs.efficiency == 0.0 {
        return Err(CostError::DivideByZero {
            length:     attrs.length,
            efficiency: attrs.efficiency,
        });
    }
    finite("fuel_used", attrs.length / attrs.efficiency * attrs.consumption_factor)
}

/// Toll charged for traversing an edge under `policy`.
pub fn toll(attrs: &EdgeAttrs, policy: &TollPolicy) -> f64 {
    if attrs.length <= policy.length_above {
        return 0.0;
    }
    let discount = if attrs.efficiency < policy.discount_below_efficiency {
        policy.efficiency_discount
    } else {
        0.0
    };
    let multiplier = if attrs.traffic_weight > policy.traffic_above {
        policy.traffic_multiplier
    } else {
        1.0
    };
    attrs.length * policy.base_rate * (1.0 - discount) * multiplier
}

fn finite(what: &'static str, value: f64) -> CostResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CostError::NonFinite { what, value })
    }
}

// ── EdgeCost ──────────────────────────────────────────────────────────────────

/// Derived cost annotation of one edge.  Recomputed from the edge attributes
/// and the cost model; never an input.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EdgeCost {
    pub fuel_used: f64,
    /// `fuel_used * fuel_price`.
    pub fuel_cost: f64,
    pub toll: f64,
    /// `fuel_cost + toll`, the search weight of one hop.
    pub total: f64,
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// A validated [`CostConfig`] plus the operations that apply it.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    /// Validate `config` and wrap it.
    pub fn new(config: CostConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Default tariff with a different fuel price.
    pub fn with_fuel_price(fuel_price: f64) -> CoreResult<Self> {
        Self::new(CostConfig::with_fuel_price(fuel_price))
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    pub fn fuel_price(&self) -> f64 {
        self.config.fuel_price
    }

    #[inline]
    pub fn fuel_used(&self, attrs: &EdgeAttrs) -> CostResult<f64> {
        fuel_used(attrs)
    }

    #[inline]
    pub fn toll(&self, attrs: &EdgeAttrs) -> f64 {
        toll(attrs, &self.config.toll)
    }

    /// Full cost annotation of one edge.
    pub fn edge_cost(&self, attrs: &EdgeAttrs) -> CostResult<EdgeCost> {
        let fuel_used = fuel_used(attrs)?;
        let fuel_cost = finite("fuel_cost", fuel_used * self.config.fuel_price)?;
        let toll      = finite("toll", self.toll(attrs))?;
        let total     = finite("total cost", fuel_cost + toll)?;
        Ok(EdgeCost { fuel_used, fuel_cost, toll, total })
    }
}
