//! Cost configuration.
//!
//! # Cost of one hop
//!
//! ```text
//! fuel_used = length / efficiency * consumption_factor
//! toll      = length * base_rate * (1 - discount) * multiplier   if length > length_above
//!           = 0                                                   otherwise
//!
//! discount   = efficiency_discount  if efficiency < discount_below_efficiency, else 0
//! multiplier = traffic_multiplier   if traffic_weight > traffic_above,         else 1
//!
//! hop cost  = fuel_used * fuel_price + toll
//! ```
//!
//! `fuel_price` is the only parameter normally tuned at runtime.  The toll
//! constants are fixed policy; they are exposed here so tests and alternative
//! tariffs can override them.

use crate::{CoreError, CoreResult};

// ── TollPolicy ────────────────────────────────────────────────────────────────

/// Tariff rules used to derive the toll charged on an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TollPolicy {
    /// Toll per unit of length before discount and multiplier.  Default: 1.0.
    pub base_rate: f64,
    /// Fractional discount for low-efficiency roads.  Default: 0.2.
    pub efficiency_discount: f64,
    /// The discount applies when `efficiency` is strictly below this.  Default: 14.
    pub discount_below_efficiency: f64,
    /// Surcharge multiplier for congested roads.  Default: 1.5.
    pub traffic_multiplier: f64,
    /// The multiplier applies when `traffic_weight` is strictly above this.  Default: 1.2.
    pub traffic_above: f64,
    /// Edges no longer than this are toll-free.  Default: 100.
    pub length_above: f64,
}

impl TollPolicy {
    pub const BASE_RATE: f64 = 1.0;
    pub const EFFICIENCY_DISCOUNT: f64 = 0.2;
    pub const DISCOUNT_BELOW_EFFICIENCY: f64 = 14.0;
    pub const TRAFFIC_MULTIPLIER: f64 = 1.5;
    pub const TRAFFIC_ABOVE: f64 = 1.2;
    pub const LENGTH_ABOVE: f64 = 100.0;

    /// A policy that never charges a toll (pure fuel routing).
    pub fn toll_free() -> Self {
        Self { base_rate: 0.0, ..Self::default() }
    }

    pub fn validate(&self) -> CoreResult<()> {
        non_negative("toll.base_rate", self.base_rate)?;
        non_negative("toll.discount_below_efficiency", self.discount_below_efficiency)?;
        non_negative("toll.traffic_multiplier", self.traffic_multiplier)?;
        non_negative("toll.traffic_above", self.traffic_above)?;
        non_negative("toll.length_above", self.length_above)?;
        non_negative("toll.efficiency_discount", self.efficiency_discount)?;
        if self.efficiency_discount > 1.0 {
            return Err(CoreError::Config(format!(
                "toll.efficiency_discount must be within [0, 1], got {}",
                self.efficiency_discount
            )));
        }
        Ok(())
    }
}

impl Default for TollPolicy {
    fn default() -> Self {
        Self {
            base_rate:                 Self::BASE_RATE,
            efficiency_discount:       Self::EFFICIENCY_DISCOUNT,
            discount_below_efficiency: Self::DISCOUNT_BELOW_EFFICIENCY,
            traffic_multiplier:        Self::TRAFFIC_MULTIPLIER,
            traffic_above:             Self::TRAFFIC_ABOVE,
            length_above:              Self::LENGTH_ABOVE,
        }
    }
}

// ── CostConfig ────────────────────────────────────────────────────────────────

/// Parameters of the combined fuel + toll cost.
///
/// Typically built with `CostConfig::default()` and an overridden
/// `fuel_price`, or loaded from a JSON file by the application crate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostConfig {
    /// Price of one unit of fuel.  Default: 1.0.
    pub fuel_price: f64,
    pub toll: TollPolicy,
}

impl CostConfig {
    pub const DEFAULT_FUEL_PRICE: f64 = 1.0;

    pub fn with_fuel_price(fuel_price: f64) -> Self {
        Self { fuel_price, ..Self::default() }
    }

    /// Check every parameter is finite and of the right sign.
    pub fn validate(&self) -> CoreResult<()> {
        non_negative("fuel_price", self.fuel_price)?;
        self.toll.validate()
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            fuel_price: Self::DEFAULT_FUEL_PRICE,
            toll:       TollPolicy::default(),
        }
    }
}

fn non_negative(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}
