//! Programmatic configuration for a [`crate::MatchingEngine`].
//!
//! There is no file-loading or environment-variable surface here on
//! purpose: configuration is an in-process builder value, constructed and
//! attached by the embedding application rather than parsed from an
//! external format.

use crate::orderbook::DEFAULT_PRICE_DIGITS;
use serde::{Deserialize, Serialize};

/// Default half-width of the price band used by [`crate::OrderBook::imbalance_default`].
pub const DEFAULT_IMBALANCE_BAND: f64 = 0.1;

/// Small set of knobs shared across orders admitted to the same engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decimal places a new order's price is rounded to when the caller
    /// does not specify a precision explicitly.
    pub price_digits: u32,
    /// Half-width `L` of the price band `OrderBook::imbalance_default` uses.
    pub default_imbalance_band: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            price_digits: DEFAULT_PRICE_DIGITS,
            default_imbalance_band: DEFAULT_IMBALANCE_BAND,
        }
    }
}

impl EngineConfig {
    /// A config with the stated rounding precision and imbalance band.
    pub fn new(price_digits: u32, default_imbalance_band: f64) -> Self {
        EngineConfig {
            price_digits,
            default_imbalance_band,
        }
    }
}
