//! The `Trade` value: a single fill between an incoming and a resting order.

use super::order::{Execution, Side};
use serde::{Deserialize, Serialize};

/// A record of one fill emitted while executing an aggressor against the book.
///
/// `price` is always the *resting* counterparty's price — price improvement
/// always accrues to the aggressor — and `timestamp` is the matching tick's
/// timestamp, not either order's original submission timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// The incoming (aggressor) order's side.
    pub side: Side,
    /// The resting counterparty's price.
    pub price: f64,
    /// Size of this fill.
    pub size: f64,
    /// Id of the incoming order.
    pub incoming_order_id: String,
    /// Id of the resting order this fill was matched against.
    pub book_order_id: String,
    /// The aggressor's execution kind.
    pub execution: Execution,
    /// Opaque unique identifier for this trade.
    pub trade_id: String,
    /// The tick timestamp at which this trade was produced.
    pub timestamp: i64,
}
