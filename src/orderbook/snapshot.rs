//! Flat, tabular row types for the book-summary, trade-log, and order
//! snapshot contracts (`SPEC_FULL.md` §6).
//!
//! These are plain `serde`-serializable records; schema *validation* of the
//! resulting table is explicitly out of scope (any tabular/DataFrame library
//! can consume the `Vec<Row>` these produce).

use super::order::{Execution, Order, Side, Status};
use super::trade::Trade;
use serde::{Deserialize, Serialize};

/// One row of [`crate::OrderBook::summary`]: aggregate depth at a single
/// price on a single side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookSummaryRow {
    /// "BUY" or "SELL".
    pub side: Side,
    /// Unique within a side.
    pub price: f64,
    /// Sum of resting sizes at this price.
    pub size: f64,
    /// Number of resting orders at this price.
    pub count: usize,
}

/// One row of an [`crate::ExecutedTrades`] tabular export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLogRow {
    /// The aggressor's side.
    pub side: Side,
    /// The resting counterparty's price.
    pub price: f64,
    /// Fill size.
    pub size: f64,
    /// Tick timestamp the trade was produced at.
    pub timestamp: i64,
    /// Id of the incoming (aggressor) order.
    pub incoming_order_id: String,
    /// Id of the resting order.
    pub book_order_id: String,
    /// Opaque unique trade identifier.
    pub trade_id: String,
    /// "LIMIT" or "MARKET".
    pub execution: Execution,
}

impl From<&Trade> for TradeLogRow {
    fn from(trade: &Trade) -> Self {
        TradeLogRow {
            side: trade.side,
            price: trade.price,
            size: trade.size,
            timestamp: trade.timestamp,
            incoming_order_id: trade.incoming_order_id.clone(),
            book_order_id: trade.book_order_id.clone(),
            trade_id: trade.trade_id.clone(),
            execution: trade.execution,
        }
    }
}

/// One row of an [`crate::orderbook::queue::OrderQueue::to_snapshot`] export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// "BUY" or "SELL".
    pub side: Side,
    /// Limit price, or the market sentinel.
    pub price: f64,
    /// Remaining size.
    pub size: f64,
    /// Submission timestamp.
    pub timestamp: i64,
    /// Caller-supplied order id.
    pub order_id: String,
    /// Opaque trader id.
    pub trader_id: String,
    /// "LIMIT" or "MARKET".
    pub execution: Execution,
    /// Optional expiration timestamp.
    pub expiration: Option<i64>,
    /// "OPEN" or "CANCEL".
    pub status: Status,
    /// Decimal places this order's price was rounded to.
    pub price_digits: u32,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        OrderRow {
            side: order.side,
            price: order.price,
            size: order.size,
            timestamp: order.timestamp,
            order_id: order.order_id.clone(),
            trader_id: order.trader_id.clone(),
            execution: order.execution,
            expiration: order.expiration,
            status: order.status,
            price_digits: order.price_digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::order::Side;

    #[test]
    fn book_summary_row_serializes_side_as_name() {
        let row = BookSummaryRow {
            side: Side::Buy,
            price: 1.1,
            size: 12.0,
            count: 1,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"BUY\""));
    }

    #[test]
    fn order_row_round_trips_through_json() {
        let order = Order::limit_default_digits(Side::Sell, 2.5, 3.0, 10, "id", "trader", None);
        let row = OrderRow::from(&order);
        let json = serde_json::to_string(&row).unwrap();
        let back: OrderRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
