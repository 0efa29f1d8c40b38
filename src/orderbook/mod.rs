//! The order book and matching engine: two-sided price-level storage,
//! per-level FIFO queues, and the per-tick matching algorithm.

mod book;
mod engine;
mod error;
mod executed_trades;
mod id_gen;
mod order;
mod queue;
mod snapshot;
mod trade;

pub use book::{OrderBook, PriceLevels};
pub use engine::MatchingEngine;
pub use error::{validate_new_order, OrderAdmissionError};
pub use executed_trades::ExecutedTrades;
pub use id_gen::TradeIdGenerator;
pub use order::{market_sentinel_price, Execution, Order, Side, Status, DEFAULT_PRICE_DIGITS};
pub use queue::OrderQueue;
pub use snapshot::{BookSummaryRow, OrderRow, TradeLogRow};
pub use trade::Trade;
