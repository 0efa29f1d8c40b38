//! # Order Matching Engine
//!
//! A continuous double-auction order matching engine: a two-sided,
//! price-level order book under strict price-time priority, driven by an
//! externally supplied sequence of timestamps and orders.
//!
//! ## Key properties
//!
//! - **Price-time priority.** The aggressor always consumes the best
//!   available opposite price first; within a price, the earliest resting
//!   order fills first.
//! - **Market-order sentinels.** A market order is modelled with a sentinel
//!   price (`+inf` for BUY, `0` for SELL) rather than a separate order
//!   variant, so the same comparison logic handles both limit and market
//!   orders.
//! - **Synchronous, single-threaded core.** [`MatchingEngine::tick`] is the
//!   sole mutation entry point; it runs to completion and returns every
//!   trade produced during that call. There is no internal clock — callers
//!   supply the tick timestamp.
//! - **Time-based expiration.** Resting orders past their `expiration` are
//!   cancelled synchronously at the start of the tick that reaches them.
//!
//! ## Example
//!
//! ```
//! use orderbook_rs::{MatchingEngine, Order, Side};
//!
//! let mut engine = MatchingEngine::with_seed(7);
//! engine.tick(0, [Order::limit_default_digits(Side::Sell, 3.0, 1.0, 0, "abc", "maker", None)]);
//! let trades = engine.tick(1, [Order::limit_default_digits(Side::Buy, 4.0, 1.0, 1, "xyz", "taker", None)]);
//! assert_eq!(trades.len(), 1);
//! ```
//!
//! ## Out of scope
//!
//! Tabular/DataFrame rendering, schema validation, persistence, and network
//! transport are not part of this crate; the `snapshot` row types
//! ([`BookSummaryRow`], [`TradeLogRow`], [`OrderRow`]) are the abstract
//! boundary a caller hands to those external concerns.

pub mod config;
pub mod orderbook;
pub mod prelude;

pub use config::EngineConfig;
pub use orderbook::{
    market_sentinel_price, validate_new_order, BookSummaryRow, ExecutedTrades, Execution,
    MatchingEngine, Order, OrderAdmissionError, OrderBook, OrderQueue, OrderRow, PriceLevels,
    Side, Status, Trade, TradeIdGenerator, TradeLogRow, DEFAULT_PRICE_DIGITS,
};
