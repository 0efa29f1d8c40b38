/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types, traits, and functions from the orderbook-rs crate. Instead of
//! importing each type individually, you can use:
//!
//! ```rust
//! use orderbook_rs::prelude::*;
//! ```
//!
//! This will import all the essential types needed for working with the order book.

// Core engine and book types
pub use crate::orderbook::{MatchingEngine, OrderBook, PriceLevels};

// Domain value types
pub use crate::orderbook::{Execution, Order, Side, Status, Trade, DEFAULT_PRICE_DIGITS};

// Supporting collections
pub use crate::orderbook::{ExecutedTrades, OrderQueue, TradeIdGenerator};

// Snapshot row types
pub use crate::orderbook::{BookSummaryRow, OrderRow, TradeLogRow};

// Admission validation
pub use crate::orderbook::{validate_new_order, OrderAdmissionError};

// Configuration
pub use crate::config::EngineConfig;
