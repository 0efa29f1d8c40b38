//! Order side/execution/status tags and the `Order` value type.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Which side of the book an order belongs to.
///
/// Ordered by a fixed integer tag (`BUY` < `SELL`) so the enum can be used
/// as a tie-break key in tests without requiring a separate comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// A bid: an order to buy at or below its price.
    Buy,
    /// An offer: an order to sell at or above its price.
    Sell,
}

impl Side {
    fn tag(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Short, upper-case name matching the tabular snapshot contract.
    pub fn name(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl PartialOrd for Side {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Side {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag())
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an order carries a user-supplied price (`Limit`) or crosses at
/// whatever price is available (`Market`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Execution {
    /// No price constraint; the order is given a sentinel price so it
    /// always crosses the best available opposite price.
    Market,
    /// The order carries a caller-supplied limit price.
    Limit,
}

impl Execution {
    fn tag(self) -> u8 {
        match self {
            Execution::Market => 0,
            Execution::Limit => 1,
        }
    }

    /// Name matching the tabular snapshot contract.
    pub fn name(self) -> &'static str {
        match self {
            Execution::Market => "MARKET",
            Execution::Limit => "LIMIT",
        }
    }
}

impl PartialOrd for Execution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Execution {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag())
    }
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a resting order is still live, or a caller has requested its removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Live and eligible to match.
    Open,
    /// A resubmission requesting removal from the book.
    Cancel,
}

impl Status {
    fn tag(self) -> u8 {
        match self {
            Status::Open => 0,
            Status::Cancel => 1,
        }
    }

    /// Name matching the tabular snapshot contract.
    pub fn name(self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Cancel => "CANCEL",
        }
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag())
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Default number of decimal places an order's price is rounded to at
/// construction when the caller does not specify one.
pub const DEFAULT_PRICE_DIGITS: u32 = 1;

/// A single resting or incoming order.
///
/// `price`, `side`, and `order_id` are immutable once the order has been
/// admitted to the book; only `size` (strictly non-increasing) and `status`
/// (`Open` → `Cancel`, via a caller resubmission) ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Buy or sell.
    pub side: Side,
    /// Limit price, or a sentinel price for market orders (`+inf` for a BUY
    /// market order, `0` for a SELL market order). Rounded to `price_digits`
    /// decimal places at construction.
    pub price: f64,
    /// Remaining size. Strictly positive while resting; decays toward zero
    /// as the order is matched.
    pub size: f64,
    /// Submission timestamp, in milliseconds since the Unix epoch. Used as
    /// the primary ordering key for time priority.
    pub timestamp: i64,
    /// Caller-supplied identifier, unique across currently live orders.
    pub order_id: String,
    /// Opaque identifier of the submitting trader.
    pub trader_id: String,
    /// Limit or market.
    pub execution: Execution,
    /// Absolute timestamp after which the engine treats this order as
    /// cancelled. `None` means the order never expires.
    pub expiration: Option<i64>,
    /// `Open` on admission; a resubmission with `Cancel` requests removal.
    pub status: Status,
    /// Decimal places `price` was rounded to at construction.
    pub price_digits: u32,
}

impl Order {
    /// Construct a limit order, rounding `price` to `price_digits` decimal places.
    #[allow(clippy::too_many_arguments)]
    pub fn limit(
        side: Side,
        price: f64,
        size: f64,
        timestamp: i64,
        order_id: impl Into<String>,
        trader_id: impl Into<String>,
        expiration: Option<i64>,
        price_digits: u32,
    ) -> Self {
        Order {
            side,
            price: round_to(price, price_digits),
            size,
            timestamp,
            order_id: order_id.into(),
            trader_id: trader_id.into(),
            execution: Execution::Limit,
            expiration,
            status: Status::Open,
            price_digits,
        }
    }

    /// Construct a limit order using the default rounding precision.
    pub fn limit_default_digits(
        side: Side,
        price: f64,
        size: f64,
        timestamp: i64,
        order_id: impl Into<String>,
        trader_id: impl Into<String>,
        expiration: Option<i64>,
    ) -> Self {
        Self::limit(
            side,
            price,
            size,
            timestamp,
            order_id,
            trader_id,
            expiration,
            DEFAULT_PRICE_DIGITS,
        )
    }

    /// Construct a market order. Its price is set to the side's sentinel
    /// value (`+inf` for BUY, `0` for SELL) rather than any caller-supplied
    /// price, so the standard price-priority comparison always crosses.
    pub fn market(
        side: Side,
        size: f64,
        timestamp: i64,
        order_id: impl Into<String>,
        trader_id: impl Into<String>,
        expiration: Option<i64>,
    ) -> Self {
        Order {
            side,
            price: market_sentinel_price(side),
            size,
            timestamp,
            order_id: order_id.into(),
            trader_id: trader_id.into(),
            execution: Execution::Market,
            expiration,
            status: Status::Open,
            price_digits: DEFAULT_PRICE_DIGITS,
        }
    }

    /// Attach an expiration timestamp to an otherwise-constructed order.
    pub fn with_expiration(mut self, expiration: i64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Construct a cancel message for a previously admitted order. Only
    /// `order_id` is looked at by [`crate::orderbook::queue::OrderQueue::remove`]
    /// and [`crate::OrderBook::remove`]; the remaining fields are carried
    /// for symmetry with `Open` orders flowing through the same pipeline.
    pub fn cancel_of(mut self, timestamp: i64) -> Self {
        self.status = Status::Cancel;
        self.timestamp = timestamp;
        self
    }

    /// Mark this resting order as cancelled by expiration, leaving its
    /// original submission `timestamp` untouched so it still interleaves by
    /// its own time against the rest of the same-tick batch. Unlike
    /// [`Self::cancel_of`], which models a caller-authored cancel message
    /// that legitimately carries a new submission time, expiry is not a new
    /// submission.
    pub fn expire(mut self) -> Self {
        self.status = Status::Cancel;
        self
    }
}

/// The sentinel price a market order is given on the stated side.
pub fn market_sentinel_price(side: Side) -> f64 {
    match side {
        Side::Buy => f64::INFINITY,
        Side::Sell => 0.0,
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
