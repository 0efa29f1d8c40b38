//! `OrderBook`: the two-sided, price-indexed resting-order store.

use super::order::{Order, Side};
use super::queue::OrderQueue;
use super::snapshot::BookSummaryRow;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use std::collections::HashMap;
use tracing::trace;

/// Price-keyed side of the book: an ordered map from price to the FIFO
/// queue of resting orders at that price.
pub type PriceLevels = BTreeMap<OrderedFloat<f64>, OrderQueue>;

/// The two-sided, price-indexed order book.
///
/// `bids` and `offers` are each a map from price to the FIFO queue resting
/// at that price; `by_expiration` indexes every resting order (from either
/// side) by its expiration timestamp (`None` for orders that never expire)
/// so the engine can efficiently find everything due to expire at a tick.
/// Empty queues are pruned from all three maps as soon as they become empty.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    /// BUY orders, keyed by price.
    pub bids: PriceLevels,
    /// SELL orders, keyed by price.
    pub offers: PriceLevels,
    /// All resting orders (either side), keyed by `expiration`.
    pub(crate) by_expiration: HashMap<Option<i64>, OrderQueue>,
}

impl OrderBook {
    /// An empty order book.
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Insert a resting order into its side's price level and the
    /// expiration index.
    pub fn append(&mut self, order: Order) {
        trace!(order_id = %order.order_id, side = %order.side, price = order.price, "appending order to book");
        let expiration = order.expiration;
        let levels = self.same_side_mut(order.side);
        levels
            .entry(OrderedFloat(order.price))
            .or_default()
            .add([order.clone()]);
        self.by_expiration
            .entry(expiration)
            .or_default()
            .add([order]);
    }

    /// Remove a resting order (matched by `order_id`) from its side's price
    /// level and the expiration index, pruning any level that becomes empty.
    pub fn remove(&mut self, order: &Order) {
        trace!(order_id = %order.order_id, "removing order from book");
        let price = OrderedFloat(order.price);
        let levels = self.same_side_mut(order.side);
        if let Some(queue) = levels.get_mut(&price) {
            queue.remove(std::slice::from_ref(order));
            if queue.is_empty() {
                levels.remove(&price);
            }
        }
        if let Some(queue) = self.by_expiration.get_mut(&order.expiration) {
            queue.remove(std::slice::from_ref(order));
            if queue.is_empty() {
                self.by_expiration.remove(&order.expiration);
            }
        }
    }

    /// Mirror a resting order's post-fill `size` into the expiration index.
    ///
    /// The matching sweep mutates and prunes resting orders through the
    /// `bids`/`offers` copy only; without this, the independent clone held by
    /// `by_expiration` would go stale the moment a fill changed a resting
    /// order's size, leaking a dead entry there for any order with no
    /// expiration (nothing else ever revisits the `None` bucket). Removes the
    /// order (and prunes an emptied bucket) once `new_size` reaches zero.
    pub(crate) fn sync_expiration_size(&mut self, order_id: &str, expiration: Option<i64>, new_size: f64) {
        let Some(queue) = self.by_expiration.get_mut(&expiration) else {
            return;
        };
        if new_size <= 0.0 {
            queue.remove_by_id(order_id);
        } else if let Some(resting) = queue.iter_mut().find(|o| o.order_id == order_id) {
            resting.size = new_size;
        }
        if queue.is_empty() {
            self.by_expiration.remove(&expiration);
        }
    }

    /// Remove a resting order by id alone, searching both sides. Used by the
    /// matching engine for cancel messages, which may not carry an
    /// up-to-date `size`/`price` (a cancel is matched on `order_id` only).
    pub fn remove_by_id(&mut self, order_id: &str) {
        for levels in [&mut self.bids, &mut self.offers] {
            let mut emptied = None;
            for (price, queue) in levels.iter_mut() {
                if queue.remove_by_id(order_id).is_some() {
                    if queue.is_empty() {
                        emptied = Some(*price);
                    }
                    break;
                }
            }
            if let Some(price) = emptied {
                levels.remove(&price);
            }
        }
        let mut emptied_expiration = None;
        for (expiration, queue) in self.by_expiration.iter_mut() {
            if queue.remove_by_id(order_id).is_some() {
                if queue.is_empty() {
                    emptied_expiration = Some(*expiration);
                }
                break;
            }
        }
        if let Some(expiration) = emptied_expiration {
            self.by_expiration.remove(&expiration);
        }
    }

    /// Highest resting bid price, or `0.0` when there are no bids.
    pub fn max_bid(&self) -> f64 {
        self.bids
            .keys()
            .next_back()
            .map(|price| price.0)
            .unwrap_or(0.0)
    }

    /// Lowest resting offer price, or `+inf` when there are no offers.
    pub fn min_offer(&self) -> f64 {
        self.offers
            .keys()
            .next()
            .map(|price| price.0)
            .unwrap_or(f64::INFINITY)
    }

    /// `(max_bid + min_offer) / 2`. A reported display convention, not an
    /// execution price — when one or both sides are empty this evaluates
    /// through the `0.0`/`+inf` sentinels rather than signalling absence.
    pub fn current_price(&self) -> f64 {
        (self.max_bid() + self.min_offer()) / 2.0
    }

    /// The side map an order would rest on if posted (BUY → bids, SELL → offers).
    pub fn same_side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.offers,
        }
    }

    fn same_side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.offers,
        }
    }

    /// The side map an incoming order of the given side would match
    /// against (BUY → offers, SELL → bids).
    pub fn opposite_side(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.offers,
            Side::Sell => &self.bids,
        }
    }

    pub(crate) fn opposite_side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.offers,
            Side::Sell => &mut self.bids,
        }
    }

    /// Whether a crossing resting order exists for `order`: for a SELL,
    /// `order.price <= max_bid` and bids are non-empty; for a BUY,
    /// `order.price >= min_offer` and offers are non-empty. Market orders'
    /// sentinel prices make this trivially true whenever the opposite side
    /// is non-empty.
    pub fn matching_order_exists(&self, order: &Order) -> bool {
        match order.side {
            Side::Sell => !self.bids.is_empty() && order.price <= self.max_bid(),
            Side::Buy => !self.offers.is_empty() && order.price >= self.min_offer(),
        }
    }

    /// Opposite-side prices that still cross `order`, ordered best-for-the-
    /// aggressor first: descending for a SELL aggressor (highest bid first),
    /// ascending for a BUY aggressor (lowest offer first).
    pub fn matching_sorted_opposite_prices(&self, order: &Order) -> Vec<f64> {
        let levels = self.opposite_side(order.side);
        match order.side {
            Side::Sell => levels
                .keys()
                .rev()
                .map(|price| price.0)
                .filter(|&price| price >= order.price)
                .collect(),
            Side::Buy => levels
                .keys()
                .map(|price| price.0)
                .filter(|&price| price <= order.price)
                .collect(),
        }
    }

    /// Flat (side, price, size, count) rows, BUY rows first then SELL rows,
    /// ascending by price within each side.
    pub fn summary(&self) -> Vec<BookSummaryRow> {
        let mut rows = Vec::with_capacity(self.bids.len() + self.offers.len());
        for (price, queue) in &self.bids {
            rows.push(BookSummaryRow {
                side: Side::Buy,
                price: price.0,
                size: queue.total_size(),
                count: queue.len(),
            });
        }
        for (price, queue) in &self.offers {
            rows.push(BookSummaryRow {
                side: Side::Sell,
                price: price.0,
                size: queue.total_size(),
                count: queue.len(),
            });
        }
        rows
    }

    /// Volume-imbalance indicator ρ ∈ [−1, 1] within a `price_range` band
    /// of `current_price`.
    ///
    /// Rules, in order: an empty book gives `0`; a book populated on only
    /// one side gives `+1` (bids only) or `-1` (offers only); otherwise ρ is
    /// `(buy_volume - sell_volume) / (buy_volume + sell_volume)` over resting
    /// size within `[current_price - price_range, current_price + price_range]`,
    /// or `0` if that band holds no volume on either side.
    pub fn imbalance(&self, price_range: f64) -> f64 {
        if self.bids.is_empty() && self.offers.is_empty() {
            return 0.0;
        }
        if self.offers.is_empty() {
            return 1.0;
        }
        if self.bids.is_empty() {
            return -1.0;
        }

        let mid = self.current_price();
        let lower = mid - price_range;
        let upper = mid + price_range;

        let buy_volume: f64 = self
            .bids
            .range(OrderedFloat(lower)..=OrderedFloat(upper))
            .map(|(_, queue)| queue.total_size())
            .sum();
        let sell_volume: f64 = self
            .offers
            .range(OrderedFloat(lower)..=OrderedFloat(upper))
            .map(|(_, queue)| queue.total_size())
            .sum();

        if buy_volume + sell_volume > 0.0 {
            (buy_volume - sell_volume) / (buy_volume + sell_volume)
        } else {
            0.0
        }
    }

    /// The volume-imbalance indicator using `default_band` (see
    /// [`crate::config::EngineConfig::default_imbalance_band`]).
    pub fn imbalance_default(&self, default_band: f64) -> f64 {
        self.imbalance(default_band)
    }
}
