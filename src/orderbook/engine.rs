//! `MatchingEngine`: the per-tick orchestrator that admits orders, injects
//! expirations, and matches in strict price-time priority.

use super::book::OrderBook;
use super::executed_trades::ExecutedTrades;
use super::id_gen::TradeIdGenerator;
use super::order::{Order, Side, Status};
use super::queue::OrderQueue;
use super::trade::Trade;
use tracing::{info_span, trace};

/// Orchestrates a continuous double auction over a persistent [`OrderBook`].
///
/// A single instance owns its book and its trade-id generator; `match` is
/// the sole mutation entry point and runs synchronously to completion.
#[derive(Debug)]
pub struct MatchingEngine {
    /// The live, persistent order book.
    pub unprocessed_orders: OrderBook,
    trade_ids: TradeIdGenerator,
}

impl MatchingEngine {
    /// A fresh engine with an empty book, seeding trade ids from OS entropy.
    pub fn new() -> Self {
        MatchingEngine {
            unprocessed_orders: OrderBook::new(),
            trade_ids: TradeIdGenerator::new(),
        }
    }

    /// A fresh engine whose trade-id sequence is fully determined by `seed`,
    /// so repeated runs over the same input produce identical output.
    pub fn with_seed(seed: u64) -> Self {
        MatchingEngine {
            unprocessed_orders: OrderBook::new(),
            trade_ids: TradeIdGenerator::with_seed(seed),
        }
    }

    /// Read-only access to the live book.
    pub fn book(&self) -> &OrderBook {
        &self.unprocessed_orders
    }

    /// Process one tick: admit `orders`, inject expirations due at
    /// `timestamp`, match in price-time priority, and return every trade
    /// produced during this call.
    pub fn tick(&mut self, timestamp: i64, orders: impl IntoIterator<Item = Order>) -> ExecutedTrades {
        let mut work = OrderQueue::from_orders(orders);
        let expired = self.collect_expired(timestamp);
        let expired_count = expired.len();
        work.add(expired);

        let span = info_span!("tick", timestamp, admitted = work.len(), expired = expired_count);
        let _guard = span.enter();

        let mut executed = ExecutedTrades::new();
        while !work.is_empty() {
            let order = work.dequeue();
            let trades = self.process_one(timestamp, order);
            executed.add(trades);
        }
        executed
    }

    /// Collect every resting order whose `expiration <= timestamp`, stamping
    /// each as a `CANCEL` message. Each keeps its own submission `timestamp`
    /// so it still interleaves by arrival time against the rest of the
    /// same-tick batch, rather than collapsing onto the tick timestamp.
    fn collect_expired(&mut self, timestamp: i64) -> Vec<Order> {
        let mut due = Vec::new();
        for (expiration, queue) in self.unprocessed_orders.by_expiration.iter() {
            let Some(expiration) = expiration else {
                continue;
            };
            if *expiration <= timestamp {
                due.extend(queue.iter().cloned());
            }
        }
        due.into_iter().map(Order::expire).collect()
    }

    fn process_one(&mut self, timestamp: i64, order: Order) -> Vec<Trade> {
        if order.status == Status::Cancel {
            trace!(order_id = %order.order_id, "processing cancel");
            self.unprocessed_orders.remove_by_id(&order.order_id);
            return Vec::new();
        }

        if self.unprocessed_orders.matching_order_exists(&order) {
            self.execute_trades(timestamp, order)
        } else {
            self.unprocessed_orders.append(order);
            Vec::new()
        }
    }

    /// Sweep opposite-side price levels, aggressor-best first, filling
    /// `aggressor` until its residual size is exhausted or no crossing price
    /// remains; post whatever residual is left to the book.
    fn execute_trades(&mut self, timestamp: i64, mut aggressor: Order) -> Vec<Trade> {
        let mut trades = Vec::new();
        let prices = self
            .unprocessed_orders
            .matching_sorted_opposite_prices(&aggressor);

        for price in prices {
            if aggressor.size <= 0.0 {
                break;
            }
            // Borrowed as two disjoint fields (not through a `&mut self`
            // method) so the book sweep and trade-id draw can proceed
            // together without the compiler mistaking them for one borrow.
            Self::execute_trades_for_one_price(
                &mut self.unprocessed_orders,
                &mut self.trade_ids,
                timestamp,
                &mut aggressor,
                price,
                &mut trades,
            );
        }

        if aggressor.size > 0.0 {
            self.unprocessed_orders.append(aggressor);
        }
        trades
    }

    /// Fill `aggressor` against the FIFO queue resting at `price`, in
    /// arrival order, then prune filled orders and the level if it emptied.
    fn execute_trades_for_one_price(
        book: &mut OrderBook,
        trade_ids: &mut TradeIdGenerator,
        timestamp: i64,
        aggressor: &mut Order,
        price: f64,
        trades: &mut Vec<Trade>,
    ) {
        let levels = book.opposite_side_mut(aggressor.side);
        let key = ordered_float::OrderedFloat(price);
        let Some(queue) = levels.get_mut(&key) else {
            return;
        };

        // (id, expiration, size-after-fill) for every resting order this
        // sweep touched, so the expiration index can be kept in sync below —
        // it is not reachable through `queue`/`levels` and would otherwise go
        // stale on every fill, not just on explicit cancels.
        let mut touched = Vec::new();
        for resting in queue.iter_mut() {
            if aggressor.size <= 0.0 {
                break;
            }
            if resting.size <= 0.0 {
                continue;
            }
            trades.push(Self::execute_trade(trade_ids, timestamp, aggressor, resting));
            touched.push((resting.order_id.clone(), resting.expiration, resting.size));
        }

        queue.retain_positive_size();
        if queue.is_empty() {
            levels.remove(&key);
        }

        for (order_id, expiration, size) in touched {
            book.sync_expiration_size(&order_id, expiration, size);
        }
    }

    /// Emit one fill between `aggressor` and `resting`, decrementing both
    /// sizes by the matched amount.
    fn execute_trade(
        trade_ids: &mut TradeIdGenerator,
        timestamp: i64,
        aggressor: &mut Order,
        resting: &mut Order,
    ) -> Trade {
        let size = aggressor.size.min(resting.size);
        aggressor.size = (aggressor.size - size).max(0.0);
        resting.size = (resting.size - size).max(0.0);

        trace!(
            aggressor = %aggressor.order_id,
            resting = %resting.order_id,
            price = resting.price,
            size,
            "trade executed"
        );

        Trade {
            side: aggressor.side,
            price: resting.price,
            size,
            incoming_order_id: aggressor.order_id.clone(),
            book_order_id: resting.order_id.clone(),
            execution: aggressor.execution,
            trade_id: trade_ids.next_id(),
            timestamp,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::order::Order;

    fn limit(side: Side, price: f64, size: f64, id: &str, ts: i64) -> Order {
        Order::limit_default_digits(side, price, size, ts, id, "trader", None)
    }

    #[test]
    fn s1_matching_limit_equal_size() {
        let mut engine = MatchingEngine::with_seed(1);
        engine.tick(0, [limit(Side::Sell, 3.0, 1.0, "abc", 0)]);
        let trades = engine.tick(1, [limit(Side::Buy, 4.0, 1.0, "xyz", 1)]);

        assert_eq!(trades.len(), 1);
        let trade = trades.trades()[0];
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.price, 3.0);
        assert_eq!(trade.size, 1.0);
        assert_eq!(trade.book_order_id, "abc");
        assert_eq!(trade.incoming_order_id, "xyz");
        assert!(engine.unprocessed_orders.bids.is_empty());
        assert!(engine.unprocessed_orders.offers.is_empty());
    }

    #[test]
    fn s2_partial_fill_aggressor_larger() {
        let mut engine = MatchingEngine::with_seed(2);
        engine.tick(0, [limit(Side::Sell, 3.0, 1.0, "abc", 0)]);
        let trades = engine.tick(1, [limit(Side::Buy, 4.0, 2.0, "xyz", 1)]);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades.trades()[0].size, 1.0);
        assert!(engine.unprocessed_orders.offers.is_empty());
        let residual: Vec<_> = engine.unprocessed_orders.bids.values().flat_map(|q| q.iter()).collect();
        assert_eq!(residual.len(), 1);
        assert_eq!(residual[0].size, 1.0);
        assert_eq!(engine.unprocessed_orders.current_price(), f64::INFINITY);
    }

    #[test]
    fn s3_sweep_across_two_levels() {
        let mut engine = MatchingEngine::with_seed(3);
        engine.tick(
            0,
            [
                limit(Side::Sell, 5.6, 2.3, "xyz", 0),
                limit(Side::Sell, 6.5, 3.2, "qwe", 0),
            ],
        );
        let trades = engine.tick(1, [Order::market(Side::Buy, 10.0, 1, "mkt", "trader", None)]);

        let flat = trades.trades();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].price, 5.6);
        assert_eq!(flat[0].book_order_id, "xyz");
        assert_eq!(flat[1].price, 6.5);
        assert_eq!(flat[1].book_order_id, "qwe");

        let residual: Vec<_> = engine.unprocessed_orders.bids.values().flat_map(|q| q.iter()).collect();
        assert_eq!(residual.len(), 1);
        assert!((residual[0].size - 4.5).abs() < 1e-9);
        assert_eq!(residual[0].price, f64::INFINITY);
    }

    #[test]
    fn s4_time_priority_across_submissions() {
        let mut engine = MatchingEngine::with_seed(4);
        let t = 1_000_000;
        let trades = engine.tick(
            t,
            [
                limit(Side::Buy, 4.0, 1.0, "abc", t),
                limit(Side::Buy, 4.0, 1.0, "qwe", t - 86_400_000),
                limit(Side::Sell, 4.0, 0.5, "xyz", t + 86_400_000),
            ],
        );

        assert_eq!(trades.len(), 1);
        let trade = trades.trades()[0];
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.book_order_id, "qwe");
        assert_eq!(trade.size, 0.5);

        let resting: Vec<_> = engine
            .unprocessed_orders
            .bids
            .get(&ordered_float::OrderedFloat(4.0))
            .unwrap()
            .iter()
            .collect();
        assert_eq!(resting[0].order_id, "qwe");
        assert_eq!(resting[0].size, 0.5);
        assert_eq!(resting[1].order_id, "abc");
        assert_eq!(resting[1].size, 1.0);
    }

    #[test]
    fn s5_expiration_as_cancellation() {
        let mut engine = MatchingEngine::with_seed(5);
        let t = 10_000;
        let day = 86_400_000;
        engine.tick(
            t,
            [limit(Side::Buy, 1.2, 3.0, "xyz", t).with_expiration(t + day)],
        );
        assert_eq!(engine.unprocessed_orders.bids.len(), 1);

        let mid = engine.tick(t + day / 2, []);
        assert!(mid.is_empty());
        assert_eq!(engine.unprocessed_orders.bids.len(), 1);

        let at_expiry = engine.tick(t + day, []);
        assert!(at_expiry.is_empty());
        assert!(engine.unprocessed_orders.bids.is_empty());
        assert!(engine.unprocessed_orders.offers.is_empty());
    }

    #[test]
    fn expired_order_cancel_is_interleaved_by_its_own_timestamp() {
        // Resting BUY expires at 50. In the tick at 100, an incoming SELL
        // submitted at 10 — before the expiry — arrives in the same batch.
        // The cancel must sort by its own timestamp (0) ahead of the sell
        // (10), not by the tick timestamp (100), so the resting order is
        // gone before the sell is processed and no trade is produced.
        let mut engine = MatchingEngine::with_seed(8);
        engine.tick(
            0,
            [limit(Side::Buy, 4.0, 1.0, "resting", 0).with_expiration(50)],
        );

        let trades = engine.tick(100, [limit(Side::Sell, 4.0, 1.0, "incoming", 10)]);

        assert!(trades.is_empty());
        assert!(engine.unprocessed_orders.bids.is_empty());
        let offers: Vec<_> = engine
            .unprocessed_orders
            .offers
            .values()
            .flat_map(|q| q.iter())
            .collect();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].order_id, "incoming");
    }

    #[test]
    fn filled_order_is_dropped_from_expiration_index() {
        let mut engine = MatchingEngine::with_seed(9);
        engine.tick(0, [limit(Side::Buy, 4.0, 1.0, "buy-1", 0)]);
        engine.tick(1, [limit(Side::Sell, 4.0, 1.0, "sell-1", 1)]);

        assert!(engine.unprocessed_orders.bids.is_empty());
        assert!(
            engine
                .unprocessed_orders
                .by_expiration
                .get(&None)
                .map(|queue| queue.is_empty())
                .unwrap_or(true)
        );
    }

    #[test]
    fn partial_fill_mirrors_residual_size_into_expiration_index() {
        let mut engine = MatchingEngine::with_seed(10);
        engine.tick(0, [limit(Side::Buy, 4.0, 2.0, "buy-1", 0)]);
        engine.tick(1, [limit(Side::Sell, 4.0, 1.0, "sell-1", 1)]);

        let mirrored = engine
            .unprocessed_orders
            .by_expiration
            .get(&None)
            .and_then(|queue| queue.iter().find(|o| o.order_id == "buy-1"))
            .expect("residual order should still be indexed by expiration");
        assert_eq!(mirrored.size, 1.0);
    }

    #[test]
    fn cancel_of_unknown_id_is_a_no_op() {
        let mut engine = MatchingEngine::with_seed(6);
        engine.tick(0, [limit(Side::Buy, 1.0, 1.0, "a", 0)]);
        let trades = engine.tick(1, [limit(Side::Buy, 1.0, 1.0, "ghost", 1).cancel_of(1)]);
        assert!(trades.is_empty());
        assert_eq!(engine.unprocessed_orders.bids.len(), 1);
    }

    #[test]
    fn empty_tick_is_identity() {
        let mut engine = MatchingEngine::with_seed(7);
        engine.tick(0, [limit(Side::Buy, 1.0, 1.0, "a", 0)]);
        let before = engine.unprocessed_orders.summary();
        let trades = engine.tick(1, []);
        assert!(trades.is_empty());
        assert_eq!(engine.unprocessed_orders.summary(), before);
    }
}
