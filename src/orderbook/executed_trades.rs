//! `ExecutedTrades`: an append-only collection of trades addressable by timestamp.

use super::snapshot::TradeLogRow;
use super::trade::Trade;
use std::collections::HashMap;

/// An ordered collection of [`Trade`], grouped internally by the tick
/// timestamp at which each trade was produced.
///
/// This is the timestamp-keyed variant described in `SPEC_FULL.md` §4.4 / §9
/// (the reference implementation also has a flat variant; the keyed one is
/// adopted here because a flat view is trivially derived from it via
/// [`ExecutedTrades::trades`]).
#[derive(Debug, Clone, Default)]
pub struct ExecutedTrades {
    by_timestamp: HashMap<i64, Vec<Trade>>,
    /// Insertion order of the timestamp buckets, so [`Self::trades`] can
    /// reproduce a deterministic flat view instead of HashMap iteration order.
    order: Vec<i64>,
}

impl ExecutedTrades {
    /// An empty collector.
    pub fn new() -> Self {
        ExecutedTrades::default()
    }

    /// Build a collector already seeded with `trades`.
    pub fn from_trades(trades: impl IntoIterator<Item = Trade>) -> Self {
        let mut collector = ExecutedTrades::new();
        collector.add(trades);
        collector
    }

    /// Append trades, bucketing each by its own `timestamp`.
    pub fn add(&mut self, trades: impl IntoIterator<Item = Trade>) {
        for trade in trades {
            let timestamp = trade.timestamp;
            if !self.by_timestamp.contains_key(&timestamp) {
                self.order.push(timestamp);
            }
            self.by_timestamp.entry(timestamp).or_default().push(trade);
        }
    }

    /// Trades emitted at exactly `timestamp`; empty when none were.
    pub fn get(&self, timestamp: i64) -> &[Trade] {
        self.by_timestamp
            .get(&timestamp)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The full, flat view: the concatenation of per-timestamp buckets in
    /// the order those buckets were first populated.
    pub fn trades(&self) -> Vec<&Trade> {
        self.order
            .iter()
            .flat_map(|timestamp| self.by_timestamp[timestamp].iter())
            .collect()
    }

    /// Total number of trades across every timestamp bucket.
    pub fn len(&self) -> usize {
        self.by_timestamp.values().map(Vec::len).sum()
    }

    /// Whether no trades have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate two collectors into a new one.
    pub fn concat(&self, other: &ExecutedTrades) -> ExecutedTrades {
        let mut combined = self.clone();
        combined.add(other.trades().into_iter().cloned());
        combined
    }

    /// Flat tabular export matching the trade-log column contract (§6).
    pub fn to_snapshot(&self) -> Vec<TradeLogRow> {
        self.trades().into_iter().map(TradeLogRow::from).collect()
    }
}

impl std::ops::Add for ExecutedTrades {
    type Output = ExecutedTrades;

    fn add(self, rhs: ExecutedTrades) -> ExecutedTrades {
        self.concat(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::order::{Execution, Side};

    fn trade(id: &str, timestamp: i64) -> Trade {
        Trade {
            side: Side::Buy,
            price: 1.0,
            size: 1.0,
            incoming_order_id: id.into(),
            book_order_id: "resting".into(),
            execution: Execution::Limit,
            trade_id: format!("trade-{id}"),
            timestamp,
        }
    }

    #[test]
    fn get_returns_trades_at_exact_timestamp() {
        let mut trades = ExecutedTrades::new();
        trades.add([trade("a", 1), trade("b", 2)]);
        assert_eq!(trades.get(1).len(), 1);
        assert_eq!(trades.get(1)[0].incoming_order_id, "a");
        assert!(trades.get(99).is_empty());
    }

    #[test]
    fn trades_concatenates_buckets_in_first_seen_order() {
        let mut trades = ExecutedTrades::new();
        trades.add([trade("a", 2), trade("b", 1), trade("c", 2)]);
        let flat: Vec<_> = trades.trades().into_iter().map(|t| &t.incoming_order_id).collect();
        assert_eq!(flat, vec!["a", "c", "b"]);
    }

    #[test]
    fn concat_merges_two_collectors() {
        let left = ExecutedTrades::from_trades([trade("a", 1)]);
        let right = ExecutedTrades::from_trades([trade("b", 2)]);
        let combined = left.concat(&right);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn empty_collector_has_no_trades() {
        assert!(ExecutedTrades::new().is_empty());
    }
}
