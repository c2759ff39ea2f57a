//! Streaming period rollup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tickbin_table::{Bucket, LayoutMode, SlotTable};
use tickbin_types::{
    Category, ContractKey, RawTick, Result, Sandwich, TickRecord, TickbinError, Timeframe,
};
use tracing::{debug, warn};

use crate::{OverflowPolicy, PeriodSummary, RollupConfig};

/// Counters kept by a [`PeriodRollup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RollupStats {
    /// Ticks stored in a bucket.
    pub ticks: u64,
    /// Ticks discarded under [`OverflowPolicy::DropTick`].
    pub dropped: u64,
    /// Raw records rejected for an unknown category tag.
    pub invalid: u64,
    /// Summaries emitted, early ones included.
    pub periods: u64,
    /// Periods closed early under [`OverflowPolicy::EarlyRollup`].
    pub early_rollups: u64,
}

/// Streaming driver that groups ticks by contract and emits per-period candles.
///
/// Ticks must arrive in timestamp order. The first tick of a new period
/// closes the previous one: its candles are returned and the table is rinsed.
#[derive(Debug)]
pub struct PeriodRollup {
    table: SlotTable,
    timeframe: Timeframe,
    overflow: OverflowPolicy,
    period_start: Option<DateTime<Utc>>,
    stats: RollupStats,
}

impl PeriodRollup {
    /// Creates a driver with an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table settings are invalid.
    pub fn new(config: RollupConfig) -> Result<Self> {
        Ok(Self {
            table: SlotTable::new(config.collection)?,
            timeframe: config.timeframe,
            overflow: config.overflow,
            period_start: None,
            stats: RollupStats::default(),
        })
    }

    /// Returns the period length.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns the start of the open period, if any tick has arrived.
    #[must_use]
    pub const fn period_start(&self) -> Option<DateTime<Utc>> {
        self.period_start
    }

    /// Returns the counters.
    #[must_use]
    pub const fn stats(&self) -> &RollupStats {
        &self.stats
    }

    /// Returns the underlying table.
    #[must_use]
    pub const fn table(&self) -> &SlotTable {
        &self.table
    }

    /// Processes one tick.
    ///
    /// Returns `Some(summary)` when this tick closed a period, either because
    /// it opened a new one or because it forced an early rollup.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::TableFull`] or [`TickbinError::BucketFull`]
    /// under [`OverflowPolicy::Reject`], and [`TickbinError::Timestamp`] if
    /// the timestamp cannot be aligned. [`TickbinError::NullKey`] rejects the
    /// tick before the open period is touched.
    pub fn process(
        &mut self,
        key: ContractKey,
        record: &TickRecord,
    ) -> Result<Option<PeriodSummary>> {
        check_key(key)?;
        let closed = self.roll_to(record.timestamp)?;
        let early = self.store(key, 1, |bucket| bucket.add_record(*record))?;
        Ok(closed.or(early))
    }

    /// Processes co-timed ticks as one unit: all legs are stored or none.
    ///
    /// # Errors
    ///
    /// As [`PeriodRollup::process`]. A sandwich that could not fit even an
    /// empty bucket is rejected with [`TickbinError::BucketFull`] before the
    /// driver's state changes, whatever the policy.
    pub fn process_sandwich(
        &mut self,
        key: ContractKey,
        sandwich: &Sandwich,
    ) -> Result<Option<PeriodSummary>> {
        check_key(key)?;
        self.check_fits_empty_bucket(key, sandwich)?;
        let closed = self.roll_to(sandwich.timestamp())?;
        let legs = sandwich.len() as u64;
        let early = self.store(key, legs, |bucket| bucket.add_ticks_batch(sandwich))?;
        Ok(closed.or(early))
    }

    /// Decodes and processes one upstream record.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::InvalidCategory`] for an unknown tag; only this
    /// record is rejected and the driver state is unchanged. Other errors as
    /// [`PeriodRollup::process`].
    pub fn process_raw(&mut self, raw: RawTick) -> Result<Option<PeriodSummary>> {
        let (key, record) = match raw.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                self.stats.invalid += 1;
                debug!(key = %raw.key, tag = raw.tag, "rejecting raw tick");
                return Err(e);
            }
        };
        self.process(key, &record)
    }

    /// Closes the open period now, returning its candles.
    ///
    /// The period itself stays open, so the summary is marked incomplete and
    /// later ticks of the same period follow in another summary with the same
    /// start. Returns `None` if no contract is active.
    pub fn close_period(&mut self) -> Option<PeriodSummary> {
        self.take_summary(false)
    }

    /// Finishes the stream, returning any remaining partial period.
    #[must_use]
    pub fn finish(mut self) -> Option<PeriodSummary> {
        self.take_summary(true)
    }

    /// Moves to the period of `timestamp`, closing the current one if it differs.
    fn roll_to(&mut self, timestamp: DateTime<Utc>) -> Result<Option<PeriodSummary>> {
        let start = self.timeframe.period_start(timestamp)?;
        match self.period_start {
            Some(current) if current == start => Ok(None),
            Some(_) => {
                let closed = self.take_summary(true);
                self.period_start = Some(start);
                Ok(closed)
            }
            None => {
                self.period_start = Some(start);
                Ok(None)
            }
        }
    }

    /// Inserts through `insert`, applying the overflow policy on capacity errors.
    fn store<F>(&mut self, key: ContractKey, legs: u64, insert: F) -> Result<Option<PeriodSummary>>
    where
        F: Fn(&mut Bucket) -> Result<()>,
    {
        let attempt = |table: &mut SlotTable| table.find_or_create(key).and_then(|b| insert(b));

        match attempt(&mut self.table) {
            Ok(()) => {
                self.stats.ticks += legs;
                Ok(None)
            }
            Err(e @ (TickbinError::TableFull { .. } | TickbinError::BucketFull { .. })) => {
                match self.overflow {
                    OverflowPolicy::Reject => Err(e),
                    OverflowPolicy::DropTick => {
                        self.stats.dropped += legs;
                        warn!(%key, error = %e, "dropping tick");
                        Ok(None)
                    }
                    OverflowPolicy::EarlyRollup => {
                        warn!(%key, error = %e, "closing period early");
                        let early = self.take_summary(false);
                        self.stats.early_rollups += 1;
                        attempt(&mut self.table)?;
                        self.stats.ticks += legs;
                        Ok(early)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    fn take_summary(&mut self, complete: bool) -> Option<PeriodSummary> {
        let period_start = self.period_start?;
        if self.table.active_count() == 0 {
            return None;
        }

        let candles = self.table.candles().collect::<Vec<_>>();
        self.table.rinse_active();
        self.stats.periods += 1;
        debug!(
            %period_start,
            timeframe = %self.timeframe,
            contracts = candles.len(),
            complete,
            "period closed"
        );

        Some(PeriodSummary {
            period_start,
            timeframe: self.timeframe,
            complete,
            candles,
        })
    }

    fn check_fits_empty_bucket(&self, key: ContractKey, sandwich: &Sandwich) -> Result<()> {
        let config = self.table.config();
        let records = sandwich.records();
        let overflow = match config.layout_mode {
            LayoutMode::Flat => (records.len() > config.bucket_size).then_some(None),
            LayoutMode::PerCategory => Category::ALL
                .into_iter()
                .find(|&c| records.iter().filter(|r| r.category == c).count() > config.bucket_size)
                .map(Some),
        };
        match overflow {
            Some(category) => Err(TickbinError::BucketFull { key, category }),
            None => Ok(()),
        }
    }
}

const fn check_key(key: ContractKey) -> Result<()> {
    if key.is_null() {
        return Err(TickbinError::NullKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use tickbin_table::CollectionConfig;
    use tickbin_types::Decimal;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn at(minute: i64, second: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap()
            + TimeDelta::minutes(minute)
            + TimeDelta::seconds(second)
    }

    fn key(symbol: &str) -> ContractKey {
        ContractKey::from_symbol(symbol).unwrap()
    }

    fn trade(minute: i64, second: i64, price: i64, qty: i64) -> TickRecord {
        TickRecord::new(
            at(minute, second),
            Category::Trade,
            Decimal::from(price),
            Decimal::from(qty),
        )
    }

    fn rollup(capacity: usize, bucket_size: usize, overflow: OverflowPolicy) -> PeriodRollup {
        init_tracing();
        let config = RollupConfig::new(
            CollectionConfig::new(capacity, bucket_size),
            Timeframe::Minute1,
        )
        .with_overflow(overflow);
        PeriodRollup::new(config).unwrap()
    }

    #[test]
    fn test_minute_rollup() {
        let mut rollup = rollup(8, 16, OverflowPolicy::Reject);

        for (second, price, qty) in [(0, 10, 3), (15, 7, 5), (30, 12, 2), (45, 9, 0)] {
            assert!(rollup.process(key("ESZ4"), &trade(0, second, price, qty)).unwrap().is_none());
        }
        assert!(rollup.process(key("NQZ4"), &trade(0, 50, 200, 1)).unwrap().is_none());

        let summary = rollup
            .process(key("ESZ4"), &trade(1, 0, 11, 1))
            .unwrap()
            .unwrap();
        assert!(summary.complete);
        assert_eq!(summary.period_start, at(0, 0));
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.candles[0].0, key("ESZ4"));

        let es = summary.get(key("ESZ4")).unwrap();
        assert_eq!(es.trade.open, Decimal::from(10));
        assert_eq!(es.trade.high, Decimal::from(12));
        assert_eq!(es.trade.low, Decimal::from(7));
        assert_eq!(es.trade.close, Decimal::from(9));
        assert_eq!(es.trade.volume, Decimal::from(10));

        // The new period holds only the tick that opened it.
        assert_eq!(rollup.table().active_count(), 1);
        let last = rollup.finish().unwrap();
        assert_eq!(last.period_start, at(1, 0));
        assert_eq!(last.tick_count(), 1);
    }

    #[test]
    fn test_reject_policy_returns_table_full() {
        let mut rollup = rollup(2, 4, OverflowPolicy::Reject);
        rollup.process(key("A"), &trade(0, 0, 1, 1)).unwrap();
        rollup.process(key("B"), &trade(0, 1, 1, 1)).unwrap();

        let err = rollup.process(key("C"), &trade(0, 2, 1, 1)).unwrap_err();
        assert!(matches!(err, TickbinError::TableFull { capacity: 2 }));
        assert_eq!(rollup.stats().ticks, 2);
        assert_eq!(rollup.table().active_count(), 2);
    }

    #[test]
    fn test_drop_policy_counts_ticks() {
        let mut rollup = rollup(4, 2, OverflowPolicy::DropTick);
        for second in 0..5 {
            assert!(rollup.process(key("A"), &trade(0, second, 1, 1)).unwrap().is_none());
        }
        assert_eq!(rollup.stats().ticks, 2);
        assert_eq!(rollup.stats().dropped, 3);
    }

    #[test]
    fn test_early_rollup_splits_period() {
        let mut rollup = rollup(4, 2, OverflowPolicy::EarlyRollup);
        rollup.process(key("A"), &trade(0, 0, 5, 1)).unwrap();
        rollup.process(key("A"), &trade(0, 1, 6, 1)).unwrap();

        let early = rollup
            .process(key("A"), &trade(0, 2, 7, 1))
            .unwrap()
            .unwrap();
        assert!(!early.complete);
        assert_eq!(early.get(key("A")).unwrap().trade.close, Decimal::from(6));

        let rest = rollup.finish().unwrap();
        assert!(rest.complete);
        assert_eq!(rest.period_start, early.period_start);
        assert_eq!(rest.get(key("A")).unwrap().trade.open, Decimal::from(7));
    }

    #[test]
    fn test_invalid_category_rejects_one_record() {
        let mut rollup = rollup(4, 4, OverflowPolicy::Reject);
        let good = RawTick::new(key("A"), at(0, 0), 2, Decimal::from(3), Decimal::ONE);
        let bad = RawTick { tag: 42, ..good };

        rollup.process_raw(good).unwrap();
        assert!(matches!(
            rollup.process_raw(bad),
            Err(TickbinError::InvalidCategory(42))
        ));
        rollup.process_raw(good).unwrap();

        assert_eq!(rollup.stats().invalid, 1);
        assert_eq!(rollup.stats().ticks, 2);
        assert_eq!(rollup.finish().unwrap().tick_count(), 2);
    }

    #[test]
    fn test_sandwich_processing() {
        let mut rollup = rollup(4, 1, OverflowPolicy::EarlyRollup);
        let sandwich = Sandwich::new(
            at(0, 0),
            &[
                (Category::Bid, Decimal::from(99), Decimal::ONE),
                (Category::Ask, Decimal::from(101), Decimal::ONE),
                (Category::Trade, Decimal::from(100), Decimal::from(2)),
            ],
        )
        .unwrap();
        assert!(rollup.process_sandwich(key("A"), &sandwich).unwrap().is_none());
        assert_eq!(rollup.stats().ticks, 3);

        // Two trades cannot fit a one-slot trade array even after a rinse.
        let oversized = Sandwich::new(
            at(0, 1),
            &[
                (Category::Trade, Decimal::ONE, Decimal::ONE),
                (Category::Trade, Decimal::ONE, Decimal::ONE),
            ],
        )
        .unwrap();
        assert!(matches!(
            rollup.process_sandwich(key("A"), &oversized),
            Err(TickbinError::BucketFull {
                category: Some(Category::Trade),
                ..
            })
        ));
        assert_eq!(rollup.stats().early_rollups, 0);
        assert_eq!(rollup.table().active_count(), 1);
    }

    #[test]
    fn test_close_period() {
        let mut rollup = rollup(4, 4, OverflowPolicy::Reject);
        assert!(rollup.close_period().is_none());

        rollup.process(key("A"), &trade(0, 0, 1, 1)).unwrap();
        let summary = rollup.close_period().unwrap();
        assert_eq!(summary.len(), 1);
        assert!(!summary.complete);
        assert_eq!(rollup.table().active_count(), 0);
        assert_eq!(rollup.stats().periods, 1);
        assert!(rollup.finish().is_none());
    }

    #[test]
    fn test_close_period_splits_open_period() {
        let mut rollup = rollup(4, 4, OverflowPolicy::Reject);
        rollup.process(key("A"), &trade(0, 0, 1, 1)).unwrap();
        let first = rollup.close_period().unwrap();

        rollup.process(key("A"), &trade(0, 30, 2, 1)).unwrap();
        let rest = rollup.finish().unwrap();
        assert!(!first.complete);
        assert!(rest.complete);
        assert_eq!(rest.period_start, first.period_start);
        assert_eq!(rest.get(key("A")).unwrap().trade.open, Decimal::from(2));
    }

    #[test]
    fn test_null_key_keeps_previous_period() {
        let mut rollup = rollup(4, 4, OverflowPolicy::Reject);
        rollup.process(key("A"), &trade(0, 0, 5, 1)).unwrap();

        let result = rollup.process(ContractKey::NULL, &trade(1, 0, 6, 1));
        assert!(matches!(result, Err(TickbinError::NullKey)));
        assert_eq!(rollup.stats().periods, 0);
        assert_eq!(rollup.table().active_count(), 1);
        assert_eq!(rollup.period_start(), Some(at(0, 0)));

        let summary = rollup
            .process(key("A"), &trade(1, 5, 7, 1))
            .unwrap()
            .unwrap();
        assert_eq!(summary.period_start, at(0, 0));
        assert_eq!(summary.get(key("A")).unwrap().trade.close, Decimal::from(5));
    }

    #[test]
    fn test_null_key_sandwich_keeps_previous_period() {
        let mut rollup = rollup(4, 4, OverflowPolicy::EarlyRollup);
        rollup.process(key("A"), &trade(0, 0, 5, 1)).unwrap();

        let sandwich =
            Sandwich::new(at(1, 0), &[(Category::Bid, Decimal::from(4), Decimal::ONE)]).unwrap();
        assert!(matches!(
            rollup.process_sandwich(ContractKey::NULL, &sandwich),
            Err(TickbinError::NullKey)
        ));
        assert_eq!(rollup.stats().periods, 0);

        let summary = rollup.finish().unwrap();
        assert_eq!(summary.period_start, at(0, 0));
        assert_eq!(summary.tick_count(), 1);
    }

    #[test]
    fn test_drop_policy_on_table_full() {
        let mut rollup = rollup(2, 4, OverflowPolicy::DropTick);
        rollup.process(key("A"), &trade(0, 0, 1, 1)).unwrap();
        rollup.process(key("B"), &trade(0, 1, 2, 1)).unwrap();

        assert!(rollup.process(key("C"), &trade(0, 2, 3, 1)).unwrap().is_none());
        assert_eq!(rollup.stats().dropped, 1);
        assert_eq!(rollup.stats().ticks, 2);

        let summary = rollup.finish().unwrap();
        assert_eq!(summary.len(), 2);
        assert!(summary.get(key("C")).is_none());
    }

    #[test]
    fn test_early_rollup_on_table_full() {
        let mut rollup = rollup(2, 4, OverflowPolicy::EarlyRollup);
        rollup.process(key("A"), &trade(0, 0, 1, 1)).unwrap();
        rollup.process(key("B"), &trade(0, 1, 2, 1)).unwrap();

        let early = rollup
            .process(key("C"), &trade(0, 2, 3, 1))
            .unwrap()
            .unwrap();
        assert!(!early.complete);
        assert_eq!(early.len(), 2);
        assert!(early.get(key("C")).is_none());
        assert_eq!(rollup.stats().early_rollups, 1);
        assert_eq!(rollup.stats().ticks, 3);

        let rest = rollup.finish().unwrap();
        assert_eq!(rest.period_start, early.period_start);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.get(key("C")).unwrap().trade.close, Decimal::from(3));
    }
}
