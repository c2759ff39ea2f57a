//! Per-tick and per-period costs of the bucket collection.
//!
//! Run with: `cargo bench --package tickbin-bench`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tickbin_bench::{FeedConfig, contract_keys, synthetic_feed};
use tickbin_lib::{
    CollectionConfig, LayoutMode, OverflowPolicy, PeriodRollup, RollupConfig, SlotTable, Timeframe,
};

fn layouts() -> [(&'static str, LayoutMode); 2] {
    [("flat", LayoutMode::Flat), ("per-category", LayoutMode::PerCategory)]
}

fn ingest_benchmark(c: &mut Criterion) {
    let config = FeedConfig::default();
    let feed = synthetic_feed(&config);

    let mut group = c.benchmark_group("ingest");
    group.throughput(Throughput::Elements(feed.len() as u64));

    for (name, layout) in layouts() {
        let collection = CollectionConfig::new(1024, 4096).with_layout_mode(layout);
        group.bench_with_input(BenchmarkId::new("find_or_create+add", name), &feed, |b, feed| {
            b.iter_batched_ref(
                || SlotTable::new(collection).unwrap(),
                |table| {
                    for (key, record) in feed {
                        table
                            .find_or_create(*key)
                            .and_then(|bucket| bucket.add_record(*record))
                            .unwrap();
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn period_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("period");

    for contracts in [64usize, 512, 4096] {
        let keys = contract_keys(contracts);
        let feed = synthetic_feed(&FeedConfig {
            contracts,
            ticks: contracts * 32,
            ..FeedConfig::default()
        });
        let mut table = SlotTable::new(CollectionConfig::new(contracts * 2, 256)).unwrap();
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_function(BenchmarkId::new("aggregate+rinse", contracts), |b| {
            b.iter(|| {
                for (key, record) in &feed {
                    let _ = table
                        .find_or_create(*key)
                        .and_then(|bucket| bucket.add_record(*record));
                }
                let ticks: u64 = table.candles().map(|(_, candle)| candle.tick_count()).sum();
                table.rinse_active();
                ticks
            });
        });
    }

    group.finish();
}

fn rollup_benchmark(c: &mut Criterion) {
    let feed = synthetic_feed(&FeedConfig::default());
    let mut group = c.benchmark_group("rollup");
    group.throughput(Throughput::Elements(feed.len() as u64));

    let config = RollupConfig::new(CollectionConfig::new(1024, 4096), Timeframe::Second1)
        .with_overflow(OverflowPolicy::EarlyRollup);
    group.bench_function("second-periods", |b| {
        b.iter_batched_ref(
            || PeriodRollup::new(config).unwrap(),
            |rollup| {
                let mut periods = 0usize;
                for (key, record) in &feed {
                    if rollup.process(*key, record).unwrap().is_some() {
                        periods += 1;
                    }
                }
                periods
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, ingest_benchmark, period_benchmark, rollup_benchmark);
criterion_main!(benches);
