//! Benchmark utilities for tickbin.
//!
//! Generates deterministic synthetic tick streams so hot-path benchmarks are
//! comparable between runs.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickbin_lib::{Category, ContractKey, Decimal, TickRecord};

/// Shape of a synthetic feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Number of distinct contracts.
    pub contracts: usize,
    /// Number of ticks to generate.
    pub ticks: usize,
    /// Milliseconds between consecutive ticks.
    pub spacing_ms: i64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            contracts: 500,
            ticks: 100_000,
            spacing_ms: 5,
            seed: 17,
        }
    }
}

/// Returns `count` distinct non-null contract keys.
pub fn contract_keys(count: usize) -> Vec<ContractKey> {
    (1..=count as u32)
        .map(|i| ContractKey::new(i, i.rotate_left(11) ^ 0x5eed, 0))
        .collect()
}

/// Start of every synthetic feed.
pub fn feed_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap()
}

/// Generates a feed of random-walk quotes and trades in timestamp order.
pub fn synthetic_feed(config: &FeedConfig) -> Vec<(ContractKey, TickRecord)> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let keys = contract_keys(config.contracts);
    let mut mids: Vec<i64> = keys.iter().map(|_| rng.gen_range(1_000..100_000)).collect();
    let start = feed_start();

    (0..config.ticks)
        .map(|i| {
            let contract = rng.gen_range(0..keys.len());
            mids[contract] = (mids[contract] + rng.gen_range(-5..=5)).max(1);
            let category = match rng.gen_range(0..10) {
                0..=3 => Category::Bid,
                4..=7 => Category::Ask,
                _ => Category::Trade,
            };
            let price = match category {
                Category::Bid => mids[contract] - 1,
                Category::Ask => mids[contract] + 1,
                Category::Trade => mids[contract],
            };
            let timestamp = start + TimeDelta::milliseconds(i as i64 * config.spacing_ms);
            let record = TickRecord::new(
                timestamp,
                category,
                Decimal::new(price, 2),
                Decimal::from(rng.gen_range(1i64..50)),
            );
            (keys[contract], record)
        })
        .collect()
}
