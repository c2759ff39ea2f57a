//! Rollup period definitions.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::{Result, TickbinError};

/// Length of one rollup period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Every distinct timestamp is its own period.
    Tick,
    /// 1-second periods.
    #[serde(rename = "s1")]
    Second1,
    /// 1-minute periods.
    #[default]
    #[serde(rename = "m1")]
    Minute1,
    /// 5-minute periods.
    #[serde(rename = "m5")]
    Minute5,
    /// 15-minute periods.
    #[serde(rename = "m15")]
    Minute15,
    /// 30-minute periods.
    #[serde(rename = "m30")]
    Minute30,
    /// 1-hour periods.
    #[serde(rename = "h1")]
    Hour1,
    /// 4-hour periods.
    #[serde(rename = "h4")]
    Hour4,
    /// UTC days.
    #[serde(rename = "d1")]
    Day1,
}

impl Timeframe {
    /// Returns the period length in seconds, or None for tick periods.
    #[must_use]
    pub const fn seconds(&self) -> Option<u32> {
        match self {
            Self::Tick => None,
            Self::Second1 => Some(1),
            Self::Minute1 => Some(60),
            Self::Minute5 => Some(300),
            Self::Minute15 => Some(900),
            Self::Minute30 => Some(1800),
            Self::Hour1 => Some(3600),
            Self::Hour4 => Some(14400),
            Self::Day1 => Some(86400),
        }
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Second1 => "s1",
            Self::Minute1 => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour1 => "h1",
            Self::Hour4 => "h4",
            Self::Day1 => "d1",
        }
    }

    /// Returns the start of the period containing `timestamp`.
    ///
    /// Periods are aligned to the Unix epoch, so `Hour4` periods start at
    /// 00:00, 04:00, ... UTC. For [`Timeframe::Tick`] the timestamp is its
    /// own period start.
    ///
    /// # Errors
    ///
    /// Returns [`TickbinError::Timestamp`] if the timestamp cannot be truncated.
    pub fn period_start(&self, timestamp: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let Some(seconds) = self.seconds() else {
            return Ok(timestamp);
        };
        timestamp
            .duration_trunc(TimeDelta::seconds(i64::from(seconds)))
            .map_err(|e| TickbinError::Timestamp(format!("{timestamp}: {e}")))
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tick" => Ok(Self::Tick),
            "s1" | "1s" | "second" => Ok(Self::Second1),
            "m1" | "1m" | "minute" => Ok(Self::Minute1),
            "m5" | "5m" => Ok(Self::Minute5),
            "m15" | "15m" => Ok(Self::Minute15),
            "m30" | "30m" => Ok(Self::Minute30),
            "h1" | "1h" | "hour" => Ok(Self::Hour1),
            "h4" | "4h" => Ok(Self::Hour4),
            "d1" | "1d" | "day" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timeframe '{0}', expected one of: tick, s1, m1, m5, m15, m30, h1, h4, d1")]
pub struct TimeframeParseError(String);
