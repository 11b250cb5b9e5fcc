//! Daily OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// History depth requested from a market data provider. File-backed
/// providers approximate periods with trading-day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPeriod {
    OneMonth,
    SixMonths,
    OneYear,
    TwoYears,
}

impl HistoryPeriod {
    pub fn trading_days(&self) -> usize {
        match self {
            HistoryPeriod::OneMonth => 21,
            HistoryPeriod::SixMonths => 126,
            HistoryPeriod::OneYear => 252,
            HistoryPeriod::TwoYears => 504,
        }
    }
}
