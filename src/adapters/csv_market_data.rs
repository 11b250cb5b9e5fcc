//! CSV file market data adapter.
//!
//! One `SYMBOL.csv` per symbol under a base directory, with
//! `date,open,high,low,close,volume` rows. Stands in for a live quote feed;
//! per the port contract, any read or parse failure surfaces as absence.

use crate::domain::error::FolioError;
use crate::domain::ohlcv::{HistoryPeriod, OhlcvBar};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvMarketData {
    base_path: PathBuf,
}

impl CsvMarketData {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_bars(&self, symbol: &str) -> Option<Vec<OhlcvBar>> {
        let content = fs::read_to_string(self.csv_path(symbol)).ok()?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.ok()?;
            let date =
                NaiveDate::parse_from_str(record.get(0)?, "%Y-%m-%d").ok()?;
            let open: f64 = record.get(1)?.parse().ok()?;
            let high: f64 = record.get(2)?.parse().ok()?;
            let low: f64 = record.get(3)?.parse().ok()?;
            let close: f64 = record.get(4)?.parse().ok()?;
            let volume: i64 = record.get(5)?.parse().ok()?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Some(bars)
    }

    /// Symbols with a data file in the base directory, sorted.
    pub fn list_symbols(&self) -> Result<Vec<String>, FolioError> {
        let entries = fs::read_dir(&self.base_path)?;
        let mut symbols = Vec::new();

        for entry in entries {
            let name = entry?.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

impl MarketDataPort for CsvMarketData {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        self.read_bars(symbol)?.last().map(|b| b.close)
    }

    fn history(&self, symbol: &str, period: HistoryPeriod) -> Option<Vec<OhlcvBar>> {
        let bars = self.read_bars(symbol)?;
        if bars.is_empty() {
            return None;
        }
        let keep = period.trading_days().min(bars.len());
        Some(bars[bars.len() - keep..].to_vec())
    }
}
