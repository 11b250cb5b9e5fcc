#![allow(dead_code)]

use chrono::NaiveDate;
use folio::domain::ohlcv::{HistoryPeriod, OhlcvBar};
use folio::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;

/// In-memory provider for tests: canned series per symbol, everything else
/// absent.
pub struct MockProvider {
    pub series: HashMap<String, Vec<OhlcvBar>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.series.insert(symbol.to_string(), bars);
        self
    }
}

impl MarketDataPort for MockProvider {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        self.series
            .get(symbol)
            .and_then(|bars| bars.last())
            .map(|b| b.close)
    }

    fn history(&self, symbol: &str, _period: HistoryPeriod) -> Option<Vec<OhlcvBar>> {
        self.series.get(symbol).cloned()
    }
}

pub fn make_bar(symbol: &str, date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

pub fn generate_bars(symbol: &str, start_date: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            symbol: symbol.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

/// CSV body in the market data adapter's layout.
pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for bar in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    out
}
