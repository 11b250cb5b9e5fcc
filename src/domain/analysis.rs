//! Technical-analysis toolkit: volatility, RSI and beta over cached
//! historical series.
//!
//! The toolkit keeps its own per-symbol cache of fetched history. Entries
//! live for the process lifetime; there is no eviction, matching the
//! session-scoped use this was built for.

use super::chain_store::ChainStore;
use super::ohlcv::{HistoryPeriod, OhlcvBar};
use super::series_stats::{pct_returns, sample_covariance, sample_std, sample_variance};
use crate::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;

pub const DEFAULT_BENCHMARK: &str = "^BVSP";
pub const DEFAULT_VOLATILITY_WINDOW: usize = 60;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BETA_WINDOW: usize = 252;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub struct AnalysisToolkit {
    cache: ChainStore<String, Vec<OhlcvBar>>,
    benchmark: String,
}

impl AnalysisToolkit {
    pub fn new() -> Self {
        Self::with_benchmark(DEFAULT_BENCHMARK)
    }

    pub fn with_benchmark(benchmark: &str) -> Self {
        AnalysisToolkit {
            cache: ChainStore::new(),
            benchmark: benchmark.to_string(),
        }
    }

    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }

    /// Cached history for `symbol`, fetching through the provider on a
    /// miss. Returns a copy so callers cannot mutate the cached series.
    /// Empty or failed fetches are not cached, so a later call retries.
    pub fn history(
        &mut self,
        provider: &dyn MarketDataPort,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Option<Vec<OhlcvBar>> {
        if let Some(bars) = self.cache.get(&symbol.to_string()) {
            return Some(bars.clone());
        }

        let bars = provider.history(symbol, period)?;
        if bars.is_empty() {
            return None;
        }
        self.cache.put(symbol.to_string(), bars.clone());
        Some(bars)
    }

    /// Annualized volatility over the trailing `window` daily returns, as a
    /// percentage. `None` when less than `window` points of history exist.
    pub fn volatility(
        &mut self,
        provider: &dyn MarketDataPort,
        symbol: &str,
        window: usize,
    ) -> Option<f64> {
        let bars = self.history(provider, symbol, HistoryPeriod::OneYear)?;
        if bars.len() < window || window < 2 {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let returns = pct_returns(&closes);
        let tail = &returns[returns.len().saturating_sub(window)..];

        let daily = sample_std(tail)?;
        Some(daily * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
    }

    /// Relative Strength Index over the trailing `period` day-over-day
    /// changes: simple means of gains and losses, `100 - 100/(1 + RS)`.
    /// A window with zero mean loss reads as 100 rather than dividing by
    /// zero. `None` when fewer than `period` changes exist.
    pub fn rsi(
        &mut self,
        provider: &dyn MarketDataPort,
        symbol: &str,
        period: usize,
    ) -> Option<f64> {
        if period == 0 {
            return None;
        }

        let bars = self.history(provider, symbol, HistoryPeriod::OneYear)?;
        if bars.len() < period + 1 {
            return None;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let diffs: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let tail = &diffs[diffs.len() - period..];

        let mean_gain: f64 =
            tail.iter().map(|&d| if d > 0.0 { d } else { 0.0 }).sum::<f64>() / period as f64;
        let mean_loss: f64 =
            tail.iter().map(|&d| if d < 0.0 { -d } else { 0.0 }).sum::<f64>() / period as f64;

        if mean_loss == 0.0 {
            return Some(100.0);
        }

        let rs = mean_gain / mean_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }

    /// Beta of `symbol` against the configured benchmark: covariance of the
    /// two return series over variance of the benchmark's, on the trailing
    /// `window` date-aligned observations. `None` unless exactly `window`
    /// aligned returns are available.
    pub fn beta(
        &mut self,
        provider: &dyn MarketDataPort,
        symbol: &str,
        window: usize,
    ) -> Option<f64> {
        let asset = self.history(provider, symbol, HistoryPeriod::TwoYears)?;
        let benchmark_symbol = self.benchmark.clone();
        let bench = self.history(provider, &benchmark_symbol, HistoryPeriod::TwoYears)?;

        let bench_closes: HashMap<_, f64> =
            bench.iter().map(|b| (b.date, b.close)).collect();

        // Align on dates present in both series; the calendars may disagree
        // around holidays or thin sessions.
        let mut asset_aligned = Vec::new();
        let mut bench_aligned = Vec::new();
        for bar in &asset {
            if let Some(&close) = bench_closes.get(&bar.date) {
                asset_aligned.push(bar.close);
                bench_aligned.push(close);
            }
        }

        let asset_returns = pct_returns(&asset_aligned);
        let bench_returns = pct_returns(&bench_aligned);
        if asset_returns.len() < window {
            return None;
        }

        let a_tail = &asset_returns[asset_returns.len() - window..];
        let b_tail = &bench_returns[bench_returns.len() - window..];

        let cov = sample_covariance(a_tail, b_tail)?;
        let var = sample_variance(b_tail)?;
        if var == 0.0 {
            return None;
        }
        Some(cov / var)
    }
}

impl Default for AnalysisToolkit {
    fn default() -> Self {
        Self::new()
    }
}
