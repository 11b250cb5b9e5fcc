//! Market data provider port trait.
//!
//! The provider is an opaque collaborator: quotes and history may be absent
//! for any symbol at any time (bad ticker, network trouble, thin listing),
//! and implementations must express that as absence rather than panicking
//! into the core.

use crate::domain::ohlcv::{HistoryPeriod, OhlcvBar};
use std::collections::HashMap;

pub trait MarketDataPort {
    /// Most recent traded price, if one can be obtained.
    fn current_price(&self, symbol: &str) -> Option<f64>;

    /// Daily bars for the requested period, ascending by date. `None` for
    /// unknown symbols or fetch failures; an empty series is also reported
    /// as `None`.
    fn history(&self, symbol: &str, period: HistoryPeriod) -> Option<Vec<OhlcvBar>>;

    /// Last close per symbol for a whole watch list. Symbols that could not
    /// be quoted are simply missing from the map.
    fn last_close_batch(&self, symbols: &[String]) -> HashMap<String, f64> {
        symbols
            .iter()
            .filter_map(|s| self.current_price(s).map(|p| (s.clone(), p)))
            .collect()
    }
}
