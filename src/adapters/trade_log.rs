//! CSV trade log adapter.
//!
//! Replayable record of executed orders, one `date,action,symbol,quantity,
//! price` row per trade. Actions are `buy` or `sell`, case-insensitive.
//! Unlike the market data adapter, a malformed row here is a hard error:
//! silently skipping a trade would corrupt the replayed account.

use crate::domain::error::FolioError;
use crate::domain::ledger::{Trade, TradeAction};
use std::fs;
use std::path::Path;

pub fn load_trades<P: AsRef<Path>>(path: P) -> Result<Vec<Trade>, FolioError> {
    let content = fs::read_to_string(path)?;
    parse_trades(&content)
}

pub fn parse_trades(content: &str) -> Result<Vec<Trade>, FolioError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut trades = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = result.map_err(|e| FolioError::TradeLog {
            line,
            reason: e.to_string(),
        })?;

        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| FolioError::TradeLog {
                    line,
                    reason: format!("missing {name} column"),
                })
        };

        let action = match field(1, "action")?.to_lowercase().as_str() {
            "buy" => TradeAction::Buy,
            "sell" => TradeAction::Sell,
            other => {
                return Err(FolioError::TradeLog {
                    line,
                    reason: format!("unknown action '{other}'"),
                });
            }
        };

        let symbol = field(2, "symbol")?.to_string();
        let quantity: u64 = field(3, "quantity")?.parse().map_err(|e| {
            FolioError::TradeLog {
                line,
                reason: format!("invalid quantity: {e}"),
            }
        })?;
        let price: f64 = field(4, "price")?.parse().map_err(|e| FolioError::TradeLog {
            line,
            reason: format!("invalid price: {e}"),
        })?;

        trades.push(Trade {
            action,
            symbol,
            quantity,
            price,
        });
    }

    Ok(trades)
}
