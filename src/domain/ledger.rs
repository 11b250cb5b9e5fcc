//! Portfolio ledger: cash balance, asset registry and realized P/L.

use super::chain_store::ChainStore;
use super::error::FolioError;
use super::holding::Holding;
use crate::ports::market_data_port::MarketDataPort;

pub const DEFAULT_INITIAL_DEPOSIT: f64 = 10_000.0;

/// A buy or sell instruction, as replayed from a trade log.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone)]
pub struct LedgerAccount {
    cash_balance: f64,
    realized_pnl: f64,
    registry: ChainStore<String, Holding>,
}

impl LedgerAccount {
    pub fn new(initial_deposit: f64) -> Self {
        LedgerAccount {
            cash_balance: initial_deposit,
            realized_pnl: 0.0,
            registry: ChainStore::new(),
        }
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    /// Cumulative signed profit locked in by completed sales.
    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.registry.get(&symbol.to_string())
    }

    pub fn holding_count(&self) -> usize {
        self.registry.len()
    }

    /// Holdings in registry enumeration order. The order is a hashing
    /// artifact; presentation layers wanting a stable display must sort.
    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.registry.items().map(|(_, h)| h)
    }

    /// Registers a purchase. Fails with [`FolioError::InsufficientFunds`]
    /// and no side effects when the total cost exceeds the cash balance.
    ///
    /// A repeat purchase folds into the existing holding with an exact
    /// weighted average cost; no rounding happens here.
    pub fn buy(&mut self, symbol: &str, quantity: u64, price: f64) -> Result<(), FolioError> {
        let cost = quantity as f64 * price;
        if cost > self.cash_balance {
            return Err(FolioError::InsufficientFunds {
                symbol: symbol.to_string(),
                needed: cost,
                available: self.cash_balance,
            });
        }

        self.cash_balance -= cost;

        let key = symbol.to_string();
        let folded = match self.registry.get_mut(&key) {
            Some(holding) => {
                let old_qty = holding.quantity as f64;
                let new_qty = holding.quantity + quantity;
                holding.average_cost = (old_qty * holding.average_cost
                    + quantity as f64 * price)
                    / new_qty as f64;
                holding.quantity = new_qty;

                // Revalue at the last seen market price, falling back to
                // this purchase's price before any quote has arrived.
                let recent = holding.last_price.unwrap_or(price);
                holding.market_value = Some(new_qty as f64 * recent);
                true
            }
            None => false,
        };

        if !folded {
            self.registry.put(key, Holding::new(symbol, quantity, price));
        }

        Ok(())
    }

    /// Registers a sale. Fails with [`FolioError::InvalidSale`] and no side
    /// effects when the symbol is not held or the quantity exceeds the held
    /// amount. Selling a position down to exactly zero removes it from the
    /// registry. Average cost is a cost-basis figure and never changes here.
    pub fn sell(&mut self, symbol: &str, quantity: u64, price: f64) -> Result<(), FolioError> {
        let held = self
            .registry
            .get(&symbol.to_string())
            .map(|holding| holding.quantity);
        match held {
            Some(qty) if qty >= quantity => {}
            _ => {
                return Err(FolioError::InvalidSale {
                    symbol: symbol.to_string(),
                    requested: quantity,
                    held: held.unwrap_or(0),
                });
            }
        }

        self.cash_balance += quantity as f64 * price;

        let mut remaining = 0;
        if let Some(holding) = self.registry.get_mut(&symbol.to_string()) {
            self.realized_pnl += (price - holding.average_cost) * quantity as f64;
            holding.quantity -= quantity;
            remaining = holding.quantity;
        }

        if remaining == 0 {
            self.registry.delete(&symbol.to_string());
        }

        Ok(())
    }

    /// Applies an executed trade from a replayed log.
    pub fn apply(&mut self, trade: &Trade) -> Result<(), FolioError> {
        match trade.action {
            TradeAction::Buy => self.buy(&trade.symbol, trade.quantity, trade.price),
            TradeAction::Sell => self.sell(&trade.symbol, trade.quantity, trade.price),
        }
    }

    /// Refreshes market fields for every holding from a batch quote fetch.
    /// A symbol missing from the batch keeps its stale fields; the pass
    /// never aborts on a partial failure. Returns how many holdings were
    /// repriced.
    pub fn reprice(&mut self, provider: &dyn MarketDataPort) -> usize {
        let symbols: Vec<String> = self.registry.keys().cloned().collect();
        if symbols.is_empty() {
            return 0;
        }

        let quotes = provider.last_close_batch(&symbols);
        let mut updated = 0;

        for symbol in &symbols {
            if let Some(&price) = quotes.get(symbol) {
                if let Some(holding) = self.registry.get_mut(symbol) {
                    holding.apply_quote(price);
                    updated += 1;
                }
            }
        }

        updated
    }

    /// Parallel label/value sequences for a composition chart, in registry
    /// enumeration order. Holdings whose value is not positive are excluded.
    pub fn distribution(&self) -> (Vec<String>, Vec<f64>) {
        let mut labels = Vec::new();
        let mut values = Vec::new();

        for holding in self.holdings() {
            let value = holding.value_or_cost();
            if value > 0.0 {
                labels.push(holding.symbol.clone());
                values.push(value);
            }
        }

        (labels, values)
    }

    pub fn total_portfolio_value(&self) -> f64 {
        self.holdings().map(|h| h.value_or_cost()).sum()
    }

    pub fn net_worth(&self) -> f64 {
        self.cash_balance + self.total_portfolio_value()
    }
}

impl Default for LedgerAccount {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DEPOSIT)
    }
}
