//! A single symbol's aggregated position within the ledger.

/// One holding per symbol, owned by the ledger's registry. Market fields are
/// absent until the first repricing pass supplies a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub quantity: u64,
    /// Quantity-weighted mean purchase price. Updated only on buys.
    pub average_cost: f64,
    pub last_price: Option<f64>,
    pub market_value: Option<f64>,
    pub unrealized_pct: Option<f64>,
}

impl Holding {
    pub fn new(symbol: &str, quantity: u64, price: f64) -> Self {
        Holding {
            symbol: symbol.to_string(),
            quantity,
            average_cost: price,
            last_price: None,
            market_value: Some(quantity as f64 * price),
            unrealized_pct: None,
        }
    }

    pub fn cost_basis(&self) -> f64 {
        self.quantity as f64 * self.average_cost
    }

    /// Market value when a quote has been seen, cost basis otherwise.
    pub fn value_or_cost(&self) -> f64 {
        self.market_value.unwrap_or_else(|| self.cost_basis())
    }

    /// Applies a fresh quote: last price, market value and unrealized
    /// performance against average cost.
    pub fn apply_quote(&mut self, price: f64) {
        self.last_price = Some(price);
        self.market_value = Some(self.quantity as f64 * price);
        self.unrealized_pct = Some((price / self.average_cost - 1.0) * 100.0);
    }
}
