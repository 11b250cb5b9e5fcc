//! Domain error types.
//!
//! Ledger failures are recoverable: the caller keeps the account in its
//! pre-call state and decides what to do. Indicator functions do not use
//! these at all; insufficient history is `None`, not an error.

/// Top-level error type for folio.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("insufficient funds to buy {symbol}: need {needed:.2}, have {available:.2}")]
    InsufficientFunds {
        symbol: String,
        needed: f64,
        available: f64,
    },

    #[error("invalid sale of {symbol}: requested {requested}, holding {held}")]
    InvalidSale {
        symbol: String,
        requested: u64,
        held: u64,
    },

    #[error("no market data available for {symbol}")]
    DataUnavailable { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade log error at line {line}: {reason}")]
    TradeLog { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FolioError> for std::process::ExitCode {
    fn from(err: &FolioError) -> Self {
        let code: u8 = match err {
            FolioError::Io(_) => 1,
            FolioError::ConfigParse { .. }
            | FolioError::ConfigMissing { .. }
            | FolioError::ConfigInvalid { .. } => 2,
            FolioError::TradeLog { .. } => 3,
            FolioError::InsufficientFunds { .. } | FolioError::InvalidSale { .. } => 4,
            FolioError::DataUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
