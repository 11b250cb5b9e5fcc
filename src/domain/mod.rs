//! Core domain types and logic.

pub mod analysis;
pub mod chain_store;
pub mod error;
pub mod holding;
pub mod ledger;
pub mod ohlcv;
pub mod series_stats;
