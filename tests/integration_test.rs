//! Integration tests.
//!
//! Tests cover:
//! - Trade log replay through the ledger, repriced from a mock provider
//! - Partial-failure repricing across a mixed watch list
//! - Indicator pipeline over CSV-backed market data on disk
//! - Settings resolution from an INI file feeding the full report path

mod common;

use approx::assert_relative_eq;
use common::*;
use folio::adapters::csv_market_data::CsvMarketData;
use folio::adapters::file_config_adapter::FileConfigAdapter;
use folio::adapters::trade_log;
use folio::cli::build_settings;
use folio::domain::analysis::AnalysisToolkit;
use folio::domain::ledger::LedgerAccount;
use std::fs;
use tempfile::TempDir;

mod trade_replay {
    use super::*;

    const TRADES: &str = "date,action,symbol,quantity,price\n\
        2024-01-02,buy,PETR4,100,30.00\n\
        2024-01-05,buy,VALE3,50,60.00\n\
        2024-01-10,buy,PETR4,100,34.00\n\
        2024-02-01,sell,PETR4,150,36.00\n";

    #[test]
    fn replay_produces_expected_ledger() {
        let trades = trade_log::parse_trades(TRADES).unwrap();
        let mut account = LedgerAccount::new(10_000.0);
        for trade in &trades {
            account.apply(trade).unwrap();
        }

        // Cash: 10000 - 3000 - 3000 - 3400 + 5400 = 6000.
        assert_relative_eq!(account.cash_balance(), 6_000.0);

        // PETR4 average cost (100*30 + 100*34) / 200 = 32; sold 150 at 36.
        assert_relative_eq!(account.realized_pnl(), 150.0 * (36.0 - 32.0));

        let petr = account.holding("PETR4").unwrap();
        assert_eq!(petr.quantity, 50);
        assert_relative_eq!(petr.average_cost, 32.0);

        let vale = account.holding("VALE3").unwrap();
        assert_eq!(vale.quantity, 50);
    }

    #[test]
    fn rejected_trades_leave_account_consistent() {
        let content = "date,action,symbol,quantity,price\n\
            2024-01-02,buy,PETR4,10,100.00\n\
            2024-01-03,buy,PETR4,1000,100.00\n\
            2024-01-04,sell,VALE3,1,50.00\n\
            2024-01-05,sell,PETR4,5,110.00\n";
        let trades = trade_log::parse_trades(content).unwrap();

        let mut account = LedgerAccount::new(2_000.0);
        let mut rejected = 0;
        for trade in &trades {
            if account.apply(trade).is_err() {
                rejected += 1;
            }
        }

        assert_eq!(rejected, 2);
        assert_relative_eq!(account.cash_balance(), 2_000.0 - 1_000.0 + 550.0);
        assert_eq!(account.holding("PETR4").unwrap().quantity, 5);
        assert_relative_eq!(account.realized_pnl(), 50.0);
    }

    #[test]
    fn reprice_from_mock_provider_is_partial_failure_tolerant() {
        let trades = trade_log::parse_trades(TRADES).unwrap();
        let mut account = LedgerAccount::new(10_000.0);
        for trade in &trades {
            account.apply(trade).unwrap();
        }

        // Quotes exist for PETR4 only; VALE3 stays valued at cost.
        let provider = MockProvider::new()
            .with_series("PETR4", vec![make_bar("PETR4", "2024-02-02", 40.0)]);
        let updated = account.reprice(&provider);
        assert_eq!(updated, 1);

        let petr = account.holding("PETR4").unwrap();
        assert_eq!(petr.last_price, Some(40.0));
        assert_relative_eq!(petr.market_value.unwrap(), 50.0 * 40.0);
        assert_relative_eq!(petr.unrealized_pct.unwrap(), 25.0);

        let vale = account.holding("VALE3").unwrap();
        assert_eq!(vale.last_price, None);

        // Net worth: 6000 cash + 2000 PETR4 marked + 3000 VALE3 at cost.
        assert_relative_eq!(account.net_worth(), 11_000.0);

        let (labels, values) = account.distribution();
        assert_eq!(labels.len(), 2);
        assert_relative_eq!(values.iter().sum::<f64>(), 5_000.0);
    }
}

mod indicators_over_csv_data {
    use super::*;

    fn write_quotes(dir: &TempDir, symbol: &str, closes: &[f64]) {
        let bars = generate_bars(symbol, "2023-01-01", closes);
        fs::write(
            dir.path().join(format!("{symbol}.csv")),
            bars_to_csv(&bars),
        )
        .unwrap();
    }

    #[test]
    fn full_indicator_pipeline_from_disk() {
        let dir = TempDir::new().unwrap();

        // 80 sessions of a gently trending, wobbling price.
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + i as f64 * 0.2 + (i as f64 * 0.9).sin() * 2.0)
            .collect();
        write_quotes(&dir, "PETR4", &closes);
        write_quotes(&dir, "^BVSP", &closes);

        let provider = CsvMarketData::new(dir.path().to_path_buf());
        let mut toolkit = AnalysisToolkit::new();

        let vol = toolkit.volatility(&provider, "PETR4", 60).unwrap();
        assert!(vol > 0.0);

        let rsi = toolkit.rsi(&provider, "PETR4", 14).unwrap();
        assert!((0.0..=100.0).contains(&rsi));

        // The symbol tracks the benchmark exactly.
        let beta = toolkit.beta(&provider, "PETR4", 60).unwrap();
        assert_relative_eq!(beta, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn indicators_absent_for_thin_history() {
        let dir = TempDir::new().unwrap();
        write_quotes(&dir, "THIN", &[10.0, 11.0, 12.0]);

        let provider = CsvMarketData::new(dir.path().to_path_buf());
        let mut toolkit = AnalysisToolkit::new();

        assert!(toolkit.volatility(&provider, "THIN", 60).is_none());
        assert!(toolkit.rsi(&provider, "THIN", 14).is_none());
        assert!(toolkit.beta(&provider, "THIN", 252).is_none());
    }
}

mod settings_to_report_path {
    use super::*;

    #[test]
    fn ini_settings_drive_ledger_and_reprice() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("quotes");
        fs::create_dir(&data_dir).unwrap();

        let bars = generate_bars("PETR4", "2024-01-01", &[30.0, 31.0, 33.0]);
        fs::write(data_dir.join("PETR4.csv"), bars_to_csv(&bars)).unwrap();

        let config_content = format!(
            "[account]\ninitial_deposit = 5000\n\n[data]\npath = {}\n",
            data_dir.display()
        );
        let config_path = dir.path().join("folio.ini");
        fs::write(&config_path, &config_content).unwrap();

        let adapter = FileConfigAdapter::from_file(&config_path).unwrap();
        let settings = build_settings(&adapter).unwrap();
        assert_relative_eq!(settings.initial_deposit, 5_000.0);

        let mut account = LedgerAccount::new(settings.initial_deposit);
        account.buy("PETR4", 100, 30.0).unwrap();

        let provider = CsvMarketData::new(settings.data_path);
        assert_eq!(account.reprice(&provider), 1);

        let holding = account.holding("PETR4").unwrap();
        assert_eq!(holding.last_price, Some(33.0));
        assert_relative_eq!(account.net_worth(), 2_000.0 + 3_300.0);
        assert_relative_eq!(holding.unrealized_pct.unwrap(), 10.0);
    }
}
