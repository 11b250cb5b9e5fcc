//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_market_data::CsvMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::trade_log;
use crate::domain::analysis::{
    AnalysisToolkit, DEFAULT_BENCHMARK, DEFAULT_BETA_WINDOW, DEFAULT_RSI_PERIOD,
    DEFAULT_VOLATILITY_WINDOW,
};
use crate::domain::error::FolioError;
use crate::domain::holding::Holding;
use crate::domain::ledger::{LedgerAccount, DEFAULT_INITIAL_DEPOSIT};
use crate::domain::ohlcv::HistoryPeriod;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Simulated equities portfolio tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a trade log and print the portfolio report
    Report {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        trades: PathBuf,
        /// Skip the market repricing pass (holdings valued at cost)
        #[arg(long)]
        no_reprice: bool,
    },
    /// Print volatility, RSI and beta for a symbol
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: String,
    },
    /// List symbols available in the data directory
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Settings resolved from the INI config.
#[derive(Debug)]
pub struct Settings {
    pub initial_deposit: f64,
    pub data_path: PathBuf,
    pub benchmark: String,
    pub volatility_window: usize,
    pub rsi_period: usize,
    pub beta_window: usize,
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, FolioError> {
    let data_path = config
        .get_string("data", "path")
        .ok_or_else(|| FolioError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;

    let initial_deposit =
        config.get_double("account", "initial_deposit", DEFAULT_INITIAL_DEPOSIT);
    if initial_deposit < 0.0 {
        return Err(FolioError::ConfigInvalid {
            section: "account".into(),
            key: "initial_deposit".into(),
            reason: "must not be negative".into(),
        });
    }

    let window_key = |key: &str, default: usize| -> Result<usize, FolioError> {
        let value = config.get_int("analysis", key, default as i64);
        usize::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| FolioError::ConfigInvalid {
                section: "analysis".into(),
                key: key.into(),
                reason: "must be a positive integer".into(),
            })
    };

    Ok(Settings {
        initial_deposit,
        data_path: PathBuf::from(data_path),
        benchmark: config
            .get_string("analysis", "benchmark")
            .unwrap_or_else(|| DEFAULT_BENCHMARK.to_string()),
        volatility_window: window_key("volatility_window", DEFAULT_VOLATILITY_WINDOW)?,
        rsi_period: window_key("rsi_period", DEFAULT_RSI_PERIOD)?,
        beta_window: window_key("beta_window", DEFAULT_BETA_WINDOW)?,
    })
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            trades,
            no_reprice,
        } => run_report(&config, &trades, no_reprice),
        Command::Indicators { config, symbol } => run_indicators(&config, &symbol),
        Command::Symbols { config } => run_symbols(&config),
    }
}

fn load_settings(path: &PathBuf) -> Result<Settings, ExitCode> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;

    build_settings(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_report(config_path: &PathBuf, trades_path: &PathBuf, no_reprice: bool) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    eprintln!("Loading trades from {}", trades_path.display());
    let trades = match trade_log::load_trades(trades_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut account = LedgerAccount::new(settings.initial_deposit);
    for trade in &trades {
        // A rejected trade leaves the account untouched; keep replaying the
        // rest, as the interactive original did.
        if let Err(e) = account.apply(trade) {
            eprintln!("warning: skipped trade: {e}");
        }
    }

    let provider = CsvMarketData::new(settings.data_path);
    if !no_reprice {
        let updated = account.reprice(&provider);
        eprintln!("Repriced {updated} of {} holdings", account.holding_count());
    }

    print_report(&account);
    ExitCode::SUCCESS
}

fn print_report(account: &LedgerAccount) {
    println!("{:=<72}", "");
    println!("{:^72}", "PORTFOLIO REPORT");
    println!("{:=<72}", "");
    println!("Cash balance: {:.2}", account.cash_balance());
    println!();

    // Registry enumeration order is a hashing artifact; sort for display.
    let mut holdings: Vec<&Holding> = account.holdings().collect();
    holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    if holdings.is_empty() {
        println!("No holdings.");
    } else {
        println!(
            "{:<10} {:>8} {:>10} {:>10} {:>12} {:>8}",
            "Symbol", "Qty", "Avg Cost", "Last", "Value", "Perf%"
        );
        for h in &holdings {
            println!(
                "{:<10} {:>8} {:>10.2} {:>10} {:>12.2} {:>8}",
                h.symbol,
                h.quantity,
                h.average_cost,
                h.last_price
                    .map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
                h.value_or_cost(),
                h.unrealized_pct
                    .map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
            );
        }
    }

    println!();
    let (labels, values) = account.distribution();
    if !labels.is_empty() {
        let total: f64 = values.iter().sum();
        println!("Composition:");
        for (label, value) in labels.iter().zip(values.iter()) {
            println!("  {:<10} {:>6.2}%", label, value / total * 100.0);
        }
        println!();
    }

    println!("Portfolio value:  {:.2}", account.total_portfolio_value());
    println!("Realized P/L:     {:.2}", account.realized_pnl());
    println!("Net worth:        {:.2}", account.net_worth());
    println!("{:=<72}", "");
}

fn run_indicators(config_path: &PathBuf, symbol: &str) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let provider = CsvMarketData::new(settings.data_path);
    let mut toolkit = AnalysisToolkit::with_benchmark(&settings.benchmark);

    if toolkit
        .history(&provider, symbol, HistoryPeriod::OneYear)
        .is_none()
    {
        let err = FolioError::DataUnavailable {
            symbol: symbol.to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let fmt = |value: Option<f64>, suffix: &str| {
        value.map_or_else(
            || "n/a (insufficient history)".to_string(),
            |v| format!("{v:.2}{suffix}"),
        )
    };

    let volatility = toolkit.volatility(&provider, symbol, settings.volatility_window);
    let rsi = toolkit.rsi(&provider, symbol, settings.rsi_period);
    let beta = toolkit.beta(&provider, symbol, settings.beta_window);

    println!("Indicators for {symbol}:");
    println!(
        "  Volatility ({}d, annualized): {}",
        settings.volatility_window,
        fmt(volatility, "%")
    );
    println!("  RSI ({}d): {}", settings.rsi_period, fmt(rsi, ""));
    println!(
        "  Beta ({}d vs {}): {}",
        settings.beta_window,
        settings.benchmark,
        fmt(beta, "")
    );

    ExitCode::SUCCESS
}

fn run_symbols(config_path: &PathBuf) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let provider = CsvMarketData::new(settings.data_path);
    match provider.list_symbols() {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
