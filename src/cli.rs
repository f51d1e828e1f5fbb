//! CLI definition and dispatch.
//!
//! Every command follows the same cycle: resolve the configuration, load the
//! journal, apply at most one mutation, recompute the statistics, save if the
//! log changed, and print the result to stdout.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvTradeStore;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::adapters::summary::{self, format_money, format_r};
use crate::domain::config::{
    AccountSize, JournalConfig, DEFAULT_JOURNAL_PATH, DEFAULT_REPORT_PATH, DEFAULT_RISK_PER_TRADE,
};
use crate::domain::config_validation::{
    validate_journal_config, validate_path_value, validate_risk_value,
};
use crate::domain::error::JournalError;
use crate::domain::stats::{self, DerivedReport};
use crate::domain::trade::{parse_r_multiple, TradeLog, PRESETS};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{ReportContext, ReportPort};
use crate::ports::trade_store_port::TradeStorePort;

#[derive(Parser, Debug)]
#[command(name = "rjournal", about = "R-multiple trade journal")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Journal CSV file (overrides [journal] path)
    #[arg(short, long, global = true)]
    pub journal: Option<PathBuf>,
    /// Risk per trade (overrides [account] risk_per_trade)
    #[arg(long, global = true)]
    pub risk: Option<f64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a trade outcome, e.g. +1R, -1R, 0.5
    Record {
        #[arg(allow_hyphen_values = true)]
        outcome: String,
        #[arg(short = 'm', long)]
        comment: Option<String>,
    },
    /// Remove the most recent trade
    Undo,
    /// Show journal statistics
    Stats,
    /// Show every trade with its derived columns
    History,
    /// Save the journal to another CSV file
    Export {
        #[arg(short, long)]
        output: PathBuf,
        /// Include pnl, cumulative_pnl and streak columns
        #[arg(long)]
        with_derived: bool,
    },
    /// Replace the journal with the trades from a CSV file
    Import {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write the HTML dashboard
    Report {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the quick-entry outcomes
    Presets,
}

pub fn run(cli: Cli) -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match execute(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<(), JournalError> {
    if let Command::Presets = cli.command {
        return run_presets(out);
    }

    let config = resolve_config(cli.config.as_deref(), cli.journal, cli.risk)?;

    match cli.command {
        Command::Record { outcome, comment } => run_record(&config, &outcome, comment, out),
        Command::Undo => run_undo(&config, out),
        Command::Stats => run_stats(&config, out),
        Command::History => run_history(&config, out),
        Command::Export {
            output,
            with_derived,
        } => run_export(&config, &output, with_derived, out),
        Command::Import { input } => run_import(&config, &input, out),
        Command::Report { output } => run_report(&config, output, out),
        Command::Presets => run_presets(out),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, JournalError> {
    FileConfigAdapter::from_file(path).map_err(|e| JournalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_journal_config(adapter: &dyn ConfigPort) -> Result<JournalConfig, JournalError> {
    validate_journal_config(adapter)?;

    let journal_path = adapter
        .get_string("journal", "path")
        .unwrap_or_else(|| DEFAULT_JOURNAL_PATH.to_string());
    let report_path = adapter
        .get_string("report", "output")
        .unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string());
    let account_size = AccountSize::new(adapter.get_double(
        "account",
        "size",
        AccountSize::default().value(),
    ))?;

    Ok(JournalConfig {
        journal_path: PathBuf::from(journal_path.trim()),
        report_path: PathBuf::from(report_path.trim()),
        account_size,
        risk_per_trade: adapter.get_double("account", "risk_per_trade", DEFAULT_RISK_PER_TRADE),
    })
}

/// Merge the optional config file with command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    journal_override: Option<PathBuf>,
    risk_override: Option<f64>,
) -> Result<JournalConfig, JournalError> {
    let adapter = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };

    let mut config = build_journal_config(&adapter)?;

    if let Some(path) = journal_override {
        validate_path_value("journal", "path", &path.to_string_lossy())?;
        config.journal_path = path;
    }
    if let Some(risk) = risk_override {
        validate_risk_value(risk)?;
        config.risk_per_trade = risk;
    }

    info!(
        journal = %config.journal_path.display(),
        account_size = config.account_size.value(),
        risk_per_trade = config.risk_per_trade,
        "config resolved"
    );
    Ok(config)
}

fn open_journal(config: &JournalConfig) -> Result<(CsvTradeStore, TradeLog), JournalError> {
    let store = CsvTradeStore::new(config.journal_path.clone());
    let log = TradeLog::from_records(store.load()?);
    Ok((store, log))
}

pub fn run_record(
    config: &JournalConfig,
    outcome: &str,
    comment: Option<String>,
    out: &mut dyn Write,
) -> Result<(), JournalError> {
    let r_multiple = parse_r_multiple(outcome)?;
    let (store, mut log) = open_journal(config)?;

    log.record(r_multiple, comment);
    let report = stats::compute(log.records(), config.risk_per_trade)?;
    store.save(log.records())?;

    info!(r_multiple, trades = log.len(), "trade recorded");
    writeln!(out, "Recorded {} as trade #{}", format_r(r_multiple), log.len())?;
    write_summary(out, &report, config)
}

pub fn run_undo(config: &JournalConfig, out: &mut dyn Write) -> Result<(), JournalError> {
    let (store, mut log) = open_journal(config)?;

    let Some(removed) = log.undo_last() else {
        writeln!(out, "No trades to undo.")?;
        return Ok(());
    };

    let report = stats::compute(log.records(), config.risk_per_trade)?;
    store.save(log.records())?;

    warn!(r_multiple = removed.r_multiple, "last trade entry removed");
    writeln!(
        out,
        "Last trade entry removed ({}). {} trades remain.",
        format_r(removed.r_multiple),
        log.len()
    )?;
    if log.is_empty() {
        return Ok(());
    }
    write_summary(out, &report, config)
}

pub fn run_stats(config: &JournalConfig, out: &mut dyn Write) -> Result<(), JournalError> {
    let (_, log) = open_journal(config)?;
    let report = stats::compute(log.records(), config.risk_per_trade)?;

    if log.is_empty() {
        writeln!(out, "No trades recorded yet.")?;
        return Ok(());
    }
    write_summary(out, &report, config)
}

pub fn run_history(config: &JournalConfig, out: &mut dyn Write) -> Result<(), JournalError> {
    let (_, log) = open_journal(config)?;
    let report = stats::compute(log.records(), config.risk_per_trade)?;

    if log.is_empty() {
        writeln!(out, "No trades recorded yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>4}  {:>7}  {:>12}  {:>14}  {:>6}  Comment",
        "#", "R", "PnL", "Cumulative", "Streak"
    )?;
    for row in summary::history_rows(log.records(), &report) {
        writeln!(
            out,
            "{:>4}  {:>7}  {:>12}  {:>14}  {:>6}  {}",
            row.number, row.r_multiple, row.pnl, row.cumulative_pnl, row.streak, row.comment
        )?;
    }
    Ok(())
}

pub fn run_export(
    config: &JournalConfig,
    output: &Path,
    with_derived: bool,
    out: &mut dyn Write,
) -> Result<(), JournalError> {
    let (_, log) = open_journal(config)?;
    if log.is_empty() {
        writeln!(out, "No trades to export.")?;
        return Ok(());
    }

    let target = CsvTradeStore::new(output.to_path_buf());
    if with_derived {
        let report = stats::compute(log.records(), config.risk_per_trade)?;
        target.save_with_report(log.records(), &report)?;
    } else {
        target.save(log.records())?;
    }

    info!(path = %output.display(), trades = log.len(), "journal exported");
    writeln!(out, "Trades saved to {}", output.display())?;
    Ok(())
}

pub fn run_import(
    config: &JournalConfig,
    input: &Path,
    out: &mut dyn Write,
) -> Result<(), JournalError> {
    if !input.exists() {
        return Err(JournalError::TradeFile {
            path: input.display().to_string(),
            reason: "file not found".to_string(),
        });
    }

    let records = CsvTradeStore::new(input.to_path_buf()).load()?;
    let store = CsvTradeStore::new(config.journal_path.clone());
    let mut log = match store.load() {
        Ok(records) => TradeLog::from_records(records),
        Err(e) => {
            warn!(error = %e, "current journal unreadable, replacing it");
            TradeLog::new()
        }
    };
    let previous = log.len();

    log.replace(records);
    let report = stats::compute(log.records(), config.risk_per_trade)?;
    store.save(log.records())?;

    writeln!(out, "Trades loaded: {} (replaced {})", log.len(), previous)?;
    if log.is_empty() {
        return Ok(());
    }
    write_summary(out, &report, config)
}

pub fn run_report(
    config: &JournalConfig,
    output: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<(), JournalError> {
    let (_, log) = open_journal(config)?;
    let report = stats::compute(log.records(), config.risk_per_trade)?;
    let output = output.unwrap_or_else(|| config.report_path.clone());

    let ctx = ReportContext {
        trades: log.records(),
        report: &report,
        config,
    };
    HtmlReportAdapter::new().write(&ctx, &output)?;

    writeln!(out, "Report written to: {}", output.display())?;
    Ok(())
}

pub fn run_presets(out: &mut dyn Write) -> Result<(), JournalError> {
    for preset in PRESETS {
        writeln!(out, "{:>6}  {}", preset.label, preset.r_multiple)?;
    }
    Ok(())
}

pub fn write_summary(
    out: &mut dyn Write,
    report: &DerivedReport,
    config: &JournalConfig,
) -> Result<(), JournalError> {
    writeln!(
        out,
        "\n=== {} trades | account {} | risk {} ===",
        report.total_trades(),
        format_money(config.account_size.value()),
        format_money(config.risk_per_trade)
    )?;
    for row in summary::metric_rows(report, config) {
        for metric in row {
            writeln!(out, "{:<16}{}", format!("{}:", metric.label), metric.value)?;
        }
    }
    Ok(())
}
