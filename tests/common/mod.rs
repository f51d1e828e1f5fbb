#![allow(dead_code)]

use clap::Parser;
use rjournal::cli::{self, Cli};
use rjournal::domain::config::JournalConfig;
use rjournal::domain::error::JournalError;
use rjournal::domain::stats::DerivedReport;
use rjournal::domain::trade::TradeRecord;
use rjournal::ports::trade_store_port::TradeStorePort;
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

/// In-memory store that records what was saved.
pub struct MemoryTradeStore {
    pub trades: RefCell<Vec<TradeRecord>>,
    pub saves: RefCell<usize>,
    pub derived: RefCell<Option<DerivedReport>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self {
            trades: RefCell::new(Vec::new()),
            saves: RefCell::new(0),
            derived: RefCell::new(None),
        }
    }

    pub fn with_trades(trades: Vec<TradeRecord>) -> Self {
        let store = Self::new();
        *store.trades.borrow_mut() = trades;
        store
    }
}

impl TradeStorePort for MemoryTradeStore {
    fn load(&self) -> Result<Vec<TradeRecord>, JournalError> {
        Ok(self.trades.borrow().clone())
    }

    fn save(&self, trades: &[TradeRecord]) -> Result<(), JournalError> {
        *self.trades.borrow_mut() = trades.to_vec();
        *self.saves.borrow_mut() += 1;
        *self.derived.borrow_mut() = None;
        Ok(())
    }

    fn save_with_report(
        &self,
        trades: &[TradeRecord],
        report: &DerivedReport,
    ) -> Result<(), JournalError> {
        self.save(trades)?;
        *self.derived.borrow_mut() = Some(report.clone());
        Ok(())
    }
}

pub fn trades(rs: &[f64]) -> Vec<TradeRecord> {
    rs.iter().map(|&r| TradeRecord::new(r, None)).collect()
}

/// A journal file inside a temporary directory.
pub struct TempJournal {
    pub dir: TempDir,
    pub config: JournalConfig,
}

impl TempJournal {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = JournalConfig {
            journal_path: dir.path().join("trades.csv"),
            report_path: dir.path().join("report.html"),
            ..JournalConfig::default()
        };
        Self { dir, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn journal_arg(&self) -> String {
        self.config.journal_path.display().to_string()
    }
}

/// Parse `args` like the binary does and run the command, capturing stdout.
pub fn run_cli(args: &[&str]) -> Result<String, JournalError> {
    let cli = Cli::try_parse_from(std::iter::once("rjournal").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    cli::execute(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}
