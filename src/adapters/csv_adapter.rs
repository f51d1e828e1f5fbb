//! CSV trade journal adapter.
//!
//! Columns are `r_multiple,comment`. Loading also accepts the `R,Comment`
//! header of older journal files and ignores any extra (derived) columns.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::error::JournalError;
use crate::domain::stats::DerivedReport;
use crate::domain::trade::TradeRecord;
use crate::ports::trade_store_port::TradeStorePort;

#[derive(Debug, Deserialize)]
struct TradeRow {
    #[serde(alias = "R")]
    r_multiple: f64,
    #[serde(default, alias = "Comment")]
    comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct TradeRowOut<'a> {
    r_multiple: f64,
    comment: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DerivedRowOut<'a> {
    r_multiple: f64,
    comment: Option<&'a str>,
    pnl: f64,
    cumulative_pnl: f64,
    streak: i64,
}

pub struct CsvTradeStore {
    path: PathBuf,
}

impl CsvTradeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn file_error(&self, reason: impl std::fmt::Display) -> JournalError {
        JournalError::TradeFile {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn writer(&self) -> Result<csv::Writer<fs::File>, JournalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        csv::Writer::from_path(&self.path).map_err(|e| self.file_error(e))
    }
}

impl TradeStorePort for CsvTradeStore {
    fn load(&self) -> Result<Vec<TradeRecord>, JournalError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "journal file not found, starting empty");
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.file_error(e))?;

        let mut trades = Vec::new();
        for (index, result) in rdr.deserialize::<TradeRow>().enumerate() {
            let row = result.map_err(|e| self.file_error(e))?;
            if !row.r_multiple.is_finite() {
                return Err(self.file_error(format!(
                    "row {}: R multiple must be finite",
                    index + 1
                )));
            }
            trades.push(TradeRecord::new(row.r_multiple, row.comment));
        }

        debug!(path = %self.path.display(), trades = trades.len(), "journal loaded");
        Ok(trades)
    }

    fn save(&self, trades: &[TradeRecord]) -> Result<(), JournalError> {
        let mut wtr = self.writer()?;
        for trade in trades {
            wtr.serialize(TradeRowOut {
                r_multiple: trade.r_multiple,
                comment: trade.comment.as_deref(),
            })
            .map_err(|e| self.file_error(e))?;
        }
        if trades.is_empty() {
            wtr.write_record(["r_multiple", "comment"])
                .map_err(|e| self.file_error(e))?;
        }
        wtr.flush()?;

        debug!(path = %self.path.display(), trades = trades.len(), "journal saved");
        Ok(())
    }

    fn save_with_report(
        &self,
        trades: &[TradeRecord],
        report: &DerivedReport,
    ) -> Result<(), JournalError> {
        if report.total_trades() != trades.len() {
            return Err(self.file_error(format!(
                "report covers {} trades but the log holds {}",
                report.total_trades(),
                trades.len()
            )));
        }

        let mut wtr = self.writer()?;
        for (i, trade) in trades.iter().enumerate() {
            wtr.serialize(DerivedRowOut {
                r_multiple: trade.r_multiple,
                comment: trade.comment.as_deref(),
                pnl: report.pnl_series[i],
                cumulative_pnl: report.cumulative_pnl_series[i],
                streak: report.streak_series[i],
            })
            .map_err(|e| self.file_error(e))?;
        }
        if trades.is_empty() {
            wtr.write_record(["r_multiple", "comment", "pnl", "cumulative_pnl", "streak"])
                .map_err(|e| self.file_error(e))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
