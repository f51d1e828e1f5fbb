//! Report generation port trait.

use std::path::Path;

use crate::domain::config::JournalConfig;
use crate::domain::error::JournalError;
use crate::domain::stats::DerivedReport;
use crate::domain::trade::TradeRecord;

/// Everything a dashboard needs to render.
pub struct ReportContext<'a> {
    pub trades: &'a [TradeRecord],
    pub report: &'a DerivedReport,
    pub config: &'a JournalConfig,
}

/// Port for writing journal dashboards.
pub trait ReportPort {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), JournalError>;
}
