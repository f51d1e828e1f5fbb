//! Trade journal persistence port trait.

use crate::domain::error::JournalError;
use crate::domain::stats::DerivedReport;
use crate::domain::trade::TradeRecord;

pub trait TradeStorePort {
    /// Load every stored trade in chronological order.
    fn load(&self) -> Result<Vec<TradeRecord>, JournalError>;

    /// Overwrite the store with `trades`.
    fn save(&self, trades: &[TradeRecord]) -> Result<(), JournalError>;

    /// Overwrite the store with `trades` plus the per-trade columns of `report`.
    fn save_with_report(
        &self,
        trades: &[TradeRecord],
        report: &DerivedReport,
    ) -> Result<(), JournalError>;
}
