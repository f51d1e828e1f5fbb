//! Journal settings: account size, risk per trade and file locations.

use std::path::PathBuf;

use super::error::JournalError;

pub const DEFAULT_JOURNAL_PATH: &str = "trades.csv";
pub const DEFAULT_REPORT_PATH: &str = "report.html";
pub const DEFAULT_RISK_PER_TRADE: f64 = 100.0;

pub const ACCOUNT_SIZE_PRESETS: [f64; 3] = [50_000.0, 100_000.0, 150_000.0];
pub const MIN_CUSTOM_ACCOUNT_SIZE: f64 = 1_000.0;

/// Account size. Informational only: statistics never depend on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSize(f64);

impl AccountSize {
    pub fn new(value: f64) -> Result<Self, JournalError> {
        if !value.is_finite() || value < MIN_CUSTOM_ACCOUNT_SIZE {
            return Err(JournalError::ConfigInvalid {
                section: "account".into(),
                key: "size".into(),
                reason: format!("account size must be at least {MIN_CUSTOM_ACCOUNT_SIZE}"),
            });
        }
        Ok(AccountSize(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_preset(&self) -> bool {
        ACCOUNT_SIZE_PRESETS.contains(&self.0)
    }

    /// `amount` as a percentage of the account.
    pub fn percent_of(&self, amount: f64) -> f64 {
        100.0 * amount / self.0
    }
}

impl Default for AccountSize {
    fn default() -> Self {
        AccountSize(ACCOUNT_SIZE_PRESETS[0])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JournalConfig {
    pub journal_path: PathBuf,
    pub report_path: PathBuf,
    pub account_size: AccountSize,
    pub risk_per_trade: f64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        JournalConfig {
            journal_path: PathBuf::from(DEFAULT_JOURNAL_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            account_size: AccountSize::default(),
            risk_per_trade: DEFAULT_RISK_PER_TRADE,
        }
    }
}
