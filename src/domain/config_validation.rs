//! Configuration validation.
//!
//! Validates all config fields before any command touches the journal.

use crate::domain::config::MIN_CUSTOM_ACCOUNT_SIZE;
use crate::domain::error::JournalError;
use crate::ports::config_port::ConfigPort;

pub fn validate_journal_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_account_size(config)?;
    validate_risk_per_trade(config)?;
    validate_path(config, "journal", "path")?;
    validate_path(config, "report", "output")?;
    Ok(())
}

/// Check a CLI `--risk` override the same way the file value is checked.
pub fn validate_risk_value(value: f64) -> Result<(), JournalError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(JournalError::ConfigInvalid {
            section: "account".to_string(),
            key: "risk_per_trade".to_string(),
            reason: "risk_per_trade must be positive".to_string(),
        });
    }
    Ok(())
}

fn parse_number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, JournalError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .replace('_', "")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| JournalError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("expected a number, got {raw:?}"),
            }),
    }
}

fn validate_account_size(config: &dyn ConfigPort) -> Result<(), JournalError> {
    if let Some(value) = parse_number(config, "account", "size")? {
        if !value.is_finite() || value < MIN_CUSTOM_ACCOUNT_SIZE {
            return Err(JournalError::ConfigInvalid {
                section: "account".to_string(),
                key: "size".to_string(),
                reason: format!("size must be at least {MIN_CUSTOM_ACCOUNT_SIZE}"),
            });
        }
    }
    Ok(())
}

fn validate_risk_per_trade(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match parse_number(config, "account", "risk_per_trade")? {
        Some(value) => validate_risk_value(value),
        None => Ok(()),
    }
}

fn validate_path(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), JournalError> {
    match config.get_string(section, key) {
        Some(s) => validate_path_value(section, key, &s),
        None => Ok(()),
    }
}

/// Reject a blank path, whether it came from the file or a CLI override.
pub fn validate_path_value(section: &str, key: &str, value: &str) -> Result<(), JournalError> {
    if value.trim().is_empty() {
        return Err(JournalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: "path must not be empty".to_string(),
        });
    }
    Ok(())
}
