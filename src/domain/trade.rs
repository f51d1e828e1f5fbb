//! Trade records and the caller-owned trade log.

use super::error::JournalError;

/// One logged outcome, expressed in multiples of the risk taken.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub r_multiple: f64,
    pub comment: Option<String>,
}

impl TradeRecord {
    pub fn new(r_multiple: f64, comment: Option<String>) -> Self {
        TradeRecord {
            r_multiple,
            comment: normalize_comment(comment),
        }
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// A named quick-entry outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub r_multiple: f64,
}

pub const PRESETS: [Preset; 4] = [
    Preset {
        label: "+0.5R",
        r_multiple: 0.5,
    },
    Preset {
        label: "+1R",
        r_multiple: 1.0,
    },
    Preset {
        label: "+2R",
        r_multiple: 2.0,
    },
    Preset {
        label: "-1R",
        r_multiple: -1.0,
    },
];

/// Parse an outcome such as `+1R`, `-0.5r`, `2` or `1.25`.
pub fn parse_r_multiple(input: &str) -> Result<f64, JournalError> {
    let trimmed = input.trim();
    let number = trimmed
        .strip_suffix(['R', 'r'])
        .unwrap_or(trimmed)
        .trim();

    if number.is_empty() {
        return Err(JournalError::InvalidTrade {
            input: input.to_string(),
            reason: "empty outcome".into(),
        });
    }

    let value: f64 = number.parse().map_err(|_| JournalError::InvalidTrade {
        input: input.to_string(),
        reason: "not a number".into(),
    })?;

    if !value.is_finite() {
        return Err(JournalError::InvalidTrade {
            input: input.to_string(),
            reason: "outcome must be finite".into(),
        });
    }

    Ok(value)
}

/// Ordered sequence of trades; insertion order is chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        TradeLog { records }
    }

    pub fn record(&mut self, r_multiple: f64, comment: Option<String>) {
        self.records.push(TradeRecord::new(r_multiple, comment));
    }

    /// Remove the most recent trade. Returns `None` on an empty log.
    pub fn undo_last(&mut self) -> Option<TradeRecord> {
        self.records.pop()
    }

    /// Replace the whole log, as when loading a file.
    pub fn replace(&mut self, records: Vec<TradeRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
