//! Domain error types.

/// Top-level error type for rjournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade file error in {path}: {reason}")]
    TradeFile { path: String, reason: String },

    #[error("invalid trade outcome {input:?}: {reason}")]
    InvalidTrade { input: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::InvalidConfiguration { .. }
            | JournalError::ConfigParse { .. }
            | JournalError::ConfigInvalid { .. } => 2,
            JournalError::TradeFile { .. } => 3,
            JournalError::InvalidTrade { .. } => 4,
            JournalError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
