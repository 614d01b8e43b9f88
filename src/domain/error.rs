//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for volsense.
#[derive(Debug, thiserror::Error)]
pub enum VolsenseError {
    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("price series is not strictly increasing at {date}")]
    UnorderedSeries { date: NaiveDate },

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&VolsenseError> for std::process::ExitCode {
    fn from(err: &VolsenseError) -> Self {
        let code: u8 = match err {
            VolsenseError::Io(_) => 1,
            VolsenseError::ConfigParse { .. }
            | VolsenseError::ConfigMissing { .. }
            | VolsenseError::ConfigInvalid { .. } => 2,
            VolsenseError::Data { .. } => 3,
            VolsenseError::InvalidBar { .. } | VolsenseError::UnorderedSeries { .. } => 4,
            VolsenseError::NoData { .. } | VolsenseError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
