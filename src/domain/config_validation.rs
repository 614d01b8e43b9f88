//! Configuration validation.
//!
//! Validates all config fields before an evaluation runs.

use crate::domain::error::VolsenseError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const SECTION: &str = "volsense";
pub const DATA_SECTION: &str = "data";

/// Upper bound on `lookback_days`; about a century of calendar days.
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

pub fn validate_volsense_config(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    validate_symbol(config)?;
    validate_evaluation_config(config)
}

/// Everything except the symbol, which may come from the command line.
pub fn validate_evaluation_config(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    validate_cutoff_date(config)?;
    validate_as_of(config)?;
    validate_window_size(config)?;
    validate_lookback_days(config)?;
    validate_data_path(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    match config.get_string(SECTION, "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(VolsenseError::ConfigMissing {
            section: SECTION.to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_cutoff_date(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    let value = config.get_string(SECTION, "cutoff_date");
    match value {
        None => Err(VolsenseError::ConfigMissing {
            section: SECTION.to_string(),
            key: "cutoff_date".to_string(),
        }),
        Some(s) => parse_date(&s, SECTION, "cutoff_date").map(|_| ()),
    }
}

fn validate_as_of(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    match config.get_string(SECTION, "as_of") {
        Some(s) => parse_date(&s, SECTION, "as_of").map(|_| ()),
        None => Ok(()),
    }
}

fn validate_window_size(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    let value = config.get_int(SECTION, "window_size", 30);
    if value <= 0 {
        return Err(VolsenseError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "window_size".to_string(),
            reason: "window_size must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_lookback_days(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    let value = config.get_int(SECTION, "lookback_days", 1);
    if value <= 0 {
        return Err(VolsenseError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "lookback_days".to_string(),
            reason: "lookback_days must be positive".to_string(),
        });
    }
    if value > MAX_LOOKBACK_DAYS {
        return Err(VolsenseError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "lookback_days".to_string(),
            reason: format!("lookback_days must be at most {}", MAX_LOOKBACK_DAYS),
        });
    }
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), VolsenseError> {
    match config.get_string(DATA_SECTION, "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(VolsenseError::ConfigMissing {
            section: DATA_SECTION.to_string(),
            key: "path".to_string(),
        }),
    }
}

/// Parse a `YYYY-MM-DD` config value.
pub fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, VolsenseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        VolsenseError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("invalid {} format, expected YYYY-MM-DD", key),
        }
    })
}
