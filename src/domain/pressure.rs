//! Raw buy-pressure calculation.
//!
//! pressure = volume * (close - open) / open
//!
//! Signed and unbounded: positive for sessions that closed above the open,
//! weighted by traded volume.

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::OhlcvBar;

pub fn raw_pressure(bar: &OhlcvBar) -> Result<f64, VolsenseError> {
    if bar.open == 0.0 {
        return Err(VolsenseError::InvalidBar {
            date: bar.date,
            reason: "open price is zero".into(),
        });
    }
    Ok(bar.volume * (bar.close - bar.open) / bar.open)
}

/// Pressure for every bar. The first invalid bar fails the whole batch.
pub fn raw_pressures(bars: &[OhlcvBar]) -> Result<Vec<f64>, VolsenseError> {
    bars.iter().map(raw_pressure).collect()
}
