//! Volsense scaling and momentum prediction.
//!
//! Scaling is a batch min-max normalisation: every score in a window depends
//! on the extremes of the whole window, including sessions after it. Scores
//! are therefore only comparable within one evaluation window.

use chrono::NaiveDate;

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::round2;

pub const DEFAULT_WINDOW_SIZE: usize = 30;

/// Number of prior sessions a momentum call looks at.
pub const MOMENTUM_LOOKBACK: usize = 2;

/// Score assigned to every bar when the window has no range.
pub const DEGENERATE_SCORE: f64 = 50.0;

const BEARISH_ZONE_CEILING: f64 = 40.0;
const BULLISH_ZONE_FLOOR: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct VolsenseConfig {
    pub window_size: usize,
    /// Sessions before this date are forced Neutral and left unscored.
    pub cutoff_date: NaiveDate,
    pub seed_momentum: bool,
}

impl VolsenseConfig {
    pub fn new(cutoff_date: NaiveDate) -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            cutoff_date,
            seed_momentum: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Bullish,
    Bearish,
    Neutral,
}

impl Prediction {
    /// Headline shown to the end user.
    pub fn category(&self) -> &'static str {
        match self {
            Prediction::Bullish => "BULLISH",
            Prediction::Bearish => "BEARISH",
            Prediction::Neutral => "NO PREDICTION",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prediction::Bullish => write!(f, "bullish"),
            Prediction::Bearish => write!(f, "bearish"),
            Prediction::Neutral => write!(f, "neutral"),
        }
    }
}

/// Band a scaled score falls in: below 40, 40 to 60, above 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureZone {
    Bearish,
    Neutral,
    Bullish,
}

impl PressureZone {
    pub fn of(scaled: f64) -> Self {
        if scaled < BEARISH_ZONE_CEILING {
            PressureZone::Bearish
        } else if scaled > BULLISH_ZONE_FLOOR {
            PressureZone::Bullish
        } else {
            PressureZone::Neutral
        }
    }
}

impl std::fmt::Display for PressureZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressureZone::Bearish => write!(f, "bearish"),
            PressureZone::Neutral => write!(f, "neutral"),
            PressureZone::Bullish => write!(f, "bullish"),
        }
    }
}

/// Min-max bounds of a window of raw pressures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRange {
    pub min: f64,
    pub max: f64,
}

impl PressureRange {
    pub fn of(raw: &[f64]) -> Result<Self, VolsenseError> {
        if raw.is_empty() {
            return Err(VolsenseError::InsufficientData { bars: 0, minimum: 1 });
        }
        let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self { min, max })
    }

    /// round((p - min) / (max - min) * 100, 2), or 50.0 when max == min.
    pub fn scale(&self, p: f64) -> f64 {
        if self.max == self.min {
            DEGENERATE_SCORE
        } else {
            round2((p - self.min) / (self.max - self.min) * 100.0)
        }
    }
}

/// Scale a window of raw pressures onto 0..=100.
pub fn scale(raw: &[f64]) -> Result<Vec<f64>, VolsenseError> {
    let range = PressureRange::of(raw)?;
    Ok(raw.iter().map(|&p| range.scale(p)).collect())
}

/// Momentum call for the session at `index`.
///
/// Bullish iff raw[index-1] > raw[index-2]. Equal pressures are Bearish.
/// Neutral when fewer than two prior sessions exist or `index` is past the
/// end of the window.
pub fn predict(raw: &[f64], index: usize) -> Prediction {
    if index < MOMENTUM_LOOKBACK || index > raw.len() {
        return Prediction::Neutral;
    }
    if raw[index - 1] > raw[index - 2] {
        Prediction::Bullish
    } else {
        Prediction::Bearish
    }
}

/// The momentum call for the most recent session of the window.
pub fn next_session_call(raw: &[f64]) -> Result<Prediction, VolsenseError> {
    if raw.is_empty() {
        return Err(VolsenseError::InsufficientData { bars: 0, minimum: 1 });
    }
    Ok(predict(raw, raw.len() - 1))
}
