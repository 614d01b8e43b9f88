//! One full evaluation of a price window.

use chrono::NaiveDate;

use crate::domain::backtest::{self, AccuracyStat};
use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::{ActualDirection, julian_day};
use crate::domain::pressure::raw_pressures;
use crate::domain::series::PriceSeries;
use crate::domain::stats;
use crate::domain::volsense::{
    PressureRange, PressureZone, Prediction, VolsenseConfig, next_session_call,
};

#[derive(Debug, Clone, PartialEq)]
pub struct VolsensePoint {
    pub date: NaiveDate,
    pub raw: f64,
    pub scaled: f64,
    pub delta: f64,
    pub zone: PressureZone,
    pub prediction: Prediction,
    pub actual: ActualDirection,
}

/// Pressure readout for one of the two most recent sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub date: NaiveDate,
    pub julian_day: i64,
    pub raw: f64,
    pub scaled: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolsenseReport {
    pub points: Vec<VolsensePoint>,
    pub range: PressureRange,
    pub mean_scaled: f64,
    pub mode_scaled: Option<f64>,
    pub accuracy: AccuracyStat,
    pub cutoff_date: NaiveDate,
    pub next_session: Prediction,
}

impl VolsenseReport {
    /// (previous, latest) sessions of the window.
    pub fn last_two_sessions(&self) -> Result<(SessionSnapshot, SessionSnapshot), VolsenseError> {
        match self.points.as_slice() {
            [.., previous, latest] => Ok((snapshot(previous), snapshot(latest))),
            _ => Err(VolsenseError::InsufficientData {
                bars: self.points.len(),
                minimum: 2,
            }),
        }
    }

    pub fn scaled(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.scaled).collect()
    }

    pub fn predictions(&self) -> Vec<Prediction> {
        self.points.iter().map(|p| p.prediction).collect()
    }
}

fn snapshot(point: &VolsensePoint) -> SessionSnapshot {
    SessionSnapshot {
        date: point.date,
        julian_day: julian_day(point.date),
        raw: point.raw,
        scaled: point.scaled,
    }
}

/// Compute pressures, scores, back-test and next-session call for `series`.
///
/// The series is evaluated as given; use
/// [`select_window`](crate::domain::series::select_window) to trim it first.
pub fn evaluate(
    series: &PriceSeries,
    config: &VolsenseConfig,
) -> Result<VolsenseReport, VolsenseError> {
    let bars = series.bars();
    let raw = raw_pressures(bars)?;
    let range = PressureRange::of(&raw)?;
    let scaled: Vec<f64> = raw.iter().map(|&p| range.scale(p)).collect();
    let result = backtest::score(bars, &raw, config.cutoff_date);
    let next_session = next_session_call(&raw)?;

    let mean_scaled = stats::mean(&scaled).unwrap_or(0.0);
    let mode_scaled = stats::mode(&scaled);

    let points = bars
        .iter()
        .zip(raw.iter().zip(scaled.iter()))
        .zip(result.predictions.iter().zip(result.actuals.iter()))
        .map(|((bar, (&raw, &scaled)), (&prediction, &actual))| VolsensePoint {
            date: bar.date,
            raw,
            scaled,
            delta: bar.delta(),
            zone: PressureZone::of(scaled),
            prediction,
            actual,
        })
        .collect();

    Ok(VolsenseReport {
        points,
        range,
        mean_scaled,
        mode_scaled,
        accuracy: result.accuracy,
        cutoff_date: config.cutoff_date,
        next_session,
    })
}
