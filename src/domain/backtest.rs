//! Back-test of momentum predictions against realized session direction.
//!
//! Sessions dated before the cutoff are forced Neutral and never scored.
//! From the cutoff on, every non-Neutral call is compared with the same
//! session's outcome: Bullish matches Up, Bearish matches Down. Flat sessions
//! count against any call.

use chrono::NaiveDate;

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::{ActualDirection, OhlcvBar};
use crate::domain::pressure::raw_pressures;
use crate::domain::series::PriceSeries;
use crate::domain::volsense::{Prediction, predict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccuracyStat {
    pub correct: usize,
    pub total: usize,
}

impl AccuracyStat {
    /// correct / total * 100, or 0 when nothing was scored.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            self.correct as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, prediction: Prediction, actual: ActualDirection) {
        if prediction == Prediction::Neutral {
            return;
        }
        self.total += 1;
        if is_hit(prediction, actual) {
            self.correct += 1;
        }
    }
}

fn is_hit(prediction: Prediction, actual: ActualDirection) -> bool {
    matches!(
        (prediction, actual),
        (Prediction::Bullish, ActualDirection::Up) | (Prediction::Bearish, ActualDirection::Down)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub predictions: Vec<Prediction>,
    pub actuals: Vec<ActualDirection>,
    pub accuracy: AccuracyStat,
}

pub fn run_backtest(
    series: &PriceSeries,
    cutoff_date: NaiveDate,
) -> Result<BacktestResult, VolsenseError> {
    let raw = raw_pressures(series.bars())?;
    Ok(score(series.bars(), &raw, cutoff_date))
}

/// Walk `bars` with their precomputed pressures. `raw` must be parallel to `bars`.
pub(crate) fn score(bars: &[OhlcvBar], raw: &[f64], cutoff_date: NaiveDate) -> BacktestResult {
    let mut predictions = Vec::with_capacity(bars.len());
    let mut actuals = Vec::with_capacity(bars.len());
    let mut accuracy = AccuracyStat::default();

    for (i, bar) in bars.iter().enumerate() {
        let actual = bar.direction();
        actuals.push(actual);

        if bar.date < cutoff_date {
            predictions.push(Prediction::Neutral);
            continue;
        }

        let prediction = predict(raw, i);
        accuracy.record(prediction, actual);
        predictions.push(prediction);
    }

    BacktestResult {
        predictions,
        actuals,
        accuracy,
    }
}
