//! Validated, date-ordered price series and window selection.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::volsense::{MOMENTUM_LOOKBACK, VolsenseConfig};

/// Non-empty sequence of bars with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<OhlcvBar>) -> Result<Self, VolsenseError> {
        if bars.is_empty() {
            return Err(VolsenseError::InsufficientData { bars: 0, minimum: 1 });
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(VolsenseError::UnorderedSeries { date: pair[1].date });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    pub fn into_bars(self) -> Vec<OhlcvBar> {
        self.bars
    }
}

/// Trailing evaluation window ending on or before `as_of`.
///
/// Takes `window_size` bars, plus [`MOMENTUM_LOOKBACK`] extra seed bars when
/// `seed_momentum` is set. Input bars need not be sorted; the selected window
/// is validated as a [`PriceSeries`].
pub fn select_window(
    bars: &[OhlcvBar],
    as_of: NaiveDate,
    config: &VolsenseConfig,
) -> Result<PriceSeries, VolsenseError> {
    let mut eligible: Vec<OhlcvBar> = bars.iter().filter(|b| b.date <= as_of).cloned().collect();
    eligible.sort_by_key(|b| b.date);

    let Some(last) = eligible.last() else {
        return Err(VolsenseError::InsufficientData { bars: 0, minimum: 1 });
    };
    if last.date != as_of {
        warn!(requested = %as_of, adjusted = %last.date, "as-of date is not a trading day");
    }

    let wanted = if config.seed_momentum {
        config.window_size + MOMENTUM_LOOKBACK
    } else {
        config.window_size
    };
    let start = eligible.len().saturating_sub(wanted);
    let window = eligible.split_off(start);
    debug!(bars = window.len(), wanted, "selected evaluation window");

    PriceSeries::new(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(date: &str) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1000.0,
        }
    }

    fn config(window_size: usize, seed_momentum: bool) -> VolsenseConfig {
        VolsenseConfig {
            window_size,
            cutoff_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            seed_momentum,
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_series_rejected() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert!(matches!(err, VolsenseError::InsufficientData { bars: 0, minimum: 1 }));
    }

    #[test]
    fn duplicate_dates_rejected() {
        let bars = vec![make_bar("2024-01-02"), make_bar("2024-01-02")];
        let err = PriceSeries::new(bars).unwrap_err();
        assert!(matches!(err, VolsenseError::UnorderedSeries { date } if date == d("2024-01-02")));
    }

    #[test]
    fn descending_dates_rejected() {
        let bars = vec![make_bar("2024-01-03"), make_bar("2024-01-02")];
        assert!(PriceSeries::new(bars).is_err());
    }

    #[test]
    fn accessors() {
        let series =
            PriceSeries::new(vec![make_bar("2024-01-02"), make_bar("2024-01-03")]).unwrap();
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.first_date(), d("2024-01-02"));
        assert_eq!(series.last_date(), d("2024-01-03"));
    }

    #[test]
    fn select_window_takes_trailing_bars() {
        let bars: Vec<_> = (2..=9).map(|day| make_bar(&format!("2024-01-0{day}"))).collect();
        let series = select_window(&bars, d("2024-01-09"), &config(3, false)).unwrap();
        let dates: Vec<_> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d("2024-01-07"), d("2024-01-08"), d("2024-01-09")]);
    }

    #[test]
    fn select_window_adds_seed_bars() {
        let bars: Vec<_> = (2..=9).map(|day| make_bar(&format!("2024-01-0{day}"))).collect();
        let series = select_window(&bars, d("2024-01-09"), &config(3, true)).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.first_date(), d("2024-01-05"));
    }

    #[test]
    fn select_window_excludes_bars_after_as_of() {
        let bars: Vec<_> = (2..=9).map(|day| make_bar(&format!("2024-01-0{day}"))).collect();
        let series = select_window(&bars, d("2024-01-05"), &config(30, false)).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.last_date(), d("2024-01-05"));
    }

    #[test]
    fn select_window_rolls_back_from_non_trading_day() {
        let bars = vec![make_bar("2024-01-04"), make_bar("2024-01-05"), make_bar("2024-01-08")];
        // 2024-01-06 is a Saturday
        let series = select_window(&bars, d("2024-01-06"), &config(30, false)).unwrap();
        assert_eq!(series.last_date(), d("2024-01-05"));
    }

    #[test]
    fn select_window_sorts_input() {
        let bars = vec![make_bar("2024-01-05"), make_bar("2024-01-03"), make_bar("2024-01-04")];
        let series = select_window(&bars, d("2024-01-05"), &config(30, false)).unwrap();
        assert_eq!(series.first_date(), d("2024-01-03"));
    }

    #[test]
    fn select_window_with_nothing_before_as_of() {
        let bars = vec![make_bar("2024-01-05")];
        let err = select_window(&bars, d("2024-01-01"), &config(30, false)).unwrap_err();
        assert!(matches!(err, VolsenseError::InsufficientData { bars: 0, .. }));
    }
}
