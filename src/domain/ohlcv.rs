//! OHLCV bar representation.

use chrono::{Datelike, NaiveDate};

/// Offset from the proleptic Gregorian ordinal (0001-01-01 = 1) to the
/// Julian day number used in session labels.
const JULIAN_ORDINAL_OFFSET: i64 = 1_721_424;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Realized outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualDirection {
    Up,
    Down,
    Flat,
}

impl OhlcvBar {
    pub fn direction(&self) -> ActualDirection {
        if self.close > self.open {
            ActualDirection::Up
        } else if self.close < self.open {
            ActualDirection::Down
        } else {
            ActualDirection::Flat
        }
    }

    /// close - open, rounded to cents.
    pub fn delta(&self) -> f64 {
        round2(self.close - self.open)
    }

    pub fn julian_day(&self) -> i64 {
        julian_day(self.date)
    }
}

pub fn julian_day(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + JULIAN_ORDINAL_OFFSET
}

/// Round to two decimals using the exact decimal expansion of `value`
/// (ties to even), so 2.675 stays 2.67 as its binary value is below the tie.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

impl std::fmt::Display for ActualDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActualDirection::Up => write!(f, "up"),
            ActualDirection::Down => write!(f, "down"),
            ActualDirection::Flat => write!(f, "flat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar(open: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 50_000.0,
        }
    }

    #[test]
    fn direction_up_down_flat() {
        assert_eq!(sample_bar(100.0, 105.0).direction(), ActualDirection::Up);
        assert_eq!(sample_bar(105.0, 100.0).direction(), ActualDirection::Down);
        assert_eq!(sample_bar(100.0, 100.0).direction(), ActualDirection::Flat);
    }

    #[test]
    fn delta_is_rounded_to_cents() {
        let bar = sample_bar(100.0, 101.236);
        assert_eq!(bar.delta(), 1.24);
        let bar = sample_bar(100.0, 98.5);
        assert_eq!(bar.delta(), -1.5);
    }

    #[test]
    fn round2_uses_exact_binary_value() {
        // 2.675 is stored as 2.67499999...
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(39.423_076), 39.42);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn julian_day_matches_ordinal_offset() {
        // 2024-01-01 has proleptic ordinal 738_886.
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(julian_day(d), 738_886 + 1_721_424);
        assert_eq!(julian_day(NaiveDate::from_ymd_opt(1, 1, 1).unwrap()), 1_721_425);
        // 2024-01-15
        assert_eq!(sample_bar(1.0, 1.0).julian_day(), 738_900 + 1_721_424);
    }

    #[test]
    fn direction_display() {
        assert_eq!(ActualDirection::Up.to_string(), "up");
        assert_eq!(ActualDirection::Flat.to_string(), "flat");
    }
}
