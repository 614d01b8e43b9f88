//! Market data access port trait.
//!
//! Implementations hand back strongly typed bars; any coercion of loosely
//! typed provider records happens behind this boundary.

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol` dated within `start_date..=end_date`, oldest first.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, VolsenseError>;

    fn list_symbols(&self) -> Result<Vec<String>, VolsenseError>;

    /// (first date, last date, bar count), or `None` when the symbol has no bars.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, VolsenseError>;
}
