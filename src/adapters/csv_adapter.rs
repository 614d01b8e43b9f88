//! CSV file data adapter.
//!
//! One file per symbol at `<base_path>/<SYMBOL>.csv` with the header
//! `date,open,high,low,close,volume`.

use crate::domain::error::VolsenseError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<OhlcvBar>, VolsenseError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| VolsenseError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| VolsenseError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            bars.push(parse_record(&record, row + 1)?);
        }

        bars.sort_by_key(|b| b.date);
        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded csv");
        Ok(bars)
    }
}

fn parse_record(record: &StringRecord, row: usize) -> Result<OhlcvBar, VolsenseError> {
    let date_str = field(record, 0, "date", row)?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        VolsenseError::Data {
            reason: format!("row {}: invalid date format: {}", row, e),
        }
    })?;

    Ok(OhlcvBar {
        date,
        open: number(record, 1, "open", row)?,
        high: number(record, 2, "high", row)?,
        low: number(record, 3, "low", row)?,
        close: number(record, 4, "close", row)?,
        volume: number(record, 5, "volume", row)?,
    })
}

fn field<'a>(
    record: &'a StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<&'a str, VolsenseError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| VolsenseError::Data {
            reason: format!("row {}: missing {} column", row, name),
        })
}

fn number(record: &StringRecord, index: usize, name: &str, row: usize) -> Result<f64, VolsenseError> {
    field(record, index, name, row)?
        .parse()
        .map_err(|e| VolsenseError::Data {
            reason: format!("row {}: invalid {} value: {}", row, name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, VolsenseError> {
        let bars = self
            .read_all(symbol)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, VolsenseError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| VolsenseError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VolsenseError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            if let Some(symbol) = name.to_string_lossy().strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, VolsenseError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
