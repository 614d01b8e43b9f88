//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod pressure;
pub mod volsense;
pub mod backtest;
pub mod stats;
pub mod report;
pub mod config_validation;
pub mod error;
