//! CLI definition and dispatch.

use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_summary;
use crate::domain::config_validation::{
    DATA_SECTION, MAX_LOOKBACK_DAYS, SECTION, parse_date, validate_evaluation_config,
    validate_volsense_config,
};
use crate::domain::error::VolsenseError;
use crate::domain::report::{VolsenseReport, evaluate};
use crate::domain::series::select_window;
use crate::domain::volsense::{DEFAULT_WINDOW_SIZE, MOMENTUM_LOOKBACK, VolsenseConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

/// Holiday slack added on top of the five-sessions-a-week estimate.
const LOOKBACK_SLACK_DAYS: i64 = 14;

#[derive(Parser, Debug)]
#[command(name = "volsense", about = "Volume-weighted buy-pressure predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a symbol and print the next-session call
    Predict {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for a symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

/// Everything needed to run one evaluation, resolved from config and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictRequest {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub lookback_days: i64,
    pub config: VolsenseConfig,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Predict {
            config,
            symbol,
            date,
        } => run_predict(&config, symbol.as_deref(), date),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, VolsenseError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn build_volsense_config(config: &dyn ConfigPort) -> Result<VolsenseConfig, VolsenseError> {
    let cutoff_str =
        config
            .get_string(SECTION, "cutoff_date")
            .ok_or_else(|| VolsenseError::ConfigMissing {
                section: SECTION.into(),
                key: "cutoff_date".into(),
            })?;
    let cutoff_date = parse_date(&cutoff_str, SECTION, "cutoff_date")?;

    let window_size = config.get_int(SECTION, "window_size", DEFAULT_WINDOW_SIZE as i64);
    let window_size = usize::try_from(window_size)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| VolsenseError::ConfigInvalid {
            section: SECTION.into(),
            key: "window_size".into(),
            reason: "window_size must be positive".into(),
        })?;

    Ok(VolsenseConfig {
        window_size,
        cutoff_date,
        seed_momentum: config.get_bool(SECTION, "seed_momentum", false),
    })
}

pub fn build_predict_request(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
    date_override: Option<NaiveDate>,
) -> Result<PredictRequest, VolsenseError> {
    validate_evaluation_config(config)?;

    let symbol = resolve_symbol(symbol_override, config).ok_or_else(|| {
        VolsenseError::ConfigMissing {
            section: SECTION.into(),
            key: "symbol".into(),
        }
    })?;

    let as_of = match date_override {
        Some(d) => d,
        None => match config.get_string(SECTION, "as_of") {
            Some(s) => parse_date(&s, SECTION, "as_of")?,
            None => Local::now().date_naive(),
        },
    };

    let volsense_config = build_volsense_config(config)?;
    Ok(PredictRequest {
        symbol,
        as_of,
        lookback_days: config.get_int(
            SECTION,
            "lookback_days",
            default_lookback_days(&volsense_config),
        ),
        config: volsense_config,
    })
}

/// Calendar days needed to cover the window, seed bars included, when
/// `lookback_days` is not configured.
pub fn default_lookback_days(config: &VolsenseConfig) -> i64 {
    let mut sessions = i64::try_from(config.window_size).unwrap_or(i64::MAX);
    if config.seed_momentum {
        sessions = sessions.saturating_add(MOMENTUM_LOOKBACK as i64);
    }
    let weeks = sessions.saturating_add(4) / 5;
    weeks
        .saturating_mul(7)
        .saturating_add(LOOKBACK_SLACK_DAYS)
        .min(MAX_LOOKBACK_DAYS)
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    symbol_override
        .map(str::to_string)
        .or_else(|| config.get_string(SECTION, "symbol"))
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

pub fn data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, VolsenseError> {
    let path = config
        .get_string(DATA_SECTION, "path")
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| VolsenseError::ConfigMissing {
            section: DATA_SECTION.into(),
            key: "path".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(path.trim())))
}

/// Fetch, window and evaluate one symbol.
pub fn run_predict_pipeline(
    data_port: &dyn DataPort,
    request: &PredictRequest,
) -> Result<VolsenseReport, VolsenseError> {
    let start = Duration::try_days(request.lookback_days)
        .and_then(|span| request.as_of.checked_sub_signed(span))
        .ok_or_else(|| VolsenseError::ConfigInvalid {
            section: SECTION.into(),
            key: "lookback_days".into(),
            reason: format!(
                "{} days before {} is outside the supported date range",
                request.lookback_days, request.as_of
            ),
        })?;
    let bars = data_port.fetch_ohlcv(&request.symbol, start, request.as_of)?;
    if bars.is_empty() {
        return Err(VolsenseError::NoData {
            symbol: request.symbol.clone(),
        });
    }

    let series = select_window(&bars, request.as_of, &request.config)?;
    if series.len() < request.config.window_size {
        warn!(
            symbol = %request.symbol,
            bars = series.len(),
            window_size = request.config.window_size,
            "window shorter than configured"
        );
    }
    info!(
        symbol = %request.symbol,
        from = %series.first_date(),
        to = %series.last_date(),
        bars = series.len(),
        "evaluating"
    );

    evaluate(&series, &request.config)
}

fn run_predict(
    config_path: &PathBuf,
    symbol: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<(), VolsenseError> {
    let adapter = load_config(config_path)?;
    let request = build_predict_request(&adapter, symbol, date)?;
    let data_port = data_adapter(&adapter)?;

    let report = run_predict_pipeline(&data_port, &request)?;
    let summary = text_summary::render(&request.symbol, &report)?;
    print!("{summary}");
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), VolsenseError> {
    let adapter = load_config(config_path)?;
    validate_volsense_config(&adapter)?;
    let config = build_volsense_config(&adapter)?;
    info!(
        window_size = config.window_size,
        cutoff_date = %config.cutoff_date,
        seed_momentum = config.seed_momentum,
        "configuration is valid"
    );
    println!("Configuration is valid.");
    Ok(())
}

fn run_list_symbols(config_path: &PathBuf) -> Result<(), VolsenseError> {
    let adapter = load_config(config_path)?;
    let data_port = data_adapter(&adapter)?;

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        warn!("no symbols found");
    }
    for symbol in &symbols {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_info(config_path: &PathBuf, symbol: Option<&str>) -> Result<(), VolsenseError> {
    let adapter = load_config(config_path)?;
    let symbol = resolve_symbol(symbol, &adapter).ok_or_else(|| VolsenseError::ConfigMissing {
        section: SECTION.into(),
        key: "symbol".into(),
    })?;
    let data_port = data_adapter(&adapter)?;

    match data_port.get_data_range(&symbol)? {
        Some((first, last, count)) => {
            println!("{}: {} bars, {} to {}", symbol, count, first, last);
            Ok(())
        }
        None => Err(VolsenseError::NoData { symbol }),
    }
}
