//! Plain-text rendering of a volsense evaluation.
//!
//! Output is returned as a `String`; callers decide where it goes.

use crate::domain::error::VolsenseError;
use crate::domain::report::{SessionSnapshot, VolsenseReport};

const FORMULA: &str = "Buy Pressure = volume x (close - open) / open";

pub fn render(symbol: &str, report: &VolsenseReport) -> Result<String, VolsenseError> {
    let (previous, latest) = report.last_two_sessions()?;
    let mut lines = Vec::new();

    lines.push(format!(
        "{} Volsense: {}",
        symbol,
        report.next_session.category()
    ));
    lines.push(FORMULA.to_string());
    lines.push(String::new());
    lines.extend(session_lines(&latest));
    lines.extend(session_lines(&previous));
    lines.push(String::new());

    lines.push(format!(
        "Avg ({}d): {:.2}",
        report.points.len(),
        report.mean_scaled
    ));
    lines.push(format!(
        "Mode: {}",
        report
            .mode_scaled
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "No repeating values".to_string())
    ));
    lines.push(format!(
        "Prediction Accuracy (since {}): {:.2}% ({}/{})",
        report.cutoff_date,
        report.accuracy.percent(),
        report.accuracy.correct,
        report.accuracy.total
    ));
    lines.push(String::new());

    lines.push(format!(
        "{:<12}{:>9}{:>16}{:>9}  {:<9}{:<12}{}",
        "Date", "Delta", "Raw", "Scaled", "Zone", "Prediction", "Actual"
    ));
    for point in &report.points {
        lines.push(format!(
            "{:<12}{:>9}{:>16.2}{:>9.2}  {:<9}{:<12}{}",
            point.date.format("%Y-%m-%d").to_string(),
            signed_delta(point.delta),
            point.raw,
            point.scaled,
            point.zone.to_string(),
            point.prediction.to_string(),
            point.actual
        ));
    }

    Ok(lines.join("\n") + "\n")
}

fn session_lines(session: &SessionSnapshot) -> [String; 2] {
    [
        format!(
            "{} (Julian {})",
            session.date.format("%b %d, %Y"),
            session.julian_day
        ),
        format!("  Scaled Volsense: {:.2}/100", session.scaled),
    ]
}

/// "+1.25" / "-0.40"; zero renders as "+0.00".
pub fn signed_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.2}", delta)
    } else {
        format!("{:.2}", delta)
    }
}
