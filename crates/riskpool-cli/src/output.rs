//! Result files
//!
//! Each result sequence is written as a single CSV row of floats. The JSON
//! report carries all of them plus the parameters the sweep ran with.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use riskpool_common::{Result, SimulationParams, SweepReport};
use serde::Serialize;
use tracing::debug;

/// CSV file stems, in the order they are written
pub const CSV_FILES: [&str; 5] = ["reproduction", "generation", "contribution", "fine", "target"];

/// JSON report document
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    pub params: &'a SimulationParams,
    #[serde(flatten)]
    pub report: &'a SweepReport,
}

/// One CSV row: shortest round-trip representation of every value
pub fn csv_row(values: &[f64]) -> String {
    let mut row = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Write the five CSV files into `dir`, creating it if needed
pub fn write_csv(report: &SweepReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let series: [&[f64]; 5] = [
        &report.payoffs,
        &report.payoff_curve,
        &report.contributions,
        &report.fines,
        &report.targets,
    ];

    let mut written = Vec::with_capacity(CSV_FILES.len());
    for (stem, values) in CSV_FILES.iter().zip(series) {
        let path = dir.join(format!("{stem}.csv"));
        fs::write(&path, csv_row(values))?;
        debug!(path = %path.display(), values = values.len(), "Wrote CSV");
        written.push(path);
    }
    Ok(written)
}

/// Write `report.json` into `dir`
pub fn write_json(
    report: &SweepReport,
    params: &SimulationParams,
    dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let document = ReportDocument {
        generated_at,
        version: riskpool_common::VERSION,
        params,
        report,
    };
    let path = dir.join("report.json");
    fs::write(&path, serde_json::to_string_pretty(&document)?)?;
    debug!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
