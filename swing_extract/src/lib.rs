//! Swing trend extraction tool.
//!
//! Loads a market history file, extracts its swing trend and writes the
//! trend points, per-index projections, a text report and a chart.

pub mod config;
pub mod report;
pub mod visualization;

pub use config::Config;
pub use report::{generate_text_report, projection_table, write_classification, write_points_json, write_projections};
pub use visualization::visualise_trend;

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use swing_trend::core::io::read_series;
use swing_trend::{TrendKind, TrendSeries, extract_trend};
use tracing::{debug, info};

pub const POINTS_FILE: &str = "trend_points.json";
pub const PROJECTIONS_FILE: &str = "trend_projections.csv";
pub const CLASSIFICATION_FILE: &str = "trend_classification.txt";
pub const REPORT_FILE: &str = "trend_report.txt";
pub const CHART_FILE: &str = "trend_chart.svg";

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub samples: usize,
    pub points: usize,
    pub highs: usize,
    pub lows: usize,
    /// Files written, in write order
    pub outputs: Vec<PathBuf>,
}

/// Load the configured series
pub fn load_series(config: &Config) -> Result<Vec<f64>> {
    let data_file = config.data_file()?;
    let prices = read_series(data_file, config.format, config.field, config.log_prices)
        .map_err(|e| anyhow!("{}", e))?;
    info!(file = %data_file.display(), samples = prices.len(), "loaded market data");
    Ok(prices)
}

/// Run the full pipeline described by `config`
pub fn run(config: &Config) -> Result<RunSummary> {
    let prices = load_series(config)?;

    let trend = extract_trend(&prices, config.period)
        .with_context(|| format!("Trend extraction failed with period {}", config.period))?;

    let summary_counts = count_kinds(&trend);
    info!(
        points = trend.len(),
        highs = summary_counts.0,
        lows = summary_counts.1,
        "extracted swing trend"
    );

    let start_value = prices.first().copied().unwrap_or_default();
    let mut outputs = Vec::new();

    let path = config.output_file(POINTS_FILE);
    write_points_json(&trend, &path)?;
    outputs.push(path);

    let path = config.output_file(PROJECTIONS_FILE);
    write_projections(&prices, &trend, &path)?;
    outputs.push(path);

    let path = config.output_file(CLASSIFICATION_FILE);
    write_classification(&trend, start_value, &path)?;
    outputs.push(path);

    let path = config.output_file(REPORT_FILE);
    generate_text_report(config, &prices, &trend, &path)?;
    outputs.push(path);

    if !config.no_plot {
        let path = config.output_file(CHART_FILE);
        visualise_trend(&prices, &trend, &path)
            .map_err(|e| anyhow!("Failed to draw {}: {}", path.display(), e))?;
        outputs.push(path);
    }

    for path in &outputs {
        debug!(path = %path.display(), "wrote output");
    }

    Ok(RunSummary {
        samples: prices.len(),
        points: trend.len(),
        highs: summary_counts.0,
        lows: summary_counts.1,
        outputs,
    })
}

fn count_kinds(trend: &TrendSeries) -> (usize, usize) {
    let highs = trend.iter().filter(|p| p.kind == TrendKind::High).count();
    (highs, trend.len() - highs)
}
