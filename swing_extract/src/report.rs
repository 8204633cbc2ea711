use anyhow::Result;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use swing_trend::core::io::{write_column, write_file};
use swing_trend::{TrendKind, TrendSeries};

use crate::Config;

/// Serialize the trend points as a pretty-printed JSON array
pub fn write_points_json<P: AsRef<Path>>(trend: &TrendSeries, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(&trend.points())?;
    write_file(path, json)?;
    Ok(())
}

/// Classification codes, one per line
pub fn write_classification<P: AsRef<Path>>(
    trend: &TrendSeries,
    start_value: f64,
    path: P,
) -> Result<()> {
    write_column(path, &trend.to_classification(start_value), 1)?;
    Ok(())
}

/// Build the per-index projection table.
///
/// One row per source index with columns `index,price,overlay,classification`.
/// Projection cells past the end of a projection are left blank.
pub fn projection_table(prices: &[f64], trend: &TrendSeries) -> String {
    let start_value = prices.first().copied().unwrap_or_default();
    let overlay = trend.to_overlay(start_value);
    let codes = trend.to_classification(start_value);

    let mut table = String::from("index,price,overlay,classification\n");
    for (i, price) in prices.iter().enumerate() {
        let overlay_cell = overlay.get(i).map(|v| format!("{:.6}", v)).unwrap_or_default();
        let code_cell = codes.get(i).map(|c| format!("{:.1}", c)).unwrap_or_default();
        // Writing to a String cannot fail
        let _ = writeln!(table, "{},{:.6},{},{}", i, price, overlay_cell, code_cell);
    }
    table
}

pub fn write_projections<P: AsRef<Path>>(prices: &[f64], trend: &TrendSeries, path: P) -> Result<()> {
    write_file(path, projection_table(prices, trend))?;
    Ok(())
}

/// Generate a text report
pub fn generate_text_report<P: AsRef<Path>>(
    config: &Config,
    prices: &[f64],
    trend: &TrendSeries,
    path: P,
) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;

    writeln!(file, "Swing Trend Report")?;
    writeln!(file, "==================")?;
    writeln!(file)?;

    if let Some(data_file) = &config.data_file {
        writeln!(file, "Data file: {}", data_file.display())?;
    }
    writeln!(file, "Format: {} ({})", config.format, config.field)?;
    writeln!(file, "Log prices: {}", config.log_prices)?;
    writeln!(file, "Period: {}", config.period)?;
    writeln!(file, "Samples: {}", prices.len())?;
    writeln!(file)?;

    let (highs, _) = trend.to_scatter(TrendKind::High);
    let (lows, _) = trend.to_scatter(TrendKind::Low);
    writeln!(file, "Trend points: {}", trend.len())?;
    writeln!(file, "  Highs: {}", highs.len())?;
    writeln!(file, "  Lows: {}", lows.len())?;
    writeln!(file)?;

    writeln!(file, "{:>8} {:>6} {:>14} {:>12}", "Index", "Kind", "Value", "Change")?;
    writeln!(file, "{}", "-".repeat(43))?;

    let mut previous: Option<f64> = None;
    for point in trend.iter() {
        let change = previous
            .map(|p| format!("{:+.6}", point.value - p))
            .unwrap_or_default();
        writeln!(
            file,
            "{:>8} {:>6} {:>14.6} {:>12}",
            point.position, point.kind, point.value, change
        )?;
        previous = Some(point.value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use swing_trend::core::io::{PriceField, SeriesFormat};
    use swing_trend::extract_trend;
    use tempfile::tempdir;

    fn sample() -> (Vec<f64>, TrendSeries) {
        let prices = vec![10.0, 12.0, 9.0, 14.0, 8.0, 13.0];
        let trend = extract_trend(&prices, 3).unwrap();
        (prices, trend)
    }

    #[test]
    fn test_projection_table() {
        let (prices, trend) = sample();
        let table = projection_table(&prices, &trend);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), prices.len() + 1);
        assert_eq!(lines[0], "index,price,overlay,classification");
        assert_eq!(lines[1], "0,10.000000,10.000000,0.0");
        assert_eq!(lines[3], "2,9.000000,9.000000,0.5");
        assert_eq!(lines[5], "4,8.000000,,1.0");
        assert_eq!(lines[6], "5,13.000000,,0.0");
    }

    #[test]
    fn test_write_points_json() {
        let (_, trend) = sample();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/points.json");

        write_points_json(&trend, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let points = value.as_array().unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0]["kind"], "low");
        assert_eq!(points[1]["position"], 1);
        assert_eq!(points[3]["value"], 13.0);
    }

    #[test]
    fn test_write_classification() {
        let (prices, trend) = sample();
        let dir = tempdir().unwrap();
        let path = dir.path().join("codes.txt");

        write_classification(&trend, prices[0], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0.0\n0.0\n0.5\n0.5\n1.0\n0.0\n");
    }

    #[test]
    fn test_generate_text_report() {
        let (prices, trend) = sample();
        let config = Config {
            data_file: Some(PathBuf::from("prices.txt")),
            period: 3,
            format: SeriesFormat::Price,
            field: PriceField::Close,
            log_prices: false,
            output_path: PathBuf::from("results/"),
            no_plot: true,
            log_level: "info".to_string(),
            config: None,
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");

        generate_text_report(&config, &prices, &trend, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Period: 3"));
        assert!(content.contains("Trend points: 4"));
        assert!(content.contains("  Highs: 2"));
        assert!(content.contains("  Lows: 2"));
        assert!(content.contains("-4.000000"));
    }
}
