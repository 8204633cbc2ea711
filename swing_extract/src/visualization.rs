//! Chart of a price series with its swing trend.

use plotters::prelude::*;
use std::path::Path;
use swing_trend::{TrendKind, TrendSeries};

/// Draw the prices, the trend overlay and the swing markers to an SVG file.
///
/// Swing highs are drawn as red circles, swing lows as green triangles and
/// the overlay as a magenta line through them.
///
/// # Arguments
/// * `prices` - Source series the trend was extracted from
/// * `trend` - Extracted trend
/// * `output_path` - Path where the SVG will be saved
pub fn visualise_trend<P: AsRef<Path>>(
    prices: &[f64],
    trend: &TrendSeries,
    output_path: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(output_path.as_ref(), (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut min_price = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max_price = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !(min_price < max_price) {
        min_price -= 1.0;
        max_price += 1.0;
    }
    let margin = (max_price - min_price) * 0.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("Price with swing trend", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..prices.len().max(1), (min_price - margin)..(max_price + margin))?;

    chart.configure_mesh().disable_mesh().draw()?;

    chart
        .draw_series(LineSeries::new(
            prices.iter().enumerate().map(|(i, p)| (i, *p)),
            &BLUE,
        ))?
        .label("Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    // Overlay stops short of the final point; close the line on it
    let start_value = prices.first().copied().unwrap_or_default();
    let overlay = trend.to_overlay(start_value);
    let tail = trend
        .last_point()
        .filter(|p| p.position >= overlay.len())
        .map(|p| (p.position, p.value));
    chart
        .draw_series(LineSeries::new(
            overlay.iter().enumerate().map(|(i, v)| (i, *v)).chain(tail),
            MAGENTA.stroke_width(2),
        ))?
        .label("Trend")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &MAGENTA));

    let (high_x, high_y) = trend.to_scatter(TrendKind::High);
    chart
        .draw_series(
            high_x
                .into_iter()
                .zip(high_y)
                .map(|point| Circle::new(point, 5, RED.filled())),
        )?
        .label("Swing high")
        .legend(|(x, y)| Circle::new((x, y), 5, RED.filled()));

    let (low_x, low_y) = trend.to_scatter(TrendKind::Low);
    chart
        .draw_series(
            low_x
                .into_iter()
                .zip(low_y)
                .map(|point| TriangleMarker::new(point, 8, GREEN.filled())),
        )?
        .label("Swing low")
        .legend(|(x, y)| TriangleMarker::new((x, y), 8, GREEN.filled()));

    chart.configure_series_labels().border_style(&BLACK).draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swing_trend::extract_trend;
    use tempfile::tempdir;

    #[test]
    fn test_visualise_trend_writes_svg() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect();
        let trend = extract_trend(&prices, 5).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        visualise_trend(&prices, &trend, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.contains("</svg>"));
    }
}
