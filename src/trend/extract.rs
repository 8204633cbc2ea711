use tracing::{debug, trace, warn};

use crate::error::{Result, TrendError};
use crate::point::TrendKind;
use crate::series::TrendSeries;

/// Direction the window scan is currently extending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeekState {
    SeekingHigh,
    SeekingLow,
}

impl From<TrendKind> for SeekState {
    fn from(kind: TrendKind) -> Self {
        match kind {
            TrendKind::High => SeekState::SeekingHigh,
            TrendKind::Low => SeekState::SeekingLow,
        }
    }
}

/// Outcome of scanning one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowScan {
    /// A value went past the last point in the direction being sought.
    Broke { index: usize },
    /// No break; best reversal candidates seen, both starting at the window start.
    Exhausted { new_low: usize, new_high: usize },
}

/// Windowed swing extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    period: usize,
}

impl Extractor {
    /// Create an extractor with the given window size.
    ///
    /// Smaller periods produce more frequent reversals, larger periods a
    /// coarser trend.
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(TrendError::InvalidPeriod);
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Extract the swing trend of `series`.
    ///
    /// # Arguments
    ///
    /// * `series` - Source values, at least `period` long, all finite.
    ///
    /// # Returns
    ///
    /// A `TrendSeries` starting at index 0 with alternating highs and lows,
    /// or a `TrendError` for invalid input or a stalled scan.
    pub fn extract(&self, series: &[f64]) -> Result<TrendSeries> {
        validate(series, self.period)?;

        let mut trend = TrendSeries::new();
        self.bootstrap(series, &mut trend);
        self.extend(series, &mut trend)?;

        // Anchor the trend at the first sample
        if let Some(first) = trend.first_point() {
            if first.position != 0 {
                trace!(kind = %first.kind.opposite(), "prepending leading point");
                trend.prepend_opposite(0, series[0]);
            }
        }

        debug!(
            period = self.period,
            samples = series.len(),
            points = trend.len(),
            "trend extracted"
        );
        Ok(trend)
    }

    /// Seed the trend with the extremes of the first window, in time order.
    fn bootstrap(&self, series: &[f64], trend: &mut TrendSeries) {
        let mut high = (0, series[0]);
        let mut low = (0, series[0]);

        for (index, &value) in series.iter().enumerate().take(self.period) {
            if value > high.1 {
                high = (index, value);
            }
            if value < low.1 {
                low = (index, value);
            }
        }

        if high.0 > low.0 {
            trend.append(low.0, low.1, TrendKind::Low);
            trend.append(high.0, high.1, TrendKind::High);
        } else {
            trend.append(high.0, high.1, TrendKind::High);
            trend.append(low.0, low.1, TrendKind::Low);
        }
    }

    fn extend(&self, series: &[f64], trend: &mut TrendSeries) -> Result<()> {
        let len = series.len();
        let mut start_index = self.period;

        while start_index < len - 1 {
            let Some(&last) = trend.last_point() else {
                break;
            };

            let end_index = (start_index + self.period).min(len);
            let scan = scan_window(series, start_index, end_index, last.kind.into(), last.value);
            trace!(start_index, end_index, ?scan, "window scanned");

            match scan {
                WindowScan::Broke { index } => {
                    trend.append(index, series[index], last.kind);
                }
                WindowScan::Exhausted { new_low, new_high } => {
                    if series[new_low] < series[start_index] {
                        trend.append(new_low, series[new_low], TrendKind::Low);
                    }
                    if series[new_high] > series[start_index] {
                        trend.append(new_high, series[new_high], TrendKind::High);
                    }
                }
            }

            let Some(&current) = trend.last_point() else {
                break;
            };
            if current.position == start_index && current == last {
                warn!(start_index, "no progress in window scan");
                return Err(TrendError::Stalled { start_index });
            }
            start_index = current.position;
        }

        Ok(())
    }
}

/// Extract the swing trend of `series` with windows of `period` samples.
pub fn extract_trend(series: &[f64], period: usize) -> Result<TrendSeries> {
    Extractor::new(period)?.extract(series)
}

fn validate(series: &[f64], period: usize) -> Result<()> {
    if period == 0 {
        return Err(TrendError::InvalidPeriod);
    }
    if series.is_empty() {
        return Err(TrendError::EmptySeries);
    }
    if series.len() < period {
        return Err(TrendError::SeriesTooShort {
            len: series.len(),
            period,
        });
    }
    if let Some((index, &value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(TrendError::NonFiniteValue { index, value });
    }
    Ok(())
}

/// Scan `series[start..end]` for a value beyond `extreme` in the direction of
/// `state`, tracking the best candidate in the other direction meanwhile.
fn scan_window(
    series: &[f64],
    start: usize,
    end: usize,
    state: SeekState,
    extreme: f64,
) -> WindowScan {
    let mut new_low = start;
    let mut new_high = start;

    for (index, &value) in series.iter().enumerate().take(end).skip(start) {
        match state {
            SeekState::SeekingHigh => {
                if value > extreme {
                    return WindowScan::Broke { index };
                }
                if value < series[new_low] {
                    new_low = index;
                }
            }
            SeekState::SeekingLow => {
                if value < extreme {
                    return WindowScan::Broke { index };
                }
                if value > series[new_high] {
                    new_high = index;
                }
            }
        }
    }

    WindowScan::Exhausted { new_low, new_high }
}
