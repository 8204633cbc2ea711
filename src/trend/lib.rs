//! Swing trend extraction.
//!
//! Reduces a price series to a zig-zag of alternating swing highs and lows
//! (the trend "metaseries") and projects it back onto the sampling grid of
//! the original series.
//!
//! # Modules
//!
//! - `point` - `TrendPoint` and its `TrendKind` tag
//! - `series` - `TrendSeries` container and its projections
//! - `extract` - windowed extremum search building a `TrendSeries`
//! - `error` - input validation and progress errors

mod error;
mod extract;
mod point;
mod series;

pub use error::{Result, TrendError};
pub use extract::{extract_trend, Extractor};
pub use point::{TrendKind, TrendPoint};
pub use series::TrendSeries;
