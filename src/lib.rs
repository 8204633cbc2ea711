//! Swing trend extraction for price files.
//!
//! Re-exports the `trend` crate and adds the price-file loaders used by the
//! command-line tools.

pub mod core;

pub use trend::{extract_trend, Extractor, TrendError, TrendKind, TrendPoint, TrendSeries};
