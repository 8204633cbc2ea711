use thiserror::Error;

/// Errors raised while extracting a trend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("trend: invalid period: period must be at least 1")]
    InvalidPeriod,

    #[error("trend: empty series provided")]
    EmptySeries,

    #[error("trend: series too short: length = {len}, period = {period}")]
    SeriesTooShort { len: usize, period: usize },

    #[error("trend: non-finite value {value} at index {index}")]
    NonFiniteValue { index: usize, value: f64 },

    /// The window scan neither moved its start index nor revised the last point.
    #[error("trend: extraction stalled at index {start_index}")]
    Stalled { start_index: usize },
}

pub type Result<T> = std::result::Result<T, TrendError>;
