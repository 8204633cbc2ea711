use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use swing_trend::core::io::{PriceField, SeriesFormat};
use tracing::warn;

/// Configuration for swing trend extraction
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "swing_extract")]
#[command(about = "Extract the swing trend (alternating highs and lows) of a price series")]
pub struct Config {
    /// Path to market data file
    #[arg(value_name = "DATA_FILE", required_unless_present = "config")]
    pub data_file: Option<PathBuf>,

    /// Window size for the extremum search (smaller gives more reversals)
    #[arg(long, default_value_t = 10)]
    #[serde(default = "default_period")]
    pub period: usize,

    /// Market data layout: price (YYYYMMDD Price) or ohlc (YYYYMMDD O H L C)
    #[arg(long, default_value_t = SeriesFormat::Price)]
    #[serde(default)]
    pub format: SeriesFormat,

    /// Column used from OHLC files
    #[arg(long, default_value_t = PriceField::Close)]
    #[serde(default)]
    pub field: PriceField,

    /// Work on log prices instead of raw prices
    #[arg(long)]
    #[serde(default)]
    pub log_prices: bool,

    /// Directory for output files
    #[arg(long, default_value = "results/")]
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Skip the SVG chart
    #[arg(long)]
    #[serde(default)]
    pub no_plot: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// TOML file holding the whole configuration (replaces other arguments)
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

fn default_period() -> usize { 10 }
fn default_output_path() -> PathBuf { PathBuf::from("results/") }
fn default_log_level() -> String { "info".to_string() }

impl Config {
    /// Parse the command line, switching to the TOML file when `--config` is given
    pub fn load() -> Result<Self> {
        let cli = Config::parse();
        match &cli.config {
            Some(path) => Config::from_file(path),
            None => Ok(cli),
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.config = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.data_file.is_none() {
            anyhow::bail!("data_file must be given");
        }

        if self.period == 0 {
            anyhow::bail!("period must be greater than 0");
        }

        if self.period == 1 {
            warn!("period 1 cannot confirm reversals; extraction stalls on the first pullback");
        }

        if self.format == SeriesFormat::Price && self.field != PriceField::Close {
            warn!(field = %self.field, "field is ignored for single-price files");
        }

        Ok(())
    }

    /// Path of the market data file
    pub fn data_file(&self) -> Result<&Path> {
        self.data_file
            .as_deref()
            .context("data_file must be given")
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_path.join(name)
    }
}
