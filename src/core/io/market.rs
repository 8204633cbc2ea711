use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// OHLC market data structure
#[derive(Debug, Clone, Default)]
pub struct OhlcData {
    pub date: Vec<u32>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcData {
    /// Get the number of bars
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Borrow one price column
    pub fn column(&self, field: PriceField) -> &[f64] {
        match field {
            PriceField::Open => &self.open,
            PriceField::High => &self.high,
            PriceField::Low => &self.low,
            PriceField::Close => &self.close,
        }
    }
}

/// Price column of an OHLC bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(PriceField::Open),
            "high" => Ok(PriceField::High),
            "low" => Ok(PriceField::Low),
            "close" => Ok(PriceField::Close),
            other => Err(format!("Unknown price field '{}', expected open, high, low or close", other)),
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
        };
        f.pad(name)
    }
}

/// Layout of a market history file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesFormat {
    /// YYYYMMDD Price
    #[default]
    Price,
    /// YYYYMMDD Open High Low Close
    Ohlc,
}

impl FromStr for SeriesFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(SeriesFormat::Price),
            "ohlc" => Ok(SeriesFormat::Ohlc),
            other => Err(format!("Unknown file format '{}', expected price or ohlc", other)),
        }
    }
}

impl fmt::Display for SeriesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesFormat::Price => f.pad("price"),
            SeriesFormat::Ohlc => f.pad("ohlc"),
        }
    }
}

/// Read a single price series from a market history file.
///
/// # Arguments
/// * `filename` - Path to the market history file
/// * `format` - File layout
/// * `field` - Column to take from OHLC files (ignored for single-price files)
/// * `use_log` - Return log prices instead of raw prices
///
/// # Returns
/// The selected prices in file order
pub fn read_series<P: AsRef<Path>>(
    filename: P,
    format: SeriesFormat,
    field: PriceField,
    use_log: bool,
) -> Result<Vec<f64>, String> {
    match format {
        SeriesFormat::Price => read_price_file_impl(filename, use_log),
        SeriesFormat::Ohlc => {
            let data = read_ohlc_file_impl(filename, use_log)?;
            Ok(data.column(field).to_vec())
        }
    }
}

/// Read market data file with single price format (YYYYMMDD Price)
/// Returns log prices by default
pub fn read_price_file<P: AsRef<Path>>(filename: P) -> Result<Vec<f64>, String> {
    read_price_file_impl(filename, true)
}

/// Read market data file with single price format (YYYYMMDD Price)
/// Returns raw prices (not log-transformed)
pub fn read_price_file_raw<P: AsRef<Path>>(filename: P) -> Result<Vec<f64>, String> {
    read_price_file_impl(filename, false)
}

/// Validate the leading YYYYMMDD field of a line and return it
fn parse_date(line: &str, line_num: usize) -> Result<u32, String> {
    if line.len() < 8 {
        return Err(format!("Line {} too short", line_num + 1));
    }

    let date_str = line
        .get(..8)
        .filter(|s| s.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| format!("Invalid date on line {}", line_num + 1))?;

    date_str
        .parse::<u32>()
        .map_err(|_| format!("Invalid date format on line {}", line_num + 1))
}

fn read_price_file_impl<P: AsRef<Path>>(filename: P, use_log: bool) -> Result<Vec<f64>, String> {
    let file = File::open(filename.as_ref())
        .map_err(|e| format!("Cannot open market history file: {}", e))?;

    let reader = BufReader::new(file);
    let mut prices = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .map_err(|e| format!("Error reading line {}: {}", line_num + 1, e))?;

        if line.trim().is_empty() {
            continue;
        }

        parse_date(&line, line_num)?;

        let price_str = line[8..]
            .split([' ', '\t', ','])
            .find(|s| !s.is_empty())
            .ok_or_else(|| format!("No price found on line {}", line_num + 1))?;

        let price = price_str
            .parse::<f64>()
            .map_err(|_| format!("Invalid price on line {}", line_num + 1))?;

        if price <= 0.0 {
            return Err(format!("Non-positive price on line {}", line_num + 1));
        }

        prices.push(if use_log { price.ln() } else { price });
    }

    if prices.is_empty() {
        return Err("No valid data found in file".to_string());
    }

    Ok(prices)
}

/// Read market data file with OHLC format (YYYYMMDD Open High Low Close)
/// Returns log prices by default
pub fn read_ohlc_file<P: AsRef<Path>>(filename: P) -> Result<OhlcData, String> {
    read_ohlc_file_impl(filename, true)
}

/// Read market data file with OHLC format (YYYYMMDD Open High Low Close)
/// Returns raw prices (not log-transformed)
pub fn read_ohlc_file_raw<P: AsRef<Path>>(filename: P) -> Result<OhlcData, String> {
    read_ohlc_file_impl(filename, false)
}

fn read_ohlc_file_impl<P: AsRef<Path>>(filename: P, use_log: bool) -> Result<OhlcData, String> {
    let file = File::open(filename.as_ref())
        .map_err(|e| format!("Cannot open market history file: {}", e))?;

    let reader = BufReader::new(file);
    let mut data = OhlcData::default();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .map_err(|e| format!("Error reading line {}: {}", line_num + 1, e))?;

        if line.trim().is_empty() {
            continue;
        }

        let date_val = parse_date(&line, line_num)?;
        if let Some(&prior) = data.date.last() {
            if date_val <= prior {
                return Err(format!("Date failed to increase at line {}", line_num + 1));
            }
        }

        let parts: Vec<&str> = line[8..]
            .split([' ', '\t', ','])
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() < 4 {
            return Err(format!("Insufficient price data on line {}", line_num + 1));
        }

        let o = parts[0].parse::<f64>()
            .map_err(|_| format!("Invalid open price on line {}", line_num + 1))?;
        let h = parts[1].parse::<f64>()
            .map_err(|_| format!("Invalid high price on line {}", line_num + 1))?;
        let l = parts[2].parse::<f64>()
            .map_err(|_| format!("Invalid low price on line {}", line_num + 1))?;
        let c = parts[3].parse::<f64>()
            .map_err(|_| format!("Invalid close price on line {}", line_num + 1))?;

        if l > o || l > c || h < o || h < c {
            return Err(format!(
                "Invalid open/high/low/close relationship on line {}",
                line_num + 1
            ));
        }

        if o <= 0.0 || h <= 0.0 || l <= 0.0 || c <= 0.0 {
            return Err(format!("Non-positive price on line {}", line_num + 1));
        }

        let convert = |p: f64| if use_log { p.ln() } else { p };
        data.open.push(convert(o));
        data.high.push(convert(h));
        data.low.push(convert(l));
        data.close.push(convert(c));
        data.date.push(date_val);
    }

    if data.is_empty() {
        return Err("No valid data found in file".to_string());
    }

    Ok(data)
}
