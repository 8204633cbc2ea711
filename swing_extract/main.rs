use anyhow::Result;
use swing_extract::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    println!("Swing Trend Extraction\n");
    config.validate()?;

    let summary = run(&config)?;

    println!("Samples: {}", summary.samples);
    println!("Trend points: {} ({} highs, {} lows)", summary.points, summary.highs, summary.lows);
    println!("\nOutputs:");
    for path in &summary.outputs {
        println!("  {}", path.display());
    }

    Ok(())
}
