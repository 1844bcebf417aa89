//! BandLab CLI — compute, sample, and check commands.
//!
//! Commands:
//! - `compute` — compute Bollinger Bands over a JSON candle series, emit JSON or CSV
//! - `sample` — write a deterministic synthetic candle series
//! - `check` — compute bands and report ordering/symmetry violations

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bandlab_core::data::{load_series, malformed_candles, save_series};
use bandlab_core::sample::{generate_candles, DEFAULT_SAMPLE_COUNT};
use bandlab_core::{
    validate_bands, BandPoint, BollingerBands, Candle, Indicator, IndicatorSettings, PriceSource,
    SettingsLimits,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bandlab",
    about = "BandLab CLI — Bollinger Bands over OHLCV candle series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute Bollinger Bands and write one point per candle.
    Compute {
        /// JSON candle series: [{timestamp, open, high, low, close, volume}, ...].
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a synthetic candle series as JSON.
    Sample {
        /// Number of candles.
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        count: usize,

        /// RNG seed; the same seed always produces the same series.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute Bollinger Bands and check band ordering and symmetry.
    Check {
        /// JSON candle series.
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Indicator settings: an optional TOML file, then per-field overrides.
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// TOML settings file (length, ma_type, source, std_dev_multiplier, offset).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Lookback window length.
    #[arg(long)]
    length: Option<usize>,

    /// Price source: close, open, high, low (unknown names read close).
    #[arg(long)]
    source: Option<String>,

    /// Standard deviation multiplier.
    #[arg(long)]
    multiplier: Option<f64>,

    /// Shift bands by N bars; positive values shift them later.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,

    /// Clamp settings into the settings dialog ranges instead of rejecting them.
    #[arg(long, default_value_t = false)]
    clamp: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            data,
            settings,
            format,
            output,
        } => run_compute(&data, &settings, format, output.as_deref()),
        Commands::Sample {
            count,
            seed,
            output,
        } => run_sample(count, seed, output.as_deref()),
        Commands::Check { data, settings } => run_check(&data, &settings),
    }
}

/// Build validated settings from the file (or defaults) plus flag overrides.
fn resolve_settings(args: &SettingsArgs) -> Result<BollingerBands> {
    let mut settings = match &args.settings {
        Some(path) => IndicatorSettings::from_file(path)?,
        None => IndicatorSettings::default(),
    };

    if let Some(length) = args.length {
        settings.length = length;
    }
    if let Some(source) = &args.source {
        settings.source = PriceSource::from_name(source);
    }
    if let Some(multiplier) = args.multiplier {
        settings.std_dev_multiplier = multiplier;
    }
    if let Some(offset) = args.offset {
        settings.offset = offset;
    }
    if args.clamp {
        settings = SettingsLimits::default().clamp(settings);
    }

    Ok(BollingerBands::new(settings)?)
}

fn load(data: &Path) -> Result<Vec<Candle>> {
    let candles = load_series(data)?;
    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        info!(
            candles = candles.len(),
            from = %first.datetime().map(|d| d.to_rfc3339()).unwrap_or_default(),
            to = %last.datetime().map(|d| d.to_rfc3339()).unwrap_or_default(),
            "loaded series"
        );
    }
    Ok(candles)
}

fn run_compute(
    data: &Path,
    settings: &SettingsArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let bb = resolve_settings(settings)?;
    let candles = load(data)?;
    let points = bb.compute(&candles);
    info!(indicator = bb.name(), points = points.len(), "computed bands");

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &points)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, &points)?,
    }
    out.flush()?;
    Ok(())
}

/// CSV with an empty cell wherever a value is undefined.
fn write_csv<W: Write>(out: W, points: &[BandPoint]) -> Result<()> {
    fn cell(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["timestamp", "basis", "upper", "lower", "source_value", "std_dev"])?;
    for p in points {
        writer.write_record([
            p.timestamp.to_string(),
            cell(p.basis),
            cell(p.upper),
            cell(p.lower),
            p.source_value.to_string(),
            cell(p.std_dev),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn run_sample(count: usize, seed: u64, output: Option<&Path>) -> Result<()> {
    let candles = generate_candles(count, seed);

    match output {
        Some(path) => {
            save_series(path, &candles)?;
            println!("Generated {} candles: {}", candles.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&candles)?),
    }

    if !candles.is_empty() {
        let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        info!(low, high, "price range");
    }
    Ok(())
}

fn run_check(data: &Path, settings: &SettingsArgs) -> Result<()> {
    let bb = resolve_settings(settings)?;
    let candles = load(data)?;
    let points = bb.compute(&candles);
    let report = validate_bands(&points, bb.settings().length);

    println!("Indicator: {}", bb.settings());
    println!("Candles: {}", candles.len());
    println!("Malformed candles: {}", malformed_candles(&candles).len());
    println!("Defined points: {}", report.valid_count);

    if report.is_valid() {
        println!("OK: no violations");
        return Ok(());
    }

    println!("Violations: {}", report.violations.len());
    for violation in &report.violations {
        println!("  {violation}");
    }
    std::process::exit(1);
}
