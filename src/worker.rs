use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use chrono::NaiveDate;
use log::{debug, info};
use thiserror::Error;
use crate::calendar::{classify, period_count};
use crate::cli::{Command, GenerationArgs, OutputFormat};
use crate::config::Config;
use crate::errors::PriceError;
use crate::generators::{new_generator, PriceGenerator, PriceRange};
use crate::labeler::label;
use crate::models::{CountryCode, Granularity, SeriesReport};

/// Runs one generation job
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'command' - the command given on the command line
/// * 'out' - where to print results that are not saved to file
pub fn run(config: &Config, command: &Command, out: &mut impl Write) -> Result<(), WorkerError> {
    match command {
        Command::Prices { count, generation } => {
            run_prices(config, *count, generation, out)
        },
        Command::Series { date, country, granularity, base_spread, format, generation } => {
            run_series(config, *date, *country, *granularity, *base_spread, *format, generation, out)
        },
    }
}

/// Generates plain prices and prints them or saves them one per line
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'count' - number of prices to generate
/// * 'generation' - command line overrides
/// * 'out' - where to print results
fn run_prices(config: &Config, count: i64, generation: &GenerationArgs, out: &mut impl Write) -> Result<(), WorkerError> {
    let range = price_range(config, generation, None)?;
    let mut generator = build_generator(config, generation, range);

    let timer = Instant::now();
    let prices = generator.generate(count)?;
    info!("Generated {} prices in {:?}", prices.len(), timer.elapsed());

    match &generation.output {
        Some(path) => {
            let text = prices.iter().map(|p| format!("{:.2}\n", p)).collect::<String>();
            save(path, &text)?;
            writeln!(out, "Generated {} prices and saved to {}", prices.len(), path.display())?;
        },
        None => {
            let listed = prices.iter().map(|p| format!("{:.2}", p)).collect::<Vec<String>>().join(", ");
            writeln!(out, "Generated prices: [{}]", listed)?;
        },
    }

    Ok(())
}

/// Generates one price per delivery period of a day and labels them with local time
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'date' - delivery date
/// * 'country' - delivery country
/// * 'granularity' - hourly or half-hourly periods
/// * 'base_spread' - optional spread in percent around the country base price
/// * 'format' - output format
/// * 'generation' - command line overrides
/// * 'out' - where to print results
#[allow(clippy::too_many_arguments)]
fn run_series(
    config: &Config,
    date: NaiveDate,
    country: CountryCode,
    granularity: Granularity,
    base_spread: Option<f64>,
    format: OutputFormat,
    generation: &GenerationArgs,
    out: &mut impl Write,
) -> Result<(), WorkerError> {
    let classification = classify(date, country)?;
    let count = period_count(date, country, granularity)?;
    info!("{} {}: {}, {} periods at granularity {}", country, date, classification, count, granularity);

    let range = price_range(config, generation, base_spread.map(|s| (country.base_price(), s)))?;
    debug!("Price range: [{}, {}]", range.min, range.max);
    let mut generator = build_generator(config, generation, range);

    let timer = Instant::now();
    let prices = generator.generate(count as i64)?;
    info!("Generated {} prices in {:?}", prices.len(), timer.elapsed());

    let timer = Instant::now();
    let labeled = label(&prices, date, country, granularity)?;
    info!("Labelled {} prices in {:?}", labeled.len(), timer.elapsed());

    let report = SeriesReport { date, country, granularity, classification, prices: labeled };
    let text = match format {
        OutputFormat::Text => report.prices.iter().map(|p| format!("{}\n", p)).collect::<String>(),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| WorkerError::SerializeError(e.to_string()))?;
            format!("{}\n", json)
        },
    };

    match &generation.output {
        Some(path) => {
            save(path, &text)?;
            writeln!(out, "Generated {} prices and saved to {}", report.prices.len(), path.display())?;
        },
        None => write!(out, "{}", text)?,
    }

    Ok(())
}

/// Resolves the price range from, in order of precedence, a base price spread,
/// command line bounds and configured bounds
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'generation' - command line overrides
/// * 'base_spread' - optional base price and spread in percent
fn price_range(config: &Config, generation: &GenerationArgs, base_spread: Option<(f64, f64)>) -> Result<PriceRange, PriceError> {
    if let Some((base, spread)) = base_spread {
        return PriceRange::around(base, spread);
    }

    PriceRange::new(
        generation.min_price.unwrap_or(config.generation.min_price),
        generation.max_price.unwrap_or(config.generation.max_price),
    )
}

fn build_generator(config: &Config, generation: &GenerationArgs, range: PriceRange) -> Box<dyn PriceGenerator> {
    let generator_type = generation.generator.unwrap_or(config.generation.generator);
    let seed = generation.seed.or(config.generation.seed);
    debug!("Using {:?} generator, seed: {:?}", generator_type, seed);

    new_generator(generator_type, range, seed)
}

/// Saves generated output to file
///
/// # Arguments
///
/// * 'path' - file to write
/// * 'text' - the content
fn save(path: &Path, text: &str) -> Result<(), WorkerError> {
    fs::write(path, text)
        .map_err(|e| WorkerError::SaveError(format!("error writing prices to {}: {}", path.display(), e)))?;
    info!("Prices saved to {}", path.display());

    Ok(())
}

/// Error depicting errors that occur while running a generation job
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("{0}")]
    PriceError(#[from] PriceError),
    #[error("SaveError: {0}")]
    SaveError(String),
    #[error("SerializeError: {0}")]
    SerializeError(String),
    #[error("OutputError: {0}")]
    OutputError(#[from] std::io::Error),
}
