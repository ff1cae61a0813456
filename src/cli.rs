use std::path::PathBuf;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use crate::generators::GeneratorType;
use crate::models::{parse_date, CountryCode, Granularity};

/// Generates synthetic day-ahead power prices, labelled with local delivery times
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a number of plain random prices
    Prices {
        /// Number of random prices to generate
        #[arg(allow_negative_numbers = true)]
        count: i64,

        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// Generate one price per delivery period of a day
    Series {
        /// Delivery date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,

        /// Country code: GB, FR, NL, DE or BE
        #[arg(short, long)]
        country: CountryCode,

        /// Period granularity: h (hourly) or hh (half-hourly)
        #[arg(short, long, default_value = "h")]
        granularity: Granularity,

        /// Draw prices within this many percent around the country base price
        #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
        base_spread: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        generation: GenerationArgs,
    },
}

/// Options shared by both commands, overriding the configuration file
#[derive(clap::Args, Debug, Default)]
pub struct GenerationArgs {
    /// Type of generator to use
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorType>,

    /// Lowest price to draw
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price to draw
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Seed for reproducible prices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file to save the prices
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_series_command() {
        let args = Args::try_parse_from([
            "price_generator", "series", "--date", "2024-10-27", "--country", "gb", "-g", "hh",
            "--generator", "vectorized", "--seed", "3", "--format", "json",
        ]).unwrap();

        match args.command {
            Command::Series { date, country, granularity, format, generation, base_spread } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 27).unwrap());
                assert_eq!(country, CountryCode::GB);
                assert_eq!(granularity, Granularity::HalfHourly);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(generation.generator, Some(GeneratorType::Vectorized));
                assert_eq!(generation.seed, Some(3));
                assert!(base_spread.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_negative_count() {
        let args = Args::try_parse_from(["price_generator", "prices", "-5"]).unwrap();
        assert!(matches!(args.command, Command::Prices { count: -5, .. }));
    }

    #[test]
    fn rejects_unknown_inputs() {
        assert!(Args::try_parse_from(["price_generator", "series", "-d", "2024-10-27", "-c", "SE"]).is_err());
        assert!(Args::try_parse_from(["price_generator", "series", "-d", "27/10/2024", "-c", "GB"]).is_err());
        assert!(Args::try_parse_from(["price_generator", "series", "-d", "2024-10-27", "-c", "GB", "-g", "qh"]).is_err());
        assert!(Args::try_parse_from([
            "price_generator", "series", "-d", "2024-10-27", "-c", "GB", "--base-spread", "10", "--min-price", "5",
        ]).is_err());
    }
}
