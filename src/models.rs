use std::fmt::{Display, Formatter};
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use chrono_tz::Europe::{Amsterdam, Berlin, Brussels, London, Paris};
use serde::{Deserialize, Serialize};
use crate::errors::PriceError;

/// Countries with a known delivery timezone and base price
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum CountryCode {
    GB,
    FR,
    NL,
    DE,
    BE,
}

impl CountryCode {
    pub const ALL: [CountryCode; 5] = [CountryCode::GB, CountryCode::FR, CountryCode::NL, CountryCode::DE, CountryCode::BE];

    /// Returns the IANA timezone that local delivery periods are expressed in
    pub fn timezone(&self) -> Tz {
        match self {
            CountryCode::GB => London,
            CountryCode::FR => Paris,
            CountryCode::NL => Amsterdam,
            CountryCode::DE => Berlin,
            CountryCode::BE => Brussels,
        }
    }

    /// Returns the base price (per MWh) used to derive a price range around
    pub fn base_price(&self) -> f64 {
        match self {
            CountryCode::GB => 78.50,
            CountryCode::FR => 64.20,
            CountryCode::NL => 71.80,
            CountryCode::DE => 69.40,
            CountryCode::BE => 67.90,
        }
    }
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for CountryCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GB" => Ok(CountryCode::GB),
            "FR" => Ok(CountryCode::FR),
            "NL" => Ok(CountryCode::NL),
            "DE" => Ok(CountryCode::DE),
            "BE" => Ok(CountryCode::BE),
            _ => Err(PriceError::InvalidArgument(format!("unsupported country code: {}", s))),
        }
    }
}

/// Sampling granularity of a price series
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Granularity {
    #[serde(rename = "h")]
    Hourly,
    #[serde(rename = "hh")]
    HalfHourly,
}

impl Granularity {
    /// Minutes between two consecutive periods
    pub fn step_minutes(&self) -> i64 {
        match self {
            Granularity::Hourly => 60,
            Granularity::HalfHourly => 30,
        }
    }

    /// Number of periods per hour
    pub fn multiplier(&self) -> usize {
        match self {
            Granularity::Hourly => 1,
            Granularity::HalfHourly => 2,
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Hourly => write!(f, "h"),
            Granularity::HalfHourly => write!(f, "hh"),
        }
    }
}

impl FromStr for Granularity {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h" => Ok(Granularity::Hourly),
            "hh" => Ok(Granularity::HalfHourly),
            _ => Err(PriceError::InvalidArgument(format!("unsupported granularity: {}", s))),
        }
    }
}

/// Length of a calendar day in a given timezone
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub enum DayClassification {
    Normal,
    /// Clocks move forward, one wall-clock hour does not exist
    SpringForward,
    /// Clocks move back, one wall-clock hour occurs twice
    FallBack,
}

impl DayClassification {
    pub fn hours(&self) -> usize {
        match self {
            DayClassification::Normal => 24,
            DayClassification::SpringForward => 23,
            DayClassification::FallBack => 25,
        }
    }
}

impl Display for DayClassification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({} hours)", self, self.hours())
    }
}

/// A price tagged with the local wall-clock start of its delivery period
#[derive(Clone, Serialize, Debug)]
pub struct LabeledPrice {
    pub label: String,
    pub price: f64,
    pub valid_time: DateTime<Utc>,
}

impl Display for LabeledPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2}", self.label, self.price)
    }
}

/// Everything produced for one date, country and granularity
#[derive(Serialize, Debug)]
pub struct SeriesReport {
    pub date: NaiveDate,
    pub country: CountryCode,
    pub granularity: Granularity,
    pub classification: DayClassification,
    pub prices: Vec<LabeledPrice>,
}

/// Parses an ISO 8601 calendar date (YYYY-MM-DD)
///
/// # Arguments
///
/// * 'date' - the date as text
pub fn parse_date(date: &str) -> Result<NaiveDate, PriceError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| PriceError::InvalidArgument(format!("malformed date {}: {}", date, e)))
}
