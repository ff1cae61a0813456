mod standard;
mod vectorized;

use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use crate::errors::PriceError;

pub use standard::StandardPrices;
pub use vectorized::VectorizedPrices;

/// Available price generation strategies
#[derive(Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum, Debug)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorType {
    #[default]
    Standard,
    Vectorized,
}

/// Produces uniformly distributed random prices
pub trait PriceGenerator {
    /// Generates `count` prices, a count of zero gives an empty vector
    ///
    /// # Arguments
    ///
    /// * 'count' - number of prices to generate, must not be negative
    fn generate(&mut self, count: i64) -> Result<Vec<f64>, PriceError> {
        let count = usize::try_from(count)
            .map_err(|_| PriceError::InvalidArgument(format!("number of prices must be greater or equal to 0, got {}", count)))?;

        Ok(self.draw(count))
    }

    /// Draws exactly `count` prices
    fn draw(&mut self, count: usize) -> Vec<f64>;
}

/// Inclusive range prices are drawn from
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange { min: 0.0, max: 100.0 }
    }
}

impl PriceRange {
    /// Returns a validated price range with both bounds on whole cents.
    /// The lower bound is rounded up and the upper bound down, so every
    /// price drawn from the range has at most two decimals.
    ///
    /// # Arguments
    ///
    /// * 'min' - lowest price, inclusive
    /// * 'max' - highest price, inclusive
    pub fn new(min: f64, max: f64) -> Result<PriceRange, PriceError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PriceError::InvalidArgument(format!("price range must be finite: [{}, {}]", min, max)));
        }
        if min < 0.0 || min > max {
            return Err(PriceError::InvalidArgument(format!("invalid price range: [{}, {}]", min, max)));
        }

        let cent_min = to_cents(min, f64::ceil) / 100.0;
        let cent_max = to_cents(max, f64::floor) / 100.0;
        if cent_min > cent_max {
            return Err(PriceError::InvalidArgument(format!("price range [{}, {}] holds no whole cent", min, max)));
        }

        Ok(PriceRange { min: cent_min, max: cent_max })
    }

    /// Returns a range spread symmetrically around a base price
    ///
    /// # Arguments
    ///
    /// * 'base' - the base price
    /// * 'spread' - spread in percent of the base price (0-100)
    pub fn around(base: f64, spread: f64) -> Result<PriceRange, PriceError> {
        if !(0.0..=100.0).contains(&spread) {
            return Err(PriceError::InvalidArgument(format!("spread must be within 0-100 percent, got {}", spread)));
        }
        let delta = base * spread / 100.0;

        PriceRange::new(round_to_two_decimals(base - delta), round_to_two_decimals(base + delta))
    }

    /// Rounds a drawn value to cents and keeps it inside the range
    fn fit(&self, value: f64) -> f64 {
        round_to_two_decimals(value).clamp(self.min, self.max)
    }
}

/// Returns a boxed generator of the requested type
///
/// # Arguments
///
/// * 'generator_type' - which strategy to use
/// * 'range' - range to draw prices from
/// * 'seed' - optional seed for reproducible series
pub fn new_generator(generator_type: GeneratorType, range: PriceRange, seed: Option<u64>) -> Box<dyn PriceGenerator> {
    let rng = new_rng(seed);
    match generator_type {
        GeneratorType::Standard => Box::new(StandardPrices::new(range, rng)),
        GeneratorType::Vectorized => Box::new(VectorizedPrices::new(range, rng)),
    }
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Converts a price to whole cents, snapping values already on a cent
/// (up to float noise, e.g. 64.2 * 100) before applying the directed rounding
fn to_cents(price: f64, direction: fn(f64) -> f64) -> f64 {
    let cents = price * 100f64;
    if (cents - cents.round()).abs() < 1e-6 {
        cents.round()
    } else {
        direction(cents)
    }
}

/// Rounds values to two decimals
///
/// # Arguments
///
/// * 'price' - the price to round to two decimals
fn round_to_two_decimals(price: f64) -> f64 {
    (price * 100f64).round() / 100f64
}
