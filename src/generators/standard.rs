use rand::Rng;
use rand::rngs::StdRng;
use crate::generators::{PriceGenerator, PriceRange};

/// Draws prices one at a time from the random number generator
pub struct StandardPrices {
    range: PriceRange,
    rng: StdRng,
}

impl StandardPrices {
    pub fn new(range: PriceRange, rng: StdRng) -> StandardPrices {
        StandardPrices { range, rng }
    }
}

impl PriceGenerator for StandardPrices {
    fn draw(&mut self, count: usize) -> Vec<f64> {
        let mut prices = Vec::with_capacity(count);
        for _ in 0..count {
            let value = self.rng.random_range(self.range.min..=self.range.max);
            prices.push(self.range.fit(value));
        }

        prices
    }
}
