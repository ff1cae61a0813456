use rand::Rng;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use crate::generators::{PriceGenerator, PriceRange};

/// Fills a buffer of unit samples in one pass and scales the whole batch into the price range
pub struct VectorizedPrices {
    range: PriceRange,
    rng: StdRng,
}

impl VectorizedPrices {
    pub fn new(range: PriceRange, rng: StdRng) -> VectorizedPrices {
        VectorizedPrices { range, rng }
    }
}

impl PriceGenerator for VectorizedPrices {
    fn draw(&mut self, count: usize) -> Vec<f64> {
        let unit: Vec<f64> = (&mut self.rng).sample_iter(StandardUniform).take(count).collect();
        let span = self.range.max - self.range.min;

        unit.into_iter()
            .map(|u| self.range.fit(self.range.min + u * span))
            .collect()
    }
}
