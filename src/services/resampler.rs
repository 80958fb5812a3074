use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::domain::throughput_sample::ThroughputSample;

/// Draws values uniformly, with replacement, from a [`ThroughputSample`].
///
/// The index distribution is built once per sample so every draw is O(1).
/// The resampler holds no cursor; randomness comes only from the `rng`
/// passed to each call.
pub struct Resampler<'a> {
    values: &'a [f64],
    index: Uniform<usize>,
}

impl<'a> Resampler<'a> {
    pub fn new(sample: &'a ThroughputSample) -> Self {
        let values = sample.values();
        Self {
            values,
            index: Uniform::new(0, values.len()),
        }
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.values[self.index.sample(rng)]
    }

    pub fn resample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.draw(rng)).collect()
    }
}

pub fn resample<R: Rng + ?Sized>(sample: &ThroughputSample, count: usize, rng: &mut R) -> Vec<f64> {
    Resampler::new(sample).resample(count, rng)
}
