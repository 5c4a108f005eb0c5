//! Nullable random: deterministic draws for the classifier fallback.

use mailscribe_classifier::RandomSource;
use std::sync::Mutex;

/// A deterministic random source for testing.
///
/// Returns pre-configured values in order, wrapping around at the end.
pub struct NullRandom {
    outputs: Vec<f64>,
    index: Mutex<usize>,
}

impl NullRandom {
    /// Create with a sequence of deterministic values in `[0, 1)`.
    pub fn new(outputs: Vec<f64>) -> Self {
        assert!(!outputs.is_empty(), "NullRandom needs at least one value");
        Self {
            outputs,
            index: Mutex::new(0),
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl RandomSource for NullRandom {
    fn next_f64(&self) -> f64 {
        let mut idx = self.index.lock().unwrap();
        let value = self.outputs[*idx % self.outputs.len()];
        *idx += 1;
        value
    }
}
