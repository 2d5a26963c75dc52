// Injectable random source for the scoring variance.
//
// Calculators never reach for a global RNG; they draw from whatever `Noise`
// the caller hands in, so tests can pin every draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait Noise {
    fn unit(&mut self) -> f64;

    /// Uniform draw in `[lo, hi]`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Symmetric variance in `[-spread, +spread]`.
    fn jitter(&mut self, spread: f64) -> f64 {
        self.uniform(-spread, spread)
    }

    /// True when a unit draw lands strictly above `threshold`.
    fn chance_above(&mut self, threshold: f64) -> bool {
        self.unit() > threshold
    }

    /// Index into a collection of `len` items. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<N: Noise + ?Sized> Noise for &mut N {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

impl<N: Noise + ?Sized> Noise for Box<N> {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Production noise backed by `StdRng`.
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Non-reproducible noise seeded from the OS.
    pub fn from_entropy() -> Self {
        SeededNoise {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible noise for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        SeededNoise {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Noise for SeededNoise {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Every draw is 0.5: uniform ranges return their midpoint, jitter is zero,
/// and `chance_above` is false for any threshold at or above one half.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointNoise;

impl Noise for MidpointNoise {
    fn unit(&mut self) -> f64 {
        0.5
    }
}

/// Cycles through a fixed list of unit draws.
#[derive(Debug, Clone)]
pub struct SequenceNoise {
    values: Vec<f64>,
    next: usize,
}

impl SequenceNoise {
    /// Values are clamped into `[0, 1)`. An empty list behaves like
    /// [`MidpointNoise`].
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        SequenceNoise { values, next: 0 }
    }
}

impl Noise for SequenceNoise {
    fn unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}
