use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the bounded uniform noise applied to the credit score estimate,
/// the risk score and the confidence figure.
///
/// Implementations return unit samples in `[0, 1)`; [`NoiseSource::jitter`]
/// maps a sample onto the symmetric interval `[-amplitude, amplitude)`.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;

    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.sample() - 0.5) * 2.0 * amplitude
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Uniform noise backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomNoise<R = StdRng> {
    rng: R,
}

impl RandomNoise<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is configured, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomNoise<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always samples the midpoint, so every jitter is exactly zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self) -> f64 {
        0.5
    }
}

/// Replays a fixed sequence of unit samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedNoise {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedNoise {
    /// Samples outside `[0, 1)` are clamped into range. An empty script
    /// behaves like [`NoNoise`].
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|sample| {
                if sample.is_nan() {
                    0.5
                } else {
                    sample.clamp(0.0, 1.0 - f64::EPSILON)
                }
            })
            .collect();
        Self { samples, cursor: 0 }
    }
}

impl NoiseSource for ScriptedNoise {
    fn sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.5;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_amplitude() {
        let mut noise = RandomNoise::seeded(7);
        for _ in 0..1_000 {
            let value = noise.jitter(4.0);
            assert!((-4.0..4.0).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let mut first = RandomNoise::seeded(99);
        let mut second = RandomNoise::seeded(99);
        let a: Vec<f64> = (0..5).map(|_| first.sample()).collect();
        let b: Vec<f64> = (0..5).map(|_| second.sample()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn scripted_noise_cycles_and_clamps() {
        let mut noise = ScriptedNoise::new([0.0, 2.0]);
        assert_eq!(noise.jitter(30.0), -30.0);
        assert!(noise.jitter(30.0) > 29.99);
        assert_eq!(noise.jitter(30.0), -30.0);
    }

    #[test]
    fn no_noise_is_neutral() {
        assert_eq!(NoNoise.jitter(8.0), 0.0);
        assert_eq!(ScriptedNoise::new([]).jitter(3.0), 0.0);
    }
}
