use super::noise::NoiseSource;

pub const BASE_RISK_SCORE: f64 = 50.0;
pub const RISK_SCORE_MIN: f64 = 5.0;
pub const RISK_SCORE_MAX: f64 = 95.0;
pub const RISK_SCORE_NOISE: f64 = 4.0;

/// Base score plus every impact plus bounded noise, clamped. Stays unrounded.
pub fn aggregate_risk<I>(impacts: I, noise: &mut impl NoiseSource) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let raw = impacts.into_iter().fold(BASE_RISK_SCORE, |score, impact| score + impact);
    (raw + noise.jitter(RISK_SCORE_NOISE)).clamp(RISK_SCORE_MIN, RISK_SCORE_MAX)
}
