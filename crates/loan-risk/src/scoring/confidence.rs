use super::noise::NoiseSource;

pub const BASE_CONFIDENCE: f64 = 85.0;
pub const EXTREMITY_BONUS: f64 = 8.0;
pub const COMPLETENESS_WEIGHT: f64 = 10.0;
pub const CONFIDENCE_MIN: f64 = 70.0;
pub const CONFIDENCE_MAX: f64 = 98.0;
pub const CONFIDENCE_NOISE: f64 = 3.0;

/// Confidence percentage for a final (clamped, unrounded) risk score.
///
/// `completeness` is the provided-field share in `[0, 1]`.
pub fn estimate_confidence(risk_score: f64, completeness: f64, noise: &mut impl NoiseSource) -> u8 {
    let mut confidence = BASE_CONFIDENCE;
    if risk_score < 25.0 || risk_score > 75.0 {
        confidence += EXTREMITY_BONUS;
    }
    confidence += completeness.clamp(0.0, 1.0) * COMPLETENESS_WEIGHT;
    confidence += noise.jitter(CONFIDENCE_NOISE);

    confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::noise::{NoNoise, ScriptedNoise};

    #[test]
    fn moderate_score_with_full_data() {
        assert_eq!(estimate_confidence(50.0, 1.0, &mut NoNoise), 95);
    }

    #[test]
    fn extreme_scores_earn_bonus_but_cap_at_98() {
        assert_eq!(estimate_confidence(5.0, 1.0, &mut NoNoise), 98);
        assert_eq!(estimate_confidence(80.0, 0.5, &mut NoNoise), 98);
        assert_eq!(estimate_confidence(24.9, 0.0, &mut NoNoise), 93);
    }

    #[test]
    fn band_edges_are_exclusive() {
        assert_eq!(estimate_confidence(25.0, 0.0, &mut NoNoise), 85);
        assert_eq!(estimate_confidence(75.0, 0.0, &mut NoNoise), 85);
    }

    #[test]
    fn noise_moves_at_most_three_points() {
        assert_eq!(estimate_confidence(50.0, 0.0, &mut ScriptedNoise::new([0.0])), 82);
        assert_eq!(estimate_confidence(50.0, 0.0, &mut ScriptedNoise::new([1.0])), 88);
        assert_eq!(estimate_confidence(50.0, 1.0, &mut ScriptedNoise::new([0.0])), 92);
        assert_eq!(estimate_confidence(50.0, 1.0, &mut ScriptedNoise::new([1.0])), 98);
    }

    #[test]
    fn half_points_round_up() {
        // 85 + 2.5 + just under 3
        assert_eq!(estimate_confidence(50.0, 0.25, &mut ScriptedNoise::new([1.0])), 91);
    }
}
