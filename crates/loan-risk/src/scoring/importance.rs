use super::prediction::{Factor, FeatureImportances};
use std::collections::BTreeMap;

/// Rescale raw per-factor magnitudes into shares of 100.
///
/// Factors missing from `raw` count as zero. When every magnitude is zero the
/// result is an even split across all seven factors.
pub fn normalize_importances<I>(raw: I) -> FeatureImportances
where
    I: IntoIterator<Item = (Factor, f64)>,
{
    let mut magnitudes: BTreeMap<Factor, f64> =
        Factor::ALL.iter().map(|factor| (*factor, 0.0)).collect();
    for (factor, magnitude) in raw {
        let magnitude = if magnitude.is_finite() {
            magnitude.abs()
        } else {
            0.0
        };
        *magnitudes.entry(factor).or_insert(0.0) += magnitude;
    }

    let total: f64 = magnitudes.values().sum();
    if total == 0.0 {
        let even = 100.0 / Factor::ALL.len() as f64;
        return FeatureImportances::from_map(
            magnitudes.into_keys().map(|factor| (factor, even)).collect(),
        );
    }

    FeatureImportances::from_map(
        magnitudes
            .into_iter()
            .map(|(factor, magnitude)| (factor, magnitude / total * 100.0))
            .collect(),
    )
}
