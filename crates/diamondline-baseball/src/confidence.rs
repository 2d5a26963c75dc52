// Confidence aggregator: weighted factor sum rescaled onto the 60-95
// display range.

use crate::factors::{FactorKind, FactorScores, NEUTRAL_SCORE};
use diamondline_core::config::FactorWeights;

pub const CONFIDENCE_RANGE: (f64, f64) = (60.0, 95.0);
/// Weighted sums at this level map to the bottom of the range.
const RESCALE_ORIGIN: f64 = 50.0;
const RESCALE_SLOPE: f64 = 0.8;

pub fn weight_for(weights: &FactorWeights, kind: FactorKind) -> f64 {
    match kind {
        FactorKind::Offensive => weights.offensive,
        FactorKind::Pitching => weights.pitching,
        FactorKind::Situational => weights.situational,
        FactorKind::Momentum => weights.momentum,
        FactorKind::Market => weights.market,
        FactorKind::System => weights.system,
    }
}

/// Weighted sum of the six scores. A non-finite score counts as neutral.
pub fn weighted_sum(scores: &FactorScores, weights: &FactorWeights) -> f64 {
    scores
        .iter()
        .map(|(kind, score)| {
            let score = if score.is_finite() { score } else { NEUTRAL_SCORE };
            score * weight_for(weights, kind)
        })
        .sum()
}

/// `clamp(60, 95, 60 + (weighted - 50) * 0.8)`
pub fn rescale(weighted: f64) -> f64 {
    let (lo, hi) = CONFIDENCE_RANGE;
    (lo + (weighted - RESCALE_ORIGIN) * RESCALE_SLOPE).clamp(lo, hi)
}

/// Confidence for a set of factor scores, unrounded.
pub fn aggregate(scores: &FactorScores, weights: &FactorWeights) -> f64 {
    rescale(weighted_sum(scores, weights))
}

/// Whole-percent confidence as shown to users.
pub fn to_percent(confidence: f64) -> u8 {
    confidence.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FactorKind;
    use diamondline_core::noise::{Noise, SeededNoise};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn neutral_scores_give_seventy_six() {
        let c = aggregate(&FactorScores::default(), &FactorWeights::STANDARD);
        assert!(approx_eq(c, 76.0, 1e-9));
        assert_eq!(to_percent(c), 76);
    }

    #[test]
    fn rescale_clamps_both_ends() {
        assert_eq!(rescale(40.0), 60.0);
        assert_eq!(rescale(50.0), 60.0);
        assert_eq!(rescale(100.0), 95.0);
        assert!(approx_eq(rescale(75.0), 80.0, 1e-9));
    }

    #[test]
    fn weighted_sum_known_values() {
        let scores = FactorScores {
            offensive: 70.0,
            pitching: 73.0,
            situational: 71.0,
            momentum: 71.0,
            market: 57.0,
            system: 74.5,
        };
        let ws = weighted_sum(&scores, &FactorWeights::STANDARD);
        assert!(approx_eq(ws, 70.25, 1e-9));
        assert!(approx_eq(rescale(ws), 76.2, 1e-9));
    }

    #[test]
    fn non_finite_scores_count_as_neutral() {
        let mut scores = FactorScores::default();
        scores.market = f64::NAN;
        let c = aggregate(&scores, &FactorWeights::STANDARD);
        assert!(approx_eq(c, 76.0, 1e-9));
    }

    #[test]
    fn confidence_bounded_for_in_range_scores() {
        let mut noise = SeededNoise::seeded(11);
        for _ in 0..5000 {
            let mut scores = FactorScores::default();
            for kind in FactorKind::ALL {
                let (lo, hi) = kind.range();
                scores.set(kind, noise.uniform(lo, hi));
            }
            let c = aggregate(&scores, &FactorWeights::STANDARD);
            assert!((60.0..=95.0).contains(&c), "confidence {c} out of range");
        }
        let floor = FactorScores {
            offensive: 50.0,
            pitching: 55.0,
            situational: 55.0,
            momentum: 50.0,
            market: 55.0,
            system: 60.0,
        };
        assert!(aggregate(&floor, &FactorWeights::STANDARD) >= 60.0);
    }

    #[test]
    fn alternate_profile_changes_confidence() {
        let lock = FactorWeights {
            offensive: 0.15,
            pitching: 0.30,
            situational: 0.10,
            momentum: 0.15,
            market: 0.20,
            system: 0.10,
        };
        let mut scores = FactorScores::default();
        scores.market = 90.0;
        let standard = aggregate(&scores, &FactorWeights::STANDARD);
        let locked = aggregate(&scores, &lock);
        assert!(locked > standard);
    }
}
