// Market inefficiency: compare the price's implied probability with a
// home/away baseline estimate of the true probability.

use super::{FactorError, PickContext};
use diamondline_core::noise::Noise;
use diamondline_core::odds::implied_probability;

pub const BASE: f64 = 65.0;
pub const RANGE: (f64, f64) = (55.0, 90.0);
const NOISE: f64 = 4.0;

const HOME_BASELINE: f64 = 0.54;
const AWAY_BASELINE: f64 = 0.46;
const BASELINE_SPREAD: f64 = 0.05;
const TRUE_PROB_RANGE: (f64, f64) = (0.3, 0.7);

/// Estimated true win probability for the picked side.
pub fn estimate_true_probability(is_home: bool, noise: &mut dyn Noise) -> f64 {
    let baseline = if is_home { HOME_BASELINE } else { AWAY_BASELINE };
    (baseline + noise.jitter(BASELINE_SPREAD)).clamp(TRUE_PROB_RANGE.0, TRUE_PROB_RANGE.1)
}

/// Relative edge of the estimate over the market.
pub fn edge(true_prob: f64, implied_prob: f64) -> f64 {
    (true_prob - implied_prob) / implied_prob
}

pub fn edge_adjustment(edge: f64) -> f64 {
    if edge > 0.10 {
        15.0
    } else if edge > 0.05 {
        8.0
    } else if edge > 0.0 {
        3.0
    } else if edge > -0.05 {
        0.0
    } else if edge > -0.10 {
        -8.0
    } else {
        -15.0
    }
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let implied = implied_probability(ctx.price)?;
    let true_prob = estimate_true_probability(ctx.is_home, noise);

    let mut score = BASE + edge_adjustment(edge(true_prob, implied));
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}
