// Pitching matchup: staff ERA and WHIP bands, plus the starter-vs-starter
// ERA gap when both starters are known.

use super::{optional, required, FactorError, PickContext};
use diamondline_core::noise::Noise;

pub const BASE: f64 = 65.0;
pub const RANGE: (f64, f64) = (55.0, 90.0);
const NOISE: f64 = 3.0;

/// Points per run of starter ERA advantage.
const STARTER_GAP_SCALE: f64 = 4.0;
const STARTER_GAP_CAP: f64 = 10.0;

pub fn era_adjustment(era: f64) -> f64 {
    if era < 3.50 {
        8.0
    } else if era < 4.00 {
        4.0
    } else if era > 5.00 {
        -8.0
    } else if era > 4.50 {
        -4.0
    } else {
        0.0
    }
}

pub fn whip_adjustment(whip: f64) -> f64 {
    if whip < 1.20 {
        5.0
    } else if whip > 1.40 {
        -5.0
    } else {
        0.0
    }
}

/// Positive when the picked starter has the lower ERA. Capped at +/-10.
pub fn starter_gap_adjustment(pick_starter_era: f64, opp_starter_era: f64) -> f64 {
    ((opp_starter_era - pick_starter_era) * STARTER_GAP_SCALE).clamp(-STARTER_GAP_CAP, STARTER_GAP_CAP)
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let pick = ctx.pick_stats();
    let opp = ctx.opponent_stats();

    let era = required(pick.era, "era")?;
    let whip = optional(pick.whip, "whip")?;
    let pick_starter = optional(pick.starter_era, "starter_era")?;
    let opp_starter = optional(opp.starter_era, "opponent_starter_era")?;

    let mut score = BASE + era_adjustment(era);
    if let (Some(mine), Some(theirs)) = (pick_starter, opp_starter) {
        score += starter_gap_adjustment(mine, theirs);
    }
    if let Some(w) = whip {
        score += whip_adjustment(w);
    }
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}
