// Offensive production: batting average and OPS bands, plus optional
// Statcast quality-of-contact bands.

use super::{optional, required, FactorError, PickContext};
use diamondline_core::noise::Noise;

pub const BASE: f64 = 60.0;
pub const RANGE: (f64, f64) = (50.0, 95.0);
const NOISE: f64 = 4.0;

pub fn avg_adjustment(avg: f64) -> f64 {
    if avg > 0.280 {
        8.0
    } else if avg > 0.265 {
        4.0
    } else if avg < 0.240 {
        -6.0
    } else {
        0.0
    }
}

pub fn ops_adjustment(ops: f64) -> f64 {
    if ops > 0.820 {
        10.0
    } else if ops > 0.760 {
        5.0
    } else if ops < 0.700 {
        -8.0
    } else {
        0.0
    }
}

pub fn xwoba_adjustment(xwoba: f64) -> f64 {
    if xwoba > 0.340 {
        6.0
    } else if xwoba > 0.320 {
        3.0
    } else if xwoba < 0.300 {
        -5.0
    } else {
        0.0
    }
}

/// Barrel rate is a percentage of batted-ball events.
pub fn barrel_adjustment(barrel_rate: f64) -> f64 {
    if barrel_rate > 10.0 {
        4.0
    } else if barrel_rate > 8.0 {
        2.0
    } else if barrel_rate < 6.0 {
        -3.0
    } else {
        0.0
    }
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let stats = ctx.pick_stats();
    let avg = required(stats.batting_avg, "batting_avg")?;
    let ops = required(stats.ops, "ops")?;
    let xwoba = optional(stats.xwoba, "xwoba")?;
    let barrel_rate = optional(stats.barrel_rate, "barrel_rate")?;

    let mut score = BASE + avg_adjustment(avg) + ops_adjustment(ops);
    if let Some(x) = xwoba {
        score += xwoba_adjustment(x);
    }
    if let Some(b) = barrel_rate {
        score += barrel_adjustment(b);
    }
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}
