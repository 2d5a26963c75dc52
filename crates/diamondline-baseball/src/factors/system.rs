// System confidence: how complete the inputs are. Each present field adds a
// fixed quality weight to a running average, and the score drifts toward
// that average.

use super::{optional, FactorError, PickContext};
use diamondline_core::noise::Noise;

pub const BASE: f64 = 70.0;
pub const RANGE: (f64, f64) = (60.0, 85.0);
const NOISE: f64 = 3.0;

/// How far the score moves toward the average data quality.
const QUALITY_PULL: f64 = 0.3;
/// Average quality assumed when nothing is present.
const EMPTY_QUALITY: f64 = 50.0;

const BATTING_AVG_QUALITY: f64 = 85.0;
const ERA_QUALITY: f64 = 90.0;
const OPS_QUALITY: f64 = 85.0;
const FORM_QUALITY: f64 = 80.0;
const WEATHER_QUALITY: f64 = 75.0;

/// Mean quality weight over the inputs that are present.
pub fn data_quality(ctx: &PickContext<'_>) -> Result<f64, FactorError> {
    let stats = ctx.pick_stats();
    let mut total = 0.0;
    let mut count = 0u32;
    let mut add = |present: bool, weight: f64| {
        if present {
            total += weight;
            count += 1;
        }
    };

    add(optional(stats.batting_avg, "batting_avg")?.is_some(), BATTING_AVG_QUALITY);
    add(optional(stats.era, "era")?.is_some(), ERA_QUALITY);
    add(optional(stats.ops, "ops")?.is_some(), OPS_QUALITY);
    add(ctx.form().and_then(|f| f.win_pct()).is_some(), FORM_QUALITY);
    if let Some(weather) = ctx.weather() {
        optional(Some(weather.temperature_f), "temperature_f")?;
        optional(Some(weather.wind_mph), "wind_mph")?;
        add(true, WEATHER_QUALITY);
    }

    if count == 0 {
        return Ok(EMPTY_QUALITY);
    }
    Ok(total / count as f64)
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let quality = data_quality(ctx)?;
    let mut score = BASE + (quality - BASE) * QUALITY_PULL;
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}
