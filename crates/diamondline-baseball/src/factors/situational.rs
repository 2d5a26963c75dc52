// Situational edge: home field, ballpark, and weather.

use super::{optional, FactorError, PickContext};
use crate::ballpark::{park_effect, venue_for};
use diamondline_core::noise::Noise;

pub const BASE: f64 = 60.0;
pub const RANGE: (f64, f64) = (55.0, 85.0);
const NOISE: f64 = 4.0;

const HOME_BONUS: f64 = 8.0;
const AWAY_PENALTY: f64 = -3.0;
/// Share of the park effect the visiting side receives.
const VISITOR_PARK_SHARE: f64 = 0.3;

/// Park effect for the picked side: full weight at home, 30% on the road.
pub fn ballpark_adjustment(home_team: &str, is_home: bool) -> f64 {
    let effect = venue_for(home_team).map(park_effect).unwrap_or(0.0);
    if is_home {
        effect
    } else {
        effect * VISITOR_PARK_SHARE
    }
}

/// Deterministic part of the weather adjustment.
pub fn temperature_adjustment(temperature_f: f64) -> f64 {
    if temperature_f > 85.0 {
        2.0
    } else if temperature_f < 50.0 {
        -3.0
    } else {
        0.0
    }
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let mut score = BASE;
    score += if ctx.is_home { HOME_BONUS } else { AWAY_PENALTY };
    score += ballpark_adjustment(ctx.home_team, ctx.is_home);

    if let Some(weather) = ctx.weather() {
        let temperature = optional(Some(weather.temperature_f), "temperature_f")?;
        let wind = optional(Some(weather.wind_mph), "wind_mph")?;
        if let Some(t) = temperature {
            score += temperature_adjustment(t);
        }
        if let Some(w) = wind {
            // Strong wind cuts both ways; which way is unknown without direction.
            if w > 15.0 {
                score += noise.jitter(3.0);
            }
            if w > 20.0 {
                score -= 2.0;
            }
        }
    }
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::testing::*;
    use diamondline_core::noise::{MidpointNoise, SequenceNoise};
    use diamondline_core::stats::Weather;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn home_side_gets_full_park_effect() {
        assert_eq!(ballpark_adjustment("Colorado Rockies", true), 6.0);
        assert!(approx_eq(ballpark_adjustment("Colorado Rockies", false), 1.8, 1e-9));
        assert_eq!(ballpark_adjustment("Nowhere Nine", true), 0.0);
    }

    #[test]
    fn home_and_away_baselines() {
        let stats = average_matchup();
        let home = score(&home_pick(&stats), &mut MidpointNoise).unwrap();
        let away = score(&away_pick(&stats), &mut MidpointNoise).unwrap();
        // Yankee Stadium plays +3.
        assert_eq!(home, BASE + 8.0 + 3.0);
        assert!(approx_eq(away, BASE - 3.0 + 0.9, 1e-9));
    }

    #[test]
    fn cold_weather_penalty() {
        let mut stats = average_matchup();
        stats.weather = Some(Weather { temperature_f: 42.0, wind_mph: 5.0 });
        let score = score(&home_pick(&stats), &mut MidpointNoise).unwrap();
        assert_eq!(score, BASE + 8.0 + 3.0 - 3.0);
    }

    #[test]
    fn gale_draws_extra_variance() {
        let mut stats = average_matchup();
        stats.weather = Some(Weather { temperature_f: 70.0, wind_mph: 22.0 });
        // First draw is the wind term, second the general jitter.
        let mut noise = SequenceNoise::new(vec![0.0, 0.5]);
        let score = score(&home_pick(&stats), &mut noise).unwrap();
        assert_eq!(score, BASE + 8.0 + 3.0 - 3.0 - 2.0);
    }

    #[test]
    fn clamps_to_floor_for_weak_road_spot() {
        let mut stats = average_matchup();
        stats.weather = Some(Weather { temperature_f: 35.0, wind_mph: 25.0 });
        let mut ctx = away_pick(&stats);
        ctx.home_team = "San Diego Padres";
        let mut noise = SequenceNoise::new(vec![0.0]);
        let score = score(&ctx, &mut noise).unwrap();
        assert_eq!(score, RANGE.0);
    }
}
