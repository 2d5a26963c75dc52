// Team momentum: recent win percentage plus random hot/cold streak swings.

use super::{FactorError, PickContext};
use diamondline_core::noise::Noise;

pub const BASE: f64 = 65.0;
pub const RANGE: (f64, f64) = (50.0, 95.0);
const NOISE: f64 = 3.0;

const STREAK_SWING: f64 = 8.0;
/// A unit draw above this marks a hot streak (30% of the time).
const HOT_STREAK_ABOVE: f64 = 0.7;
/// A unit draw above this marks a cold streak (20% of the time).
const COLD_STREAK_ABOVE: f64 = 0.8;

pub fn win_pct_adjustment(win_pct: f64) -> f64 {
    if win_pct >= 0.700 {
        10.0
    } else if win_pct >= 0.600 {
        6.0
    } else if win_pct <= 0.300 {
        -10.0
    } else if win_pct <= 0.400 {
        -6.0
    } else {
        0.0
    }
}

pub fn score(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> Result<f64, FactorError> {
    let win_pct = ctx
        .form()
        .and_then(|f| f.win_pct())
        .ok_or(FactorError::Missing("recent_form"))?;

    let mut score = BASE + win_pct_adjustment(win_pct);
    if noise.chance_above(HOT_STREAK_ABOVE) {
        score += STREAK_SWING;
    }
    if noise.chance_above(COLD_STREAK_ABOVE) {
        score -= STREAK_SWING;
    }
    score += noise.jitter(NOISE);

    Ok(score.clamp(RANGE.0, RANGE.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::testing::*;
    use diamondline_core::noise::{MidpointNoise, SequenceNoise};
    use diamondline_core::stats::RecentForm;

    #[test]
    fn win_pct_bands() {
        assert_eq!(win_pct_adjustment(0.8), 10.0);
        assert_eq!(win_pct_adjustment(0.7), 10.0);
        assert_eq!(win_pct_adjustment(0.6), 6.0);
        assert_eq!(win_pct_adjustment(0.5), 0.0);
        assert_eq!(win_pct_adjustment(0.4), -6.0);
        assert_eq!(win_pct_adjustment(0.2), -10.0);
    }

    #[test]
    fn midpoint_draws_trigger_no_streaks() {
        let mut stats = average_matchup();
        stats.home_form = Some(RecentForm { wins: 6, games: 10 });
        let score = score(&home_pick(&stats), &mut MidpointNoise).unwrap();
        assert_eq!(score, BASE + 6.0);
    }

    #[test]
    fn hot_streak_only() {
        let stats = average_matchup();
        let mut noise = SequenceNoise::new(vec![0.75, 0.5, 0.5]);
        let score = score(&home_pick(&stats), &mut noise).unwrap();
        assert_eq!(score, BASE + 8.0);
    }

    #[test]
    fn hot_and_cold_cancel() {
        let stats = average_matchup();
        let mut noise = SequenceNoise::new(vec![0.9, 0.9, 0.5]);
        let score = score(&home_pick(&stats), &mut noise).unwrap();
        assert_eq!(score, BASE);
    }

    #[test]
    fn empty_window_is_missing_form() {
        let mut stats = average_matchup();
        stats.away_form = Some(RecentForm { wins: 0, games: 0 });
        let err = score(&away_pick(&stats), &mut MidpointNoise).unwrap_err();
        assert_eq!(err, FactorError::Missing("recent_form"));
    }
}
