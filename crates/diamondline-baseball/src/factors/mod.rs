// Factor calculators: six independent scores for one side of a matchup.
//
// Each calculator returns `Result` internally. `score_factor` is the only
// public entry point that callers should use, and it never fails: any error
// is logged and replaced by the neutral score.

pub mod market;
pub mod momentum;
pub mod offense;
pub mod pitching;
pub mod situational;
pub mod system;

use diamondline_core::noise::Noise;
use diamondline_core::odds::OddsError;
use diamondline_core::stats::{MatchupStats, RecentForm, TeamStatistics, Weather};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Score substituted for any factor that cannot be computed.
pub const NEUTRAL_SCORE: f64 = 70.0;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum FactorError {
    #[error("missing required stat `{0}`")]
    Missing(&'static str),

    #[error("stat `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("factor produced a non-finite score")]
    NonFiniteScore,

    #[error(transparent)]
    Odds(#[from] OddsError),
}

/// Unwrap a stat the calculator cannot do without.
pub(crate) fn required(value: Option<f64>, field: &'static str) -> Result<f64, FactorError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(FactorError::NonFinite { field, value: v }),
        None => Err(FactorError::Missing(field)),
    }
}

/// Pass through an optional stat, rejecting garbage values.
pub(crate) fn optional(value: Option<f64>, field: &'static str) -> Result<Option<f64>, FactorError> {
    match value {
        Some(v) if !v.is_finite() => Err(FactorError::NonFinite { field, value: v }),
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// Factor kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorKind {
    Offensive,
    Pitching,
    Situational,
    Momentum,
    Market,
    System,
}

impl FactorKind {
    pub const ALL: [FactorKind; 6] = [
        FactorKind::Offensive,
        FactorKind::Pitching,
        FactorKind::Situational,
        FactorKind::Momentum,
        FactorKind::Market,
        FactorKind::System,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::Offensive => "offensive production",
            FactorKind::Pitching => "pitching matchup",
            FactorKind::Situational => "situational edge",
            FactorKind::Momentum => "team momentum",
            FactorKind::Market => "market inefficiency",
            FactorKind::System => "system confidence",
        }
    }

    /// Dashboard naming for the same factor.
    pub fn display_label(&self) -> &'static str {
        match self {
            FactorKind::Offensive => "Field Value",
            FactorKind::Pitching => "Pitching Edge",
            FactorKind::Situational => "Game Context",
            FactorKind::Momentum => "Team Form",
            FactorKind::Market => "Market Value",
            FactorKind::System => "Model Certainty",
        }
    }

    /// Inclusive clamp range of the calculator.
    pub fn range(&self) -> (f64, f64) {
        match self {
            FactorKind::Offensive => offense::RANGE,
            FactorKind::Pitching => pitching::RANGE,
            FactorKind::Situational => situational::RANGE,
            FactorKind::Momentum => momentum::RANGE,
            FactorKind::Market => market::RANGE,
            FactorKind::System => system::RANGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Factor scores
// ---------------------------------------------------------------------------

/// All six factor scores for one side. Every field is always present; a
/// factor that could not be computed holds [`NEUTRAL_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub offensive: f64,
    pub pitching: f64,
    pub situational: f64,
    pub momentum: f64,
    pub market: f64,
    pub system: f64,
}

impl Default for FactorScores {
    fn default() -> Self {
        FactorScores {
            offensive: NEUTRAL_SCORE,
            pitching: NEUTRAL_SCORE,
            situational: NEUTRAL_SCORE,
            momentum: NEUTRAL_SCORE,
            market: NEUTRAL_SCORE,
            system: NEUTRAL_SCORE,
        }
    }
}

impl FactorScores {
    pub fn get(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Offensive => self.offensive,
            FactorKind::Pitching => self.pitching,
            FactorKind::Situational => self.situational,
            FactorKind::Momentum => self.momentum,
            FactorKind::Market => self.market,
            FactorKind::System => self.system,
        }
    }

    pub fn set(&mut self, kind: FactorKind, score: f64) {
        let slot = match kind {
            FactorKind::Offensive => &mut self.offensive,
            FactorKind::Pitching => &mut self.pitching,
            FactorKind::Situational => &mut self.situational,
            FactorKind::Momentum => &mut self.momentum,
            FactorKind::Market => &mut self.market,
            FactorKind::System => &mut self.system,
        };
        *slot = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactorKind, f64)> + '_ {
        FactorKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Scores paired with their dashboard names.
    pub fn labelled(&self) -> Vec<(&'static str, f64)> {
        self.iter().map(|(k, s)| (k.display_label(), s)).collect()
    }
}

// ---------------------------------------------------------------------------
// Pick context
// ---------------------------------------------------------------------------

/// One side of one game, as seen by the calculators.
#[derive(Debug, Clone, Copy)]
pub struct PickContext<'a> {
    pub team: &'a str,
    pub opponent: &'a str,
    pub home_team: &'a str,
    pub is_home: bool,
    /// American moneyline price of the picked side.
    pub price: i32,
    pub stats: &'a MatchupStats,
}

impl<'a> PickContext<'a> {
    pub fn pick_stats(&self) -> &'a TeamStatistics {
        self.stats.sides(self.is_home).0
    }

    pub fn opponent_stats(&self) -> &'a TeamStatistics {
        self.stats.sides(self.is_home).1
    }

    pub fn form(&self) -> Option<&'a RecentForm> {
        self.stats.form(self.is_home)
    }

    pub fn weather(&self) -> Option<&'a Weather> {
        self.stats.weather.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Fail-soft entry points
// ---------------------------------------------------------------------------

/// Run one calculator. Never fails: errors yield [`NEUTRAL_SCORE`].
pub fn score_factor(kind: FactorKind, ctx: &PickContext<'_>, noise: &mut dyn Noise) -> f64 {
    let result = match kind {
        FactorKind::Offensive => offense::score(ctx, noise),
        FactorKind::Pitching => pitching::score(ctx, noise),
        FactorKind::Situational => situational::score(ctx, noise),
        FactorKind::Momentum => momentum::score(ctx, noise),
        FactorKind::Market => market::score(ctx, noise),
        FactorKind::System => system::score(ctx, noise),
    }
    .and_then(|s| {
        if s.is_finite() {
            Ok(s)
        } else {
            Err(FactorError::NonFiniteScore)
        }
    });

    match result {
        Ok(score) => score,
        Err(e) => {
            warn!(
                "{} for {}: {}; using neutral score {}",
                kind.label(),
                ctx.team,
                e,
                NEUTRAL_SCORE
            );
            NEUTRAL_SCORE
        }
    }
}

/// Run all six calculators in a fixed order.
pub fn score_all(ctx: &PickContext<'_>, noise: &mut dyn Noise) -> FactorScores {
    let mut scores = FactorScores::default();
    for kind in FactorKind::ALL {
        scores.set(kind, score_factor(kind, ctx, noise));
    }
    scores
}

// ---------------------------------------------------------------------------
// Shared test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use diamondline_core::noise::SeededNoise;

    /// League-average stats for both sides, no weather.
    pub fn average_matchup() -> MatchupStats {
        let team = TeamStatistics {
            batting_avg: Some(0.250),
            ops: Some(0.730),
            era: Some(4.20),
            whip: Some(1.30),
            ..Default::default()
        };
        MatchupStats {
            home: team.clone(),
            away: team,
            home_form: Some(RecentForm { wins: 5, games: 10 }),
            away_form: Some(RecentForm { wins: 5, games: 10 }),
            weather: None,
        }
    }

    pub fn home_pick(stats: &MatchupStats) -> PickContext<'_> {
        PickContext {
            team: "Yankees",
            opponent: "Red Sox",
            home_team: "Yankees",
            is_home: true,
            price: -150,
            stats,
        }
    }

    pub fn away_pick(stats: &MatchupStats) -> PickContext<'_> {
        PickContext {
            team: "Red Sox",
            opponent: "Yankees",
            home_team: "Yankees",
            is_home: false,
            price: 130,
            stats,
        }
    }

    /// Randomized stat lines, including band-boundary values, for range sweeps.
    pub fn random_matchup(noise: &mut SeededNoise) -> MatchupStats {
        let pick = |noise: &mut SeededNoise, options: &[f64]| options[noise.index(options.len())];
        let team = |noise: &mut SeededNoise| TeamStatistics {
            batting_avg: Some(pick(noise, &[0.200, 0.240, 0.265, 0.280, 0.281, 0.320])),
            ops: Some(pick(noise, &[0.600, 0.700, 0.760, 0.820, 0.821, 0.950])),
            era: Some(pick(noise, &[2.10, 3.50, 4.00, 4.50, 5.00, 6.80])),
            whip: Some(pick(noise, &[0.95, 1.20, 1.40, 1.65])),
            starter_era: Some(pick(noise, &[1.80, 3.00, 4.50, 7.20])),
            starter_whip: None,
            starter_hand: None,
            xwoba: Some(pick(noise, &[0.280, 0.300, 0.340, 0.380])),
            barrel_rate: Some(pick(noise, &[4.0, 6.0, 8.0, 10.0, 14.0])),
        };
        let home = team(noise);
        let away = team(noise);
        let wins = noise.index(11) as u32;
        MatchupStats {
            home,
            away,
            home_form: Some(RecentForm { wins, games: 10 }),
            away_form: Some(RecentForm { wins: 10 - wins, games: 10 }),
            weather: Some(Weather {
                temperature_f: pick(noise, &[38.0, 50.0, 72.0, 85.0, 98.0]),
                wind_mph: pick(noise, &[0.0, 15.0, 16.0, 25.0]),
            }),
        }
    }
}
