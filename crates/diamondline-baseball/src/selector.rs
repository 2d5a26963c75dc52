// Recommendation selector: runs the factor -> confidence -> grade pipeline for
// both sides of each game, keeps the better side, then filters and ranks the
// batch.
//
// Failure policy, smallest unit first: a factor falls back to neutral (see
// `factors`), a side that cannot be analyzed yields nothing, a game without
// a usable moneyline is skipped, and a batch that cannot run at all returns
// an empty list. Nothing here panics or returns an error to the caller.

use crate::confidence::{aggregate, to_percent};
use crate::factors::{score_all, FactorScores, PickContext};
use crate::narrative::generate_narrative;
use crate::provider::{fetch_matchup, StatProvider};
use crate::reasoning::{generate_reasoning, DEFAULT_SALIENCE};
use chrono::{DateTime, Utc};
use diamondline_core::config::{validate_weights, Config, FactorWeights};
use diamondline_core::grade::{Grade, GradeLadder};
use diamondline_core::noise::{Noise, SeededNoise};
use diamondline_core::odds::{validate_american, Game, OddsError};
use diamondline_core::stats::MatchupStats;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, error, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("game {game_id} has no moneyline from its first bookmaker")]
    NoMoneyline { game_id: String },

    #[error("unusable price for {team}: {source}")]
    InvalidPrice { team: String, source: OddsError },

    #[error("confidence for {team} is not finite")]
    NonFiniteConfidence { team: String },

    #[error("neither side of game {game_id} could be analyzed")]
    NoViableSide { game_id: String },
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn is_home(&self) -> bool {
        matches!(self, Side::Home)
    }
}

/// One graded moneyline pick. Built once per analysis and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub game_id: String,
    pub selection: String,
    pub opponent: String,
    pub is_home: bool,
    /// American price of the selection.
    pub odds: i32,
    pub bookmaker: String,
    pub grade: Grade,
    /// Whole-percent confidence, 60-95 in practice.
    pub confidence: u8,
    pub reasoning: String,
    pub factors: FactorScores,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
}

/// One analyzed side together with its unrounded confidence, which is what
/// side selection compares.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedSide {
    pub recommendation: Recommendation,
    pub confidence: f64,
}

/// The better of two sides: higher grade rank, then higher unrounded
/// confidence, then the home side.
pub fn choose_side(home: GradedSide, away: GradedSide) -> GradedSide {
    let away_better = away
        .recommendation
        .grade
        .rank()
        .cmp(&home.recommendation.grade.rank())
        .then(away.confidence.total_cmp(&home.confidence))
        == Ordering::Greater;
    if away_better {
        away
    } else {
        home
    }
}

/// Drop picks graded below `min_grade` and order the rest by grade rank, then
/// confidence, both descending. Equal picks keep their input order.
pub fn rank_recommendations(mut recs: Vec<Recommendation>, min_grade: Grade) -> Vec<Recommendation> {
    recs.retain(|r| r.grade.rank() >= min_grade.rank());
    recs.sort_by(|a, b| {
        b.grade
            .rank()
            .cmp(&a.grade.rank())
            .then(b.confidence.cmp(&a.confidence))
    });
    recs
}

// ---------------------------------------------------------------------------
// Grading engine
// ---------------------------------------------------------------------------

/// How the reasoning text is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReasoningStyle {
    /// Deterministic sentence listing factors at or above `salience`.
    Templated { salience: f64 },
    /// Randomized narrative drawn from the text noise source.
    Narrative,
}

impl Default for ReasoningStyle {
    fn default() -> Self {
        ReasoningStyle::Templated {
            salience: DEFAULT_SALIENCE,
        }
    }
}

pub struct GradingEngine {
    weights: FactorWeights,
    ladder: GradeLadder,
    min_grade: Grade,
    style: ReasoningStyle,
    /// Feeds the factor calculators.
    score_noise: Box<dyn Noise + Send>,
    /// Feeds narrative template choice only.
    text_noise: Box<dyn Noise + Send>,
}

impl GradingEngine {
    /// Engine with the given weights and scoring noise, grading on the
    /// confidence ladder with a `C+` floor and templated reasoning.
    pub fn with_weights(weights: FactorWeights, score_noise: Box<dyn Noise + Send>) -> Self {
        GradingEngine {
            weights,
            ladder: GradeLadder::Confidence,
            min_grade: Grade::CPlus,
            style: ReasoningStyle::default(),
            score_noise,
            text_noise: Box::new(SeededNoise::from_entropy()),
        }
    }

    /// Engine set up from a loaded configuration. Narrative text noise is
    /// seeded alongside the scoring noise when the configuration pins a seed.
    pub fn from_config(config: &Config, score_noise: Box<dyn Noise + Send>) -> Self {
        let style = if config.reasoning.narrative {
            ReasoningStyle::Narrative
        } else {
            ReasoningStyle::Templated {
                salience: config.reasoning.salience_threshold,
            }
        };
        let text_noise: Box<dyn Noise + Send> = match config.noise_seed {
            Some(seed) => Box::new(SeededNoise::seeded(seed.wrapping_add(1))),
            None => Box::new(SeededNoise::from_entropy()),
        };
        GradingEngine::with_weights(config.weights, score_noise)
            .with_ladder(config.grading.ladder)
            .with_min_grade(config.grading.min_grade)
            .with_reasoning(style)
            .with_text_noise(text_noise)
    }

    pub fn with_ladder(mut self, ladder: GradeLadder) -> Self {
        self.ladder = ladder;
        self
    }

    pub fn with_min_grade(mut self, min_grade: Grade) -> Self {
        self.min_grade = min_grade;
        self
    }

    pub fn with_reasoning(mut self, style: ReasoningStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_text_noise(mut self, text_noise: Box<dyn Noise + Send>) -> Self {
        self.text_noise = text_noise;
        self
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn min_grade(&self) -> Grade {
        self.min_grade
    }

    /// Run the full pipeline for one side at the given price.
    pub fn analyze_side(
        &mut self,
        game: &Game,
        stats: &MatchupStats,
        side: Side,
        price: i32,
    ) -> Result<Recommendation, AnalysisError> {
        self.grade_side(game, stats, side, price)
            .map(|graded| graded.recommendation)
    }

    /// Like [`analyze_side`](Self::analyze_side), keeping the unrounded
    /// confidence alongside the recommendation.
    pub fn grade_side(
        &mut self,
        game: &Game,
        stats: &MatchupStats,
        side: Side,
        price: i32,
    ) -> Result<GradedSide, AnalysisError> {
        let is_home = side.is_home();
        let (team, opponent) = if is_home {
            (&game.home_team, &game.away_team)
        } else {
            (&game.away_team, &game.home_team)
        };
        let price = validate_american(price).map_err(|source| AnalysisError::InvalidPrice {
            team: team.clone(),
            source,
        })?;

        let ctx = PickContext {
            team,
            opponent,
            home_team: &game.home_team,
            is_home,
            price,
            stats,
        };
        let factors = score_all(&ctx, &mut *self.score_noise);
        let confidence = aggregate(&factors, &self.weights);
        if !confidence.is_finite() {
            return Err(AnalysisError::NonFiniteConfidence { team: team.clone() });
        }
        let grade = self.ladder.grade(confidence);

        let reasoning = match self.style {
            ReasoningStyle::Templated { salience } => {
                generate_reasoning(team, is_home, grade, &factors, salience)
            }
            ReasoningStyle::Narrative => {
                generate_narrative(&ctx, grade, &factors, &mut *self.text_noise)
            }
        };

        let recommendation = Recommendation {
            game_id: game.id.clone(),
            selection: team.clone(),
            opponent: opponent.clone(),
            is_home,
            odds: price,
            bookmaker: game.first_bookmaker().unwrap_or_default().to_string(),
            grade,
            confidence: to_percent(confidence),
            reasoning,
            factors,
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            commence_time: game.commence_time,
        };
        Ok(GradedSide {
            recommendation,
            confidence,
        })
    }

    /// Analyze both sides of a game and keep the better one.
    pub fn try_analyze_game(
        &mut self,
        game: &Game,
        stats: &MatchupStats,
    ) -> Result<Recommendation, AnalysisError> {
        let prices = game.first_moneyline().ok_or_else(|| AnalysisError::NoMoneyline {
            game_id: game.id.clone(),
        })?;

        let side = |engine: &mut Self, side: Side, price: i32| {
            engine
                .grade_side(game, stats, side, price)
                .map_err(|e| warn!("game {}: {}", game.id, e))
                .ok()
        };
        let home = side(self, Side::Home, prices.home);
        let away = side(self, Side::Away, prices.away);

        match (home, away) {
            (Some(h), Some(a)) => Ok(choose_side(h, a).recommendation),
            (Some(only), None) | (None, Some(only)) => Ok(only.recommendation),
            (None, None) => Err(AnalysisError::NoViableSide {
                game_id: game.id.clone(),
            }),
        }
    }

    /// Soft-failing form of [`try_analyze_game`](Self::try_analyze_game).
    pub fn analyze_game(&mut self, game: &Game, stats: &MatchupStats) -> Option<Recommendation> {
        match self.try_analyze_game(game, stats) {
            Ok(rec) => {
                debug!(
                    "{} @ {}: {} {} ({}%)",
                    game.away_team, game.home_team, rec.selection, rec.grade, rec.confidence
                );
                Some(rec)
            }
            Err(e) => {
                warn!("skipping game: {}", e);
                None
            }
        }
    }

    /// Apply the minimum-grade filter and sort order.
    pub fn rank(&self, recs: Vec<Recommendation>) -> Vec<Recommendation> {
        rank_recommendations(recs, self.min_grade)
    }

    fn weights_usable(&self) -> bool {
        match validate_weights("active", &self.weights) {
            Ok(()) => true,
            Err(e) => {
                error!("cannot grade batch: {}", e);
                false
            }
        }
    }

    /// Grade games whose statistics are already in hand.
    pub fn recommend_with_stats(&mut self, matchups: &[(Game, MatchupStats)]) -> Vec<Recommendation> {
        if !self.weights_usable() {
            return Vec::new();
        }
        let recs = matchups
            .iter()
            .filter_map(|(game, stats)| self.analyze_game(game, stats))
            .collect();
        self.rank(recs)
    }

    /// Fetch statistics for every gradeable game concurrently, then grade them
    /// in input order.
    pub async fn recommend(&mut self, games: &[Game], provider: &dyn StatProvider) -> Vec<Recommendation> {
        if !self.weights_usable() {
            return Vec::new();
        }

        let eligible: Vec<&Game> = games
            .iter()
            .filter(|g| {
                let ok = g.first_moneyline().is_some();
                if !ok {
                    warn!("skipping game {}: no moneyline from its first bookmaker", g.id);
                }
                ok
            })
            .collect();

        let stats = join_all(
            eligible
                .iter()
                .map(|g| fetch_matchup(provider, &g.home_team, &g.away_team)),
        )
        .await;

        let recs: Vec<Recommendation> = eligible
            .iter()
            .zip(stats.iter())
            .filter_map(|(game, stats)| self.analyze_game(game, stats))
            .collect();
        let ranked = self.rank(recs);
        info!(
            "graded {} of {} games, {} at or above {}",
            eligible.len(),
            games.len(),
            ranked.len(),
            self.min_grade
        );
        ranked
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
