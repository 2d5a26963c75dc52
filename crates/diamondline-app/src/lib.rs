// Application layer: wires configuration, the odds feed, a stat provider,
// and the grading engine into one batch run, and renders the result.

use anyhow::Context;
use diamondline_baseball::display::{confidence_tier, factor_tone, format_american, format_probability};
use diamondline_baseball::feed::{load_games, OddsFormat};
use diamondline_baseball::provider::{CsvStatProvider, StatProvider, SyntheticStatProvider};
use diamondline_baseball::selector::{GradingEngine, Recommendation};
use diamondline_core::config::Config;
use diamondline_core::noise::{Noise, SeededNoise};
use std::path::Path;
use tracing::info;

/// Offsets keep the scoring, narrative, and synthetic-stat streams apart when
/// a single seed is configured.
const SYNTHETIC_SEED_OFFSET: u64 = 2;

fn noise_from_seed(seed: Option<u64>) -> Box<dyn Noise + Send> {
    match seed {
        Some(seed) => Box::new(SeededNoise::seeded(seed)),
        None => Box::new(SeededNoise::from_entropy()),
    }
}

/// CSV statistics when a file is configured, synthetic ones otherwise.
pub fn build_provider(config: &Config) -> anyhow::Result<Box<dyn StatProvider>> {
    match &config.data_paths.team_stats {
        Some(path) => {
            let provider = CsvStatProvider::load(Path::new(path))
                .with_context(|| format!("failed to load team statistics from {path}"))?;
            info!("Using team statistics from {} ({} teams)", path, provider.team_count());
            Ok(Box::new(provider))
        }
        None => {
            info!("No team statistics configured; using synthetic stats");
            let seed = config.noise_seed.map(|s| s.wrapping_add(SYNTHETIC_SEED_OFFSET));
            Ok(Box::new(SyntheticStatProvider::new(noise_from_seed(seed))))
        }
    }
}

/// Load the configured games, grade them, and return the ranked picks.
pub async fn run(config: &Config) -> anyhow::Result<Vec<Recommendation>> {
    let games_path = Path::new(&config.data_paths.games);
    let games = load_games(games_path, OddsFormat::Auto)
        .with_context(|| format!("failed to load games from {}", games_path.display()))?;

    let provider = build_provider(config)?;
    let mut engine = GradingEngine::from_config(config, noise_from_seed(config.noise_seed));
    let recs = engine.recommend(&games, provider.as_ref()).await;
    info!("{} recommendations from {} games", recs.len(), games.len());
    Ok(recs)
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

/// Fixed-width text report, one block per recommendation.
pub fn render_report(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No recommendations at or above the minimum grade.\n".to_string();
    }

    let mut out = String::with_capacity(256 * recs.len());
    out.push_str(&format!(
        "{:<5} {:<11} {:<28} {:>6} {:>7}  {:<40} {}\n",
        "GRADE", "CONFIDENCE", "PICK", "ODDS", "IMPL", "MATCHUP", "START (UTC)"
    ));
    out.push_str(&format!("{}\n", "-".repeat(120)));

    for rec in recs {
        let pick = format!(
            "{} ({})",
            rec.selection,
            if rec.is_home { "home" } else { "away" }
        );
        let confidence = format!("{}% {}", rec.confidence, confidence_tier(rec.confidence).label());
        let matchup = format!("{} @ {}", rec.away_team, rec.home_team);
        out.push_str(&format!(
            "{:<5} {:<11} {:<28} {:>6} {:>7}  {:<40} {}\n",
            rec.grade.label(),
            confidence,
            pick,
            format_american(rec.odds),
            format_probability(rec.odds),
            matchup,
            rec.commence_time.format("%Y-%m-%d %H:%M"),
        ));

        let factors = rec
            .factors
            .labelled()
            .into_iter()
            .map(|(label, score)| format!("{label} {score:.0} ({})", factor_tone(score).label()))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("      {factors}\n"));
        out.push_str(&format!("      {} [{}]\n\n", rec.reasoning, rec.bookmaker));
    }
    out
}
