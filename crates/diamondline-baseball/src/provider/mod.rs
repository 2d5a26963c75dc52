// Stat providers: where team statistics, recent form, and weather come from.
//
// The three lookups for a matchup are independent, so `fetch_matchup` runs
// them concurrently and degrades any failed one to an empty snapshot.

pub mod csv_source;
pub mod synthetic;

pub use csv_source::CsvStatProvider;
pub use synthetic::SyntheticStatProvider;

use crate::feed::normalize_team_name;
use async_trait::async_trait;
use diamondline_core::stats::{MatchupStats, RecentForm, TeamStatistics, Weather};
use std::collections::BTreeMap;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("stat source unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Supplies the inputs the factor calculators read.
#[async_trait]
pub trait StatProvider: Send + Sync {
    /// Season statistics for `(home, away)`.
    async fn team_statistics(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(TeamStatistics, TeamStatistics), ProviderError>;

    /// Recent form for `(home, away)`. `None` when a side is unknown.
    async fn recent_form(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(Option<RecentForm>, Option<RecentForm>), ProviderError>;

    /// Game-time weather at the home team's venue, when known.
    async fn weather(&self, home_team: &str) -> Result<Option<Weather>, ProviderError>;
}

/// Fan out the three lookups for one matchup. Never fails: a lookup that
/// errors is logged and left empty.
pub async fn fetch_matchup(provider: &dyn StatProvider, home: &str, away: &str) -> MatchupStats {
    let (stats, form, weather) = tokio::join!(
        provider.team_statistics(home, away),
        provider.recent_form(home, away),
        provider.weather(home),
    );

    let mut matchup = MatchupStats::default();
    match stats {
        Ok((h, a)) => {
            matchup.home = h;
            matchup.away = a;
        }
        Err(e) => warn!("team statistics for {} vs {}: {}; using empty stats", away, home, e),
    }
    match form {
        Ok((h, a)) => {
            matchup.home_form = h;
            matchup.away_form = a;
        }
        Err(e) => warn!("recent form for {} vs {}: {}; using no form", away, home, e),
    }
    match weather {
        Ok(w) => matchup.weather = w,
        Err(e) => warn!("weather for {}: {}; assuming none", home, e),
    }
    debug!("fetched matchup stats for {} @ {}", away, home);
    matchup
}

// ---------------------------------------------------------------------------
// In-memory provider
// ---------------------------------------------------------------------------

/// Everything stored about one team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRecord {
    pub stats: TeamStatistics,
    pub form: Option<RecentForm>,
}

/// Lookup key for a team: normalized and lowercased.
pub fn team_key(team: &str) -> String {
    normalize_team_name(team).to_lowercase()
}

/// Serves statistics held in memory. Team names match exactly (ignoring case
/// and spacing) or by trailing nickname, so "New York Yankees" finds a record
/// stored as "Yankees" and the reverse.
#[derive(Debug, Clone, Default)]
pub struct StaticStatProvider {
    teams: BTreeMap<String, TeamRecord>,
    weather: BTreeMap<String, Weather>,
}

impl StaticStatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: &str, stats: TeamStatistics, form: Option<RecentForm>) -> Self {
        self.insert(team, TeamRecord { stats, form });
        self
    }

    pub fn with_weather(mut self, home_team: &str, weather: Weather) -> Self {
        self.weather.insert(team_key(home_team), weather);
        self
    }

    pub fn insert(&mut self, team: &str, record: TeamRecord) {
        self.teams.insert(team_key(team), record);
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    fn find<'a, V>(map: &'a BTreeMap<String, V>, team: &str) -> Option<&'a V> {
        let key = team_key(team);
        if let Some(v) = map.get(&key) {
            return Some(v);
        }
        map.iter()
            .find(|(k, _)| {
                key.ends_with(&format!(" {k}")) || k.ends_with(&format!(" {key}"))
            })
            .map(|(_, v)| v)
    }

    pub fn record(&self, team: &str) -> Option<&TeamRecord> {
        Self::find(&self.teams, team)
    }

    fn stats_or_default(&self, team: &str) -> TeamStatistics {
        match self.record(team) {
            Some(r) => r.stats.clone(),
            None => {
                warn!("no statistics for {}; using empty stats", team);
                TeamStatistics::default()
            }
        }
    }
}

#[async_trait]
impl StatProvider for StaticStatProvider {
    async fn team_statistics(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(TeamStatistics, TeamStatistics), ProviderError> {
        Ok((self.stats_or_default(home), self.stats_or_default(away)))
    }

    async fn recent_form(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(Option<RecentForm>, Option<RecentForm>), ProviderError> {
        let form = |team: &str| self.record(team).and_then(|r| r.form);
        Ok((form(home), form(away)))
    }

    async fn weather(&self, home_team: &str) -> Result<Option<Weather>, ProviderError> {
        Ok(Self::find(&self.weather, home_team).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyProvider;

    #[async_trait]
    impl StatProvider for FlakyProvider {
        async fn team_statistics(
            &self,
            _home: &str,
            _away: &str,
        ) -> Result<(TeamStatistics, TeamStatistics), ProviderError> {
            Err(ProviderError::Unavailable("stats feed down".into()))
        }

        async fn recent_form(
            &self,
            _home: &str,
            _away: &str,
        ) -> Result<(Option<RecentForm>, Option<RecentForm>), ProviderError> {
            Ok((Some(RecentForm { wins: 7, games: 10 }), None))
        }

        async fn weather(&self, _home_team: &str) -> Result<Option<Weather>, ProviderError> {
            Err(ProviderError::Unavailable("weather feed down".into()))
        }
    }

    fn make_provider() -> StaticStatProvider {
        StaticStatProvider::new()
            .with_team(
                "Yankees",
                TeamStatistics {
                    era: Some(3.40),
                    ops: Some(0.830),
                    ..Default::default()
                },
                Some(RecentForm { wins: 6, games: 10 }),
            )
            .with_team("Boston Red Sox", TeamStatistics::default(), None)
            .with_weather("New York Yankees", Weather { temperature_f: 72.0, wind_mph: 8.0 })
    }

    #[test]
    fn team_key_normalizes() {
        assert_eq!(team_key("  New   York Yankees "), "new york yankees");
    }

    #[test]
    fn lookup_by_nickname_both_ways() {
        let provider = make_provider();
        assert!(provider.record("New York Yankees").is_some());
        assert!(provider.record("red sox").is_some());
        assert!(provider.record("Chicago White Sox").is_none());
        assert_eq!(provider.len(), 2);
    }

    #[tokio::test]
    async fn fetch_matchup_from_static_provider() {
        let provider = make_provider();
        let stats = fetch_matchup(&provider, "New York Yankees", "Boston Red Sox").await;
        assert_eq!(stats.home.era, Some(3.40));
        assert_eq!(stats.home_form, Some(RecentForm { wins: 6, games: 10 }));
        assert_eq!(stats.away_form, None);
        assert_eq!(stats.weather.map(|w| w.temperature_f), Some(72.0));
    }

    #[tokio::test]
    async fn unknown_teams_get_empty_stats() {
        let provider = make_provider();
        let stats = fetch_matchup(&provider, "Colorado Rockies", "San Diego Padres").await;
        assert_eq!(stats, MatchupStats::default());
    }

    #[tokio::test]
    async fn failed_lookups_degrade_independently() {
        let stats = fetch_matchup(&FlakyProvider, "Mets", "Braves").await;
        assert_eq!(stats.home, TeamStatistics::default());
        assert_eq!(stats.home_form, Some(RecentForm { wins: 7, games: 10 }));
        assert!(stats.weather.is_none());
    }
}
