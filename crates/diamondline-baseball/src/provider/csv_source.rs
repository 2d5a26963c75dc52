// Team statistics loaded from a CSV file.
//
// One row per team. Every stat column may be blank; `wins`/`games` are read
// together and dropped unless both are present.

use super::{ProviderError, StatProvider, StaticStatProvider, TeamRecord};
use async_trait::async_trait;
use diamondline_core::stats::{Handedness, RecentForm, TeamStatistics, Weather};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RawTeamRow {
    team: String,
    #[serde(default)]
    batting_avg: Option<f64>,
    #[serde(default)]
    ops: Option<f64>,
    #[serde(default)]
    era: Option<f64>,
    #[serde(default)]
    whip: Option<f64>,
    #[serde(default)]
    starter_era: Option<f64>,
    #[serde(default)]
    starter_whip: Option<f64>,
    #[serde(default)]
    starter_hand: Option<String>,
    #[serde(default)]
    xwoba: Option<f64>,
    #[serde(default)]
    barrel_rate: Option<f64>,
    #[serde(default)]
    wins: Option<u32>,
    #[serde(default)]
    games: Option<u32>,
}

/// Keep finite values only; a NaN in a stats file is a blank, not a number.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl RawTeamRow {
    fn into_record(self) -> Option<(String, TeamRecord)> {
        let team = self.team.trim().to_string();
        if team.is_empty() {
            warn!("skipping team row with empty name");
            return None;
        }

        let starter_hand = match self.starter_hand.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = Handedness::parse(raw);
                if parsed.is_none() {
                    warn!("team '{}': unknown starter_hand '{}', ignoring", team, raw);
                }
                parsed
            }
        };

        let form = match (self.wins, self.games) {
            (Some(wins), Some(games)) if wins <= games => Some(RecentForm { wins, games }),
            (Some(wins), Some(games)) => {
                warn!("team '{}': wins {} exceed games {}, ignoring form", team, wins, games);
                None
            }
            _ => None,
        };

        let stats = TeamStatistics {
            batting_avg: finite(self.batting_avg),
            ops: finite(self.ops),
            era: finite(self.era),
            whip: finite(self.whip),
            starter_era: finite(self.starter_era),
            starter_whip: finite(self.starter_whip),
            starter_hand,
            xwoba: finite(self.xwoba),
            barrel_rate: finite(self.barrel_rate),
        };
        Some((team, TeamRecord { stats, form }))
    }
}

fn load_from_reader<R: Read>(rdr: R) -> Result<StaticStatProvider, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut teams = StaticStatProvider::new();
    for result in reader.deserialize::<RawTeamRow>() {
        match result {
            Ok(raw) => {
                if let Some((team, record)) = raw.into_record() {
                    teams.insert(&team, record);
                }
            }
            Err(e) => {
                warn!("skipping malformed team row: {}", e);
            }
        }
    }
    Ok(teams)
}

/// Serves statistics read once from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStatProvider {
    teams: StaticStatProvider,
}

impl CsvStatProvider {
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let path_str = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| ProviderError::Io {
            path: path_str.clone(),
            source,
        })?;
        let teams = load_from_reader(file).map_err(|source| ProviderError::Csv {
            path: path_str.clone(),
            source,
        })?;
        info!("loaded statistics for {} teams from {}", teams.len(), path_str);
        Ok(CsvStatProvider { teams })
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, ProviderError> {
        let teams = load_from_reader(rdr).map_err(|source| ProviderError::Csv {
            path: "<reader>".into(),
            source,
        })?;
        Ok(CsvStatProvider { teams })
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

#[async_trait]
impl StatProvider for CsvStatProvider {
    async fn team_statistics(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(TeamStatistics, TeamStatistics), ProviderError> {
        self.teams.team_statistics(home, away).await
    }

    async fn recent_form(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(Option<RecentForm>, Option<RecentForm>), ProviderError> {
        self.teams.recent_form(home, away).await
    }

    /// Stats files carry no weather.
    async fn weather(&self, _home_team: &str) -> Result<Option<Weather>, ProviderError> {
        Ok(None)
    }
}
