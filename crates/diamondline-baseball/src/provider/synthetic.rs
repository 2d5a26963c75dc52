// Randomized stat generator: plausible league-range numbers for any team.
// Stands in for a real stats feed when no team statistics file is configured.

use super::{ProviderError, StatProvider};
use async_trait::async_trait;
use diamondline_core::noise::Noise;
use diamondline_core::stats::{Handedness, RecentForm, TeamStatistics, Weather};
use tokio::sync::Mutex;

/// Games in the recent-form window.
pub const FORM_WINDOW: u32 = 10;

pub struct SyntheticStatProvider {
    noise: Mutex<Box<dyn Noise + Send>>,
}

impl SyntheticStatProvider {
    pub fn new(noise: Box<dyn Noise + Send>) -> Self {
        SyntheticStatProvider {
            noise: Mutex::new(noise),
        }
    }
}

/// One team's season line drawn from typical league ranges.
pub fn random_team_statistics(noise: &mut dyn Noise) -> TeamStatistics {
    TeamStatistics {
        batting_avg: Some(noise.uniform(0.220, 0.290)),
        ops: Some(noise.uniform(0.650, 0.850)),
        era: Some(noise.uniform(3.00, 5.50)),
        whip: Some(noise.uniform(1.05, 1.50)),
        starter_era: Some(noise.uniform(2.50, 6.00)),
        starter_whip: Some(noise.uniform(0.95, 1.60)),
        starter_hand: Some(if noise.chance_above(0.7) {
            Handedness::Left
        } else {
            Handedness::Right
        }),
        xwoba: Some(noise.uniform(0.290, 0.350)),
        barrel_rate: Some(noise.uniform(5.0, 12.0)),
    }
}

pub fn random_recent_form(noise: &mut dyn Noise) -> RecentForm {
    RecentForm {
        wins: noise.index(FORM_WINDOW as usize + 1) as u32,
        games: FORM_WINDOW,
    }
}

pub fn random_weather(noise: &mut dyn Noise) -> Weather {
    Weather {
        temperature_f: noise.uniform(45.0, 95.0),
        wind_mph: noise.uniform(0.0, 25.0),
    }
}

#[async_trait]
impl StatProvider for SyntheticStatProvider {
    async fn team_statistics(
        &self,
        _home: &str,
        _away: &str,
    ) -> Result<(TeamStatistics, TeamStatistics), ProviderError> {
        let mut noise = self.noise.lock().await;
        let home = random_team_statistics(&mut **noise);
        let away = random_team_statistics(&mut **noise);
        Ok((home, away))
    }

    async fn recent_form(
        &self,
        _home: &str,
        _away: &str,
    ) -> Result<(Option<RecentForm>, Option<RecentForm>), ProviderError> {
        let mut noise = self.noise.lock().await;
        let home = random_recent_form(&mut **noise);
        let away = random_recent_form(&mut **noise);
        Ok((Some(home), Some(away)))
    }

    async fn weather(&self, _home_team: &str) -> Result<Option<Weather>, ProviderError> {
        let mut noise = self.noise.lock().await;
        Ok(Some(random_weather(&mut **noise)))
    }
}
