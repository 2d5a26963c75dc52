// Team statistics snapshots consumed by the factor calculators.
//
// Every field is optional: providers fill what they have, and each
// calculator decides which fields it cannot do without.

use serde::{Deserialize, Serialize};

/// Throwing hand of a starting pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left-handed",
            Handedness::Right => "right-handed",
        }
    }

    /// Parse `L`/`R` (or the full word), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LEFT" | "LHP" => Some(Handedness::Left),
            "R" | "RIGHT" | "RHP" => Some(Handedness::Right),
            _ => None,
        }
    }
}

/// Season statistics for one team, valid for a single analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub batting_avg: Option<f64>,
    pub ops: Option<f64>,
    pub era: Option<f64>,
    pub whip: Option<f64>,
    pub starter_era: Option<f64>,
    pub starter_whip: Option<f64>,
    pub starter_hand: Option<Handedness>,
    /// Expected weighted on-base average.
    pub xwoba: Option<f64>,
    /// Barrels per batted-ball event, as a percentage (e.g. `8.5`).
    pub barrel_rate: Option<f64>,
}

/// Recent results for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    pub wins: u32,
    pub games: u32,
}

impl RecentForm {
    /// Win percentage over the recent window, `None` with no games played.
    pub fn win_pct(&self) -> Option<f64> {
        if self.games == 0 {
            return None;
        }
        Some(self.wins as f64 / self.games as f64)
    }
}

/// Game-time weather at the home team's venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature_f: f64,
    pub wind_mph: f64,
}

/// Everything known about a matchup, keyed by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub home: TeamStatistics,
    pub away: TeamStatistics,
    pub home_form: Option<RecentForm>,
    pub away_form: Option<RecentForm>,
    pub weather: Option<Weather>,
}

impl MatchupStats {
    /// Statistics for the picked side and its opponent.
    pub fn sides(&self, pick_is_home: bool) -> (&TeamStatistics, &TeamStatistics) {
        if pick_is_home {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        }
    }

    pub fn form(&self, pick_is_home: bool) -> Option<&RecentForm> {
        if pick_is_home {
            self.home_form.as_ref()
        } else {
            self.away_form.as_ref()
        }
    }
}
