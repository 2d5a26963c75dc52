// Odds feed normalization: third-party odds JSON into `Game` records.
//
// The feed is an array of events, each with bookmakers, markets, and
// outcomes. Prices arrive as American or decimal numbers. Anything that
// cannot be understood is skipped with a warning; only an unreadable file
// or a document that is not an array is an error.

use chrono::{DateTime, Utc};
use diamondline_core::odds::{
    decimal_to_american, validate_american, BookmakerQuote, Game, Market, MarketKind, OddsError,
    Outcome,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read odds feed {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid odds feed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("odds feed must be a JSON array of events")]
    NotAnArray,
}

// ---------------------------------------------------------------------------
// Price formats
// ---------------------------------------------------------------------------

/// How the feed encodes prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddsFormat {
    American,
    Decimal,
    /// Whole numbers with magnitude of at least 100 are American; anything
    /// else is decimal.
    #[default]
    Auto,
}

impl OddsFormat {
    /// Convert a raw feed price into an American price.
    pub fn to_american(self, raw: f64) -> Result<i32, OddsError> {
        match self {
            OddsFormat::American => american_from_raw(raw),
            OddsFormat::Decimal => decimal_to_american(raw),
            OddsFormat::Auto => {
                if raw.is_finite() && raw.fract() == 0.0 && raw.abs() >= 100.0 {
                    american_from_raw(raw)
                } else {
                    decimal_to_american(raw)
                }
            }
        }
    }
}

fn american_from_raw(raw: f64) -> Result<i32, OddsError> {
    if !raw.is_finite() {
        return Err(OddsError::InvalidAmerican(0));
    }
    // `as` saturates, so absurd magnitudes stay absurd rather than wrapping.
    validate_american(raw.round() as i32)
}

// ---------------------------------------------------------------------------
// Raw feed structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    home_team: String,
    away_team: String,
    commence_time: DateTime<Utc>,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
}

#[derive(Debug, Deserialize)]
struct RawBookmaker {
    key: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    markets: Vec<RawMarket>,
}

#[derive(Debug, Deserialize)]
struct RawMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Deserialize)]
struct RawOutcome {
    name: String,
    price: f64,
    #[serde(default)]
    point: Option<f64>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim and collapse internal whitespace: `"  New   York Yankees "` becomes
/// `"New York Yankees"`.
pub fn normalize_team_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_market(raw: RawMarket, format: OddsFormat, event_id: &str) -> Market {
    let kind = MarketKind::from_key(raw.key.trim());
    let outcomes = raw
        .outcomes
        .into_iter()
        .filter_map(|o| match format.to_american(o.price) {
            Ok(price) => Some(Outcome {
                name: normalize_team_name(&o.name),
                price,
                point: o.point.filter(|p| p.is_finite()),
            }),
            Err(e) => {
                warn!("event {}: skipping outcome '{}' in {}: {}", event_id, o.name, raw.key, e);
                None
            }
        })
        .collect();
    Market { kind, outcomes }
}

fn normalize_event(raw: RawEvent, format: OddsFormat) -> Option<Game> {
    let home_team = normalize_team_name(&raw.home_team);
    let away_team = normalize_team_name(&raw.away_team);
    if raw.id.trim().is_empty() || home_team.is_empty() || away_team.is_empty() {
        warn!("skipping event with missing id or team names: {:?}", raw.id);
        return None;
    }

    let bookmakers = raw
        .bookmakers
        .into_iter()
        .map(|b| BookmakerQuote {
            bookmaker: b.title.filter(|t| !t.trim().is_empty()).unwrap_or(b.key),
            markets: b
                .markets
                .into_iter()
                .map(|m| normalize_market(m, format, &raw.id))
                .collect(),
        })
        .collect();

    Some(Game {
        id: raw.id,
        home_team,
        away_team,
        commence_time: raw.commence_time,
        bookmakers,
    })
}

/// Parse an odds feed document. Malformed events are skipped.
pub fn parse_games(json: &str, format: OddsFormat) -> Result<Vec<Game>, FeedError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(events) = doc else {
        return Err(FeedError::NotAnArray);
    };

    let mut games = Vec::with_capacity(events.len());
    for (i, event) in events.into_iter().enumerate() {
        match serde_json::from_value::<RawEvent>(event) {
            Ok(raw) => {
                if let Some(game) = normalize_event(raw, format) {
                    games.push(game);
                }
            }
            Err(e) => warn!("skipping malformed event #{}: {}", i, e),
        }
    }
    debug!("parsed {} games from odds feed", games.len());
    Ok(games)
}

/// Read and parse an odds feed file.
pub fn load_games(path: &Path, format: OddsFormat) -> Result<Vec<Game>, FeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let games = parse_games(&text, format)?;
    info!("loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
      {
        "id": "g1",
        "sport_key": "baseball_mlb",
        "commence_time": "2024-06-01T23:05:00Z",
        "home_team": "New York  Yankees",
        "away_team": "Boston Red Sox",
        "bookmakers": [
          {
            "key": "draftkings",
            "title": "DraftKings",
            "markets": [
              {"key": "h2h", "outcomes": [
                {"name": "New York Yankees", "price": -150},
                {"name": "Boston Red Sox", "price": 130}
              ]},
              {"key": "totals", "outcomes": [
                {"name": "Over", "price": -110, "point": 8.5},
                {"name": "Under", "price": -110, "point": 8.5}
              ]}
            ]
          }
        ]
      },
      {"id": "broken", "home_team": "Mets"},
      {
        "id": "g2",
        "commence_time": "2024-06-01T20:10:00Z",
        "home_team": "Chicago Cubs",
        "away_team": "St. Louis Cardinals",
        "bookmakers": [
          {"key": "fanduel", "markets": [
            {"key": "h2h", "outcomes": [
              {"name": "Chicago Cubs", "price": 2.3},
              {"name": "St. Louis Cardinals", "price": 1.65},
              {"name": "Draw", "price": 0.5}
            ]}
          ]}
        ]
      }
    ]"#;

    #[test]
    fn normalize_names() {
        assert_eq!(normalize_team_name("  New   York\tYankees "), "New York Yankees");
        assert_eq!(normalize_team_name(""), "");
    }

    #[test]
    fn auto_format_detection() {
        assert_eq!(OddsFormat::Auto.to_american(-150.0), Ok(-150));
        assert_eq!(OddsFormat::Auto.to_american(130.0), Ok(130));
        assert_eq!(OddsFormat::Auto.to_american(2.5), Ok(150));
        assert_eq!(OddsFormat::Auto.to_american(1.5), Ok(-200));
        assert!(OddsFormat::Auto.to_american(0.5).is_err());
        assert!(OddsFormat::American.to_american(2.5).is_err());
        assert!(OddsFormat::American.to_american(f64::NAN).is_err());
    }

    #[test]
    fn parses_feed_and_skips_broken_events() {
        let games = parse_games(FEED, OddsFormat::Auto).unwrap();
        assert_eq!(games.len(), 2);

        let g1 = &games[0];
        assert_eq!(g1.home_team, "New York Yankees");
        assert_eq!(g1.first_bookmaker(), Some("DraftKings"));
        let ml = g1.first_moneyline().unwrap();
        assert_eq!((ml.home, ml.away), (-150, 130));
        assert_eq!(g1.bookmakers[0].markets[1].kind, MarketKind::Total);
        assert_eq!(g1.bookmakers[0].markets[1].outcomes[0].point, Some(8.5));

        let g2 = &games[1];
        assert_eq!(g2.first_bookmaker(), Some("fanduel"));
        let outcomes = &g2.bookmakers[0].markets[0].outcomes;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].price, 130);
        assert_eq!(outcomes[1].price, -154);
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(matches!(
            parse_games(r#"{"events": []}"#, OddsFormat::Auto),
            Err(FeedError::NotAnArray)
        ));
        assert!(matches!(parse_games("not json", OddsFormat::Auto), Err(FeedError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_games(Path::new("/nonexistent/games.json"), OddsFormat::Auto).unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }
}
