// Games, bookmaker quotes, and American-odds arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum OddsError {
    #[error("invalid American price {0}: magnitude must be at least 100")]
    InvalidAmerican(i32),

    #[error("invalid decimal price {0}: must be finite and greater than 1.0")]
    InvalidDecimal(f64),
}

// ---------------------------------------------------------------------------
// Market types
// ---------------------------------------------------------------------------

/// The kind of betting market a bookmaker quote covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketKind {
    /// Outright winner (`h2h` in the odds feed).
    Moneyline,
    Spread,
    Total,
    /// Any market key the pipeline does not interpret.
    Other(String),
}

impl MarketKind {
    /// Map an odds-feed market key onto a market kind.
    pub fn from_key(key: &str) -> Self {
        match key {
            "h2h" => MarketKind::Moneyline,
            "spreads" => MarketKind::Spread,
            "totals" => MarketKind::Total,
            other => MarketKind::Other(other.to_string()),
        }
    }
}

/// A single priced selection inside a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Selection name (a team name for moneylines, "Over"/"Under" for totals).
    pub name: String,
    /// American price.
    pub price: i32,
    /// Handicap or total line, when the market has one.
    pub point: Option<f64>,
}

/// One market quoted by a bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub kind: MarketKind,
    pub outcomes: Vec<Outcome>,
}

/// Everything a single bookmaker quotes for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerQuote {
    pub bookmaker: String,
    pub markets: Vec<Market>,
}

impl BookmakerQuote {
    /// The moneyline market, if this bookmaker quotes one.
    pub fn moneyline(&self) -> Option<&Market> {
        self.markets.iter().find(|m| m.kind == MarketKind::Moneyline)
    }
}

/// A scheduled game with its bookmaker quotes. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub bookmakers: Vec<BookmakerQuote>,
}

/// Home and away moneyline prices pulled from one bookmaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneylinePrices {
    pub home: i32,
    pub away: i32,
}

impl Game {
    /// Moneyline prices from the first bookmaker only.
    ///
    /// Returns `None` when the first bookmaker has no moneyline market or is
    /// missing either team's price. This is not a best-price search.
    pub fn first_moneyline(&self) -> Option<MoneylinePrices> {
        let market = self.bookmakers.first()?.moneyline()?;
        let price_for = |team: &str| {
            market
                .outcomes
                .iter()
                .find(|o| o.name == team)
                .map(|o| o.price)
        };
        Some(MoneylinePrices {
            home: price_for(&self.home_team)?,
            away: price_for(&self.away_team)?,
        })
    }

    /// Name of the first bookmaker, used to label recommendations.
    pub fn first_bookmaker(&self) -> Option<&str> {
        self.bookmakers.first().map(|b| b.bookmaker.as_str())
    }
}

// ---------------------------------------------------------------------------
// Price arithmetic
// ---------------------------------------------------------------------------

/// Reject American prices strictly between -100 and +100.
pub fn validate_american(price: i32) -> Result<i32, OddsError> {
    if price.unsigned_abs() < 100 {
        return Err(OddsError::InvalidAmerican(price));
    }
    Ok(price)
}

/// Break-even win probability encoded by an American price.
///
/// `+130 -> 100/230`, `-150 -> 150/250`.
pub fn implied_probability(price: i32) -> Result<f64, OddsError> {
    let price = validate_american(price)?;
    let p = price as f64;
    if price > 0 {
        Ok(100.0 / (p + 100.0))
    } else {
        let abs = p.abs();
        Ok(abs / (abs + 100.0))
    }
}

/// Convert a decimal price to the nearest American price.
pub fn decimal_to_american(decimal: f64) -> Result<i32, OddsError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(OddsError::InvalidDecimal(decimal));
    }
    let american = if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    };
    Ok(american.round() as i32)
}

/// Convert an American price to a decimal price.
pub fn american_to_decimal(price: i32) -> Result<f64, OddsError> {
    let price = validate_american(price)?;
    let p = price as f64;
    if price > 0 {
        Ok(1.0 + p / 100.0)
    } else {
        Ok(1.0 + 100.0 / p.abs())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn make_game(markets: Vec<Market>) -> Game {
        Game {
            id: "g1".into(),
            home_team: "Yankees".into(),
            away_team: "Red Sox".into(),
            commence_time: Utc.with_ymd_and_hms(2024, 6, 1, 23, 5, 0).unwrap(),
            bookmakers: vec![BookmakerQuote {
                bookmaker: "draftkings".into(),
                markets,
            }],
        }
    }

    fn moneyline(home: i32, away: i32) -> Market {
        Market {
            kind: MarketKind::Moneyline,
            outcomes: vec![
                Outcome { name: "Yankees".into(), price: home, point: None },
                Outcome { name: "Red Sox".into(), price: away, point: None },
            ],
        }
    }

    #[test]
    fn implied_probability_favorite_and_underdog() {
        assert!(approx_eq(implied_probability(-150).unwrap(), 0.6, 1e-9));
        assert!(approx_eq(implied_probability(130).unwrap(), 100.0 / 230.0, 1e-9));
        assert!(approx_eq(implied_probability(100).unwrap(), 0.5, 1e-9));
        assert!(approx_eq(implied_probability(-100).unwrap(), 0.5, 1e-9));
    }

    #[test]
    fn implied_probability_rejects_sub_hundred_prices() {
        assert_eq!(implied_probability(0), Err(OddsError::InvalidAmerican(0)));
        assert_eq!(implied_probability(-99), Err(OddsError::InvalidAmerican(-99)));
    }

    #[test]
    fn decimal_conversions() {
        assert_eq!(decimal_to_american(2.30).unwrap(), 130);
        assert_eq!(decimal_to_american(1.5).unwrap(), -200);
        assert_eq!(decimal_to_american(2.0).unwrap(), 100);
        assert!(decimal_to_american(1.0).is_err());
        assert!(decimal_to_american(f64::NAN).is_err());
        assert!(approx_eq(american_to_decimal(-200).unwrap(), 1.5, 1e-9));
        assert!(approx_eq(american_to_decimal(150).unwrap(), 2.5, 1e-9));
    }

    #[test]
    fn market_kind_from_feed_keys() {
        assert_eq!(MarketKind::from_key("h2h"), MarketKind::Moneyline);
        assert_eq!(MarketKind::from_key("spreads"), MarketKind::Spread);
        assert_eq!(MarketKind::from_key("totals"), MarketKind::Total);
        assert_eq!(
            MarketKind::from_key("player_props"),
            MarketKind::Other("player_props".into())
        );
    }

    #[test]
    fn first_moneyline_extracts_both_prices() {
        let game = make_game(vec![moneyline(-150, 130)]);
        assert_eq!(
            game.first_moneyline(),
            Some(MoneylinePrices { home: -150, away: 130 })
        );
    }

    #[test]
    fn first_moneyline_none_without_h2h_market() {
        let game = make_game(vec![Market {
            kind: MarketKind::Total,
            outcomes: vec![Outcome { name: "Over".into(), price: -110, point: Some(8.5) }],
        }]);
        assert!(game.first_moneyline().is_none());
    }

    #[test]
    fn first_moneyline_none_when_team_missing() {
        let mut market = moneyline(-150, 130);
        market.outcomes.pop();
        let game = make_game(vec![market]);
        assert!(game.first_moneyline().is_none());
    }

    #[test]
    fn first_moneyline_ignores_later_bookmakers() {
        let mut game = make_game(vec![]);
        game.bookmakers.push(BookmakerQuote {
            bookmaker: "fanduel".into(),
            markets: vec![moneyline(-140, 120)],
        });
        assert!(game.first_moneyline().is_none());
    }
}
