// Static venue table: which park each club plays in, and how much that park
// helps (positive) or suppresses (negative) run scoring, in score points.

use crate::provider::team_key;

/// Club nickname -> home venue. Matched against the end of a team name at a
/// word boundary, ignoring case, so "New York Yankees" and "yankees" both
/// resolve.
const TEAM_VENUES: &[(&str, &str)] = &[
    ("Diamondbacks", "Chase Field"),
    ("Braves", "Truist Park"),
    ("Orioles", "Oriole Park at Camden Yards"),
    ("Red Sox", "Fenway Park"),
    ("Cubs", "Wrigley Field"),
    ("White Sox", "Guaranteed Rate Field"),
    ("Reds", "Great American Ball Park"),
    ("Guardians", "Progressive Field"),
    ("Rockies", "Coors Field"),
    ("Tigers", "Comerica Park"),
    ("Astros", "Minute Maid Park"),
    ("Royals", "Kauffman Stadium"),
    ("Angels", "Angel Stadium"),
    ("Dodgers", "Dodger Stadium"),
    ("Marlins", "loanDepot park"),
    ("Brewers", "American Family Field"),
    ("Twins", "Target Field"),
    ("Mets", "Citi Field"),
    ("Yankees", "Yankee Stadium"),
    ("Athletics", "Sutter Health Park"),
    ("Phillies", "Citizens Bank Park"),
    ("Pirates", "PNC Park"),
    ("Padres", "Petco Park"),
    ("Giants", "Oracle Park"),
    ("Mariners", "T-Mobile Park"),
    ("Cardinals", "Busch Stadium"),
    ("Rays", "Tropicana Field"),
    ("Rangers", "Globe Life Field"),
    ("Blue Jays", "Rogers Centre"),
    ("Nationals", "Nationals Park"),
];

const PARK_EFFECTS: &[(&str, f64)] = &[
    ("Coors Field", 6.0),
    ("Great American Ball Park", 4.0),
    ("Fenway Park", 3.0),
    ("Yankee Stadium", 3.0),
    ("Citizens Bank Park", 2.0),
    ("Chase Field", 1.0),
    ("Truist Park", 1.0),
    ("Wrigley Field", 1.0),
    ("Guaranteed Rate Field", 1.0),
    ("American Family Field", 1.0),
    ("Globe Life Field", 1.0),
    ("Rogers Centre", 1.0),
    ("Sutter Health Park", 1.0),
    ("Minute Maid Park", 0.0),
    ("Angel Stadium", 0.0),
    ("Dodger Stadium", 0.0),
    ("Target Field", 0.0),
    ("Nationals Park", 0.0),
    ("Oriole Park at Camden Yards", -1.0),
    ("Kauffman Stadium", -1.0),
    ("Progressive Field", -1.0),
    ("Citi Field", -1.0),
    ("PNC Park", -1.0),
    ("Busch Stadium", -1.0),
    ("Comerica Park", -2.0),
    ("loanDepot park", -2.0),
    ("Tropicana Field", -2.0),
    ("Oracle Park", -3.0),
    ("Petco Park", -3.0),
    ("T-Mobile Park", -3.0),
];

/// Home venue of a club, if known.
pub fn venue_for(team: &str) -> Option<&'static str> {
    let key = team_key(team);
    TEAM_VENUES
        .iter()
        .find(|(nickname, _)| {
            let nickname = nickname.to_lowercase();
            key == nickname || key.ends_with(&format!(" {nickname}"))
        })
        .map(|(_, venue)| *venue)
}

/// Run-environment effect of a venue. Unknown venues are neutral.
pub fn park_effect(venue: &str) -> f64 {
    PARK_EFFECTS
        .iter()
        .find(|(name, _)| *name == venue)
        .map(|(_, effect)| *effect)
        .unwrap_or(0.0)
}

/// Short description of a venue's run environment, `None` when neutral.
pub fn park_character(effect: f64) -> Option<&'static str> {
    if effect >= 2.0 {
        Some("a hitter-friendly park")
    } else if effect <= -2.0 {
        Some("a pitcher-friendly park")
    } else {
        None
    }
}
