// Narrative reasoning: buckets each factor score and picks one of several
// hand-written sentences per bucket at random, then adds context clauses
// for the opposing starter and the ballpark when those are known.
//
// Scores are reproducible for a given noise source; the text is not meant
// to be. Callers should draw it from a separate `Noise` so that changing the
// template count never shifts the scoring draws.

use crate::ballpark::{park_character, park_effect, venue_for};
use crate::factors::{FactorKind, FactorScores, PickContext, NEUTRAL_SCORE};
use crate::reasoning::article;
use diamondline_core::grade::Grade;
use diamondline_core::noise::Noise;

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Elite,
    Strong,
    Neutral,
    Weak,
}

impl Bucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Bucket::Elite
        } else if score >= 75.0 {
            Bucket::Strong
        } else if score >= 65.0 {
            Bucket::Neutral
        } else {
            Bucket::Weak
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

type Templates = [&'static [&'static str]; 4];

static OFFENSE: Templates = [
    &[
        "{team} brings one of the most dangerous lineups on the slate.",
        "The {team} bats are as hot as anyone's right now.",
        "{team} should have no trouble putting runs on the board.",
    ],
    &[
        "{team} has a lineup that grinds out quality at-bats.",
        "The {team} offense profiles above average here.",
    ],
    &[
        "{team} hits about as well as a typical lineup.",
        "Nothing stands out about the {team} offense either way.",
    ],
    &[
        "The {team} lineup has been scuffling at the plate.",
        "{team} may struggle to string hits together.",
    ],
];

static PITCHING: Templates = [
    &[
        "{team} holds a decisive edge on the mound against {opponent}.",
        "The {team} staff should smother the {opponent} lineup.",
    ],
    &[
        "{team} gets the better of the pitching matchup.",
        "The arms favor {team} in this one.",
        "{team} has the more reliable starter going.",
    ],
    &[
        "The pitching matchup looks close to even.",
        "Neither staff has a clear advantage.",
    ],
    &[
        "{team} is at a disadvantage on the mound.",
        "The {opponent} staff looks like the stronger group.",
    ],
];

static SITUATIONAL: Templates = [
    &[
        "Every situational factor lines up for {team}.",
        "The setting could hardly suit {team} better.",
    ],
    &[
        "{team} benefits from the game setting.",
        "Conditions tilt toward {team}.",
    ],
    &["The game setting is roughly neutral."],
    &[
        "{team} has to overcome a tough spot.",
        "The setting works against {team}.",
    ],
];

static MOMENTUM: Templates = [
    &[
        "{team} is rolling right now.",
        "{team} arrives on a heater.",
    ],
    &[
        "{team} has been playing good baseball lately.",
        "Recent form favors {team}.",
    ],
    &["{team} has been treading water recently."],
    &[
        "{team} has dropped too many games lately.",
        "Recent results have not been kind to {team}.",
    ],
];

static MARKET: Templates = [
    &[
        "The price on {team} looks badly mispriced.",
        "This number is a clear overlay on {team}.",
    ],
    &[
        "There is real value in the {team} price.",
        "The market is underrating {team}.",
    ],
    &["The {team} price looks fair."],
    &[
        "The market has already priced in the {team} edge.",
        "{team} is a little expensive at this number.",
    ],
];

fn templates_for(kind: FactorKind) -> Option<&'static Templates> {
    match kind {
        FactorKind::Offensive => Some(&OFFENSE),
        FactorKind::Pitching => Some(&PITCHING),
        FactorKind::Situational => Some(&SITUATIONAL),
        FactorKind::Momentum => Some(&MOMENTUM),
        FactorKind::Market => Some(&MARKET),
        FactorKind::System => None,
    }
}

fn bucket_index(bucket: Bucket) -> usize {
    match bucket {
        Bucket::Elite => 0,
        Bucket::Strong => 1,
        Bucket::Neutral => 2,
        Bucket::Weak => 3,
    }
}

fn fill(template: &str, ctx: &PickContext<'_>) -> String {
    template
        .replace("{team}", ctx.team)
        .replace("{opponent}", ctx.opponent)
}

/// One randomly chosen sentence for a factor score.
pub fn factor_sentence(
    kind: FactorKind,
    score: f64,
    ctx: &PickContext<'_>,
    noise: &mut dyn Noise,
) -> Option<String> {
    let options = templates_for(kind)?[bucket_index(Bucket::from_score(score))];
    let template = options[noise.index(options.len())];
    Some(fill(template, ctx))
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

/// Build the narrative text for one side.
pub fn generate_narrative(
    ctx: &PickContext<'_>,
    grade: Grade,
    scores: &FactorScores,
    noise: &mut dyn Noise,
) -> String {
    let location = if ctx.is_home { "hosting" } else { "visiting" };
    let mut text = format!(
        "{} ({location} {}) earns {} {grade}.",
        ctx.team,
        ctx.opponent,
        article(grade)
    );

    for (kind, score) in scores.iter() {
        if let Some(sentence) = factor_sentence(kind, score, ctx, noise) {
            text.push(' ');
            text.push_str(&sentence);
        }
    }

    if let Some(hand) = ctx.opponent_stats().starter_hand {
        text.push_str(&format!(
            " {} sends a {} starter to the mound.",
            ctx.opponent,
            hand.label()
        ));
    }

    if let Some(venue) = venue_for(ctx.home_team) {
        if let Some(character) = park_character(park_effect(venue)) {
            text.push_str(&format!(" {venue} plays as {character}."));
        }
    }

    let system = if scores.system.is_finite() {
        scores.system
    } else {
        NEUTRAL_SCORE
    };
    let certainty = system.round() as i64;
    text.push_str(&format!(" Model certainty {certainty}%."));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::testing::*;
    use diamondline_core::noise::{MidpointNoise, SeededNoise, SequenceNoise};
    use diamondline_core::stats::Handedness;

    #[test]
    fn bucket_edges() {
        assert_eq!(Bucket::from_score(85.0), Bucket::Elite);
        assert_eq!(Bucket::from_score(84.9), Bucket::Strong);
        assert_eq!(Bucket::from_score(75.0), Bucket::Strong);
        assert_eq!(Bucket::from_score(65.0), Bucket::Neutral);
        assert_eq!(Bucket::from_score(64.9), Bucket::Weak);
    }

    #[test]
    fn every_bucket_has_templates() {
        for kind in FactorKind::ALL {
            if let Some(templates) = templates_for(kind) {
                assert!(templates.iter().all(|t| !t.is_empty()), "{}", kind.label());
            }
        }
    }

    #[test]
    fn sentence_substitutes_names() {
        let stats = average_matchup();
        let ctx = home_pick(&stats);
        let mut noise = SequenceNoise::new(vec![0.0]);
        let s = factor_sentence(FactorKind::Pitching, 90.0, &ctx, &mut noise).unwrap();
        assert_eq!(s, "Yankees holds a decisive edge on the mound against Red Sox.");
        assert!(factor_sentence(FactorKind::System, 90.0, &ctx, &mut noise).is_none());
    }

    #[test]
    fn context_clauses_appear_when_known() {
        let mut stats = average_matchup();
        stats.away.starter_hand = Some(Handedness::Left);
        let ctx = home_pick(&stats);
        let text = generate_narrative(&ctx, Grade::A, &FactorScores::default(), &mut MidpointNoise);
        assert!(text.starts_with("Yankees (hosting Red Sox) earns an A."));
        assert!(text.contains("Red Sox sends a left-handed starter to the mound."));
        assert!(text.contains("Yankee Stadium plays as a hitter-friendly park."));
        assert!(text.ends_with("Model certainty 70%."));
    }

    #[test]
    fn non_finite_system_score_reads_as_neutral() {
        let stats = average_matchup();
        let ctx = home_pick(&stats);
        let scores = FactorScores {
            system: f64::NAN,
            ..FactorScores::default()
        };
        let text = generate_narrative(&ctx, Grade::B, &scores, &mut MidpointNoise);
        assert!(text.ends_with("Model certainty 70%."));
    }

    #[test]
    fn neutral_park_and_unknown_starter_add_nothing() {
        let stats = average_matchup();
        let mut ctx = away_pick(&stats);
        ctx.home_team = "Nowhere Nine";
        let text = generate_narrative(&ctx, Grade::B, &FactorScores::default(), &mut MidpointNoise);
        assert!(!text.contains("starter to the mound"));
        assert!(!text.contains("plays as"));
    }

    #[test]
    fn text_varies_across_draws() {
        let stats = average_matchup();
        let ctx = home_pick(&stats);
        let scores = FactorScores {
            offensive: 90.0,
            pitching: 80.0,
            ..FactorScores::default()
        };
        let mut noise = SeededNoise::seeded(5);
        let texts: std::collections::HashSet<String> = (0..50)
            .map(|_| generate_narrative(&ctx, Grade::A, &scores, &mut noise))
            .collect();
        assert!(texts.len() > 1);
    }
}
