// Templated reasoning: one deterministic sentence per recommendation.

use crate::factors::{FactorKind, FactorScores, NEUTRAL_SCORE};
use diamondline_core::grade::Grade;

pub const DEFAULT_SALIENCE: f64 = 75.0;

/// Clause used when a factor reaches the salience threshold. System
/// confidence has its own closing clause and never appears here.
fn salient_clause(kind: FactorKind) -> Option<&'static str> {
    match kind {
        FactorKind::Offensive => Some("a strong offensive profile"),
        FactorKind::Pitching => Some("a favorable pitching matchup"),
        FactorKind::Situational => Some("situational advantages"),
        FactorKind::Momentum => Some("positive team momentum"),
        FactorKind::Market => Some("value against the market price"),
        FactorKind::System => None,
    }
}

/// "a" or "an" for a spoken grade.
pub fn article(grade: Grade) -> &'static str {
    match grade.letter() {
        'A' | 'F' => "an",
        _ => "a",
    }
}

fn join_clauses(clauses: &[&str]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Build the reasoning sentence. Same inputs, same text.
pub fn generate_reasoning(
    team: &str,
    is_home: bool,
    grade: Grade,
    scores: &FactorScores,
    salience: f64,
) -> String {
    let location = if is_home { "at home" } else { "on the road" };
    let mut text = format!("{team} {location} grades out as {} {grade} pick", article(grade));

    let clauses: Vec<&str> = scores
        .iter()
        .filter(|(_, score)| *score >= salience)
        .filter_map(|(kind, _)| salient_clause(kind))
        .collect();

    if clauses.is_empty() {
        text.push_str(" with no single standout factor.");
    } else {
        text.push_str(&format!(", backed by {}.", join_clauses(&clauses)));
    }

    let system = if scores.system.is_finite() {
        scores.system
    } else {
        NEUTRAL_SCORE
    };
    text.push_str(&format!(" System confidence {}%.", system.round() as i64));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_scores(offensive: f64, pitching: f64, market: f64, system: f64) -> FactorScores {
        FactorScores {
            offensive,
            pitching,
            market,
            system,
            ..FactorScores::default()
        }
    }

    #[test]
    fn articles() {
        assert_eq!(article(Grade::APlus), "an");
        assert_eq!(article(Grade::F), "an");
        assert_eq!(article(Grade::BMinus), "a");
        assert_eq!(article(Grade::CPlus), "a");
    }

    #[test]
    fn no_salient_factors() {
        let text = generate_reasoning("Red Sox", false, Grade::B, &FactorScores::default(), 75.0);
        assert_eq!(
            text,
            "Red Sox on the road grades out as a B pick with no single standout factor. \
             System confidence 70%."
        );
    }

    #[test]
    fn salient_factors_in_fixed_order() {
        let scores = make_scores(80.0, 75.0, 90.0, 74.5);
        let text = generate_reasoning("Yankees", true, Grade::APlus, &scores, 75.0);
        assert_eq!(
            text,
            "Yankees at home grades out as an A+ pick, backed by a strong offensive profile, \
             a favorable pitching matchup, and value against the market price. \
             System confidence 75%."
        );
    }

    #[test]
    fn two_clauses_join_with_and() {
        let scores = make_scores(80.0, 60.0, 76.0, 70.0);
        let text = generate_reasoning("Mets", true, Grade::A, &scores, 75.0);
        assert!(text.contains("backed by a strong offensive profile and value against the market price."));
    }

    #[test]
    fn high_system_score_is_not_a_clause() {
        let scores = make_scores(70.0, 70.0, 70.0, 84.0);
        let text = generate_reasoning("Mets", true, Grade::A, &scores, 75.0);
        assert!(text.contains("no single standout factor"));
        assert!(text.ends_with("System confidence 84%."));
    }

    #[test]
    fn threshold_is_configurable_and_deterministic() {
        let scores = make_scores(72.0, 70.0, 70.0, 70.0);
        let low = generate_reasoning("Cubs", false, Grade::C, &scores, 71.0);
        let high = generate_reasoning("Cubs", false, Grade::C, &scores, 75.0);
        assert!(low.contains("strong offensive profile"));
        assert!(!high.contains("strong offensive profile"));
        assert_eq!(low, generate_reasoning("Cubs", false, Grade::C, &scores, 71.0));
    }
}
