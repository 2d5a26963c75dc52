// Presentation helpers: grade colouring, factor tones, confidence tiers, and
// price/probability formatting.

use diamondline_core::grade::{Grade, GradeLadder};
use diamondline_core::odds::implied_probability;

/// CSS-style class for a grade badge, by letter.
pub fn grade_class(grade: Grade) -> &'static str {
    match grade.letter() {
        'A' => "grade-a",
        'B' => "grade-b",
        'C' => "grade-c",
        'D' => "grade-d",
        _ => "grade-f",
    }
}

// ---------------------------------------------------------------------------
// Factor tone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorTone {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FactorTone {
    pub fn label(&self) -> &'static str {
        match self {
            FactorTone::Excellent => "Excellent",
            FactorTone::Good => "Good",
            FactorTone::Fair => "Fair",
            FactorTone::Poor => "Poor",
        }
    }
}

/// Tone for a single factor score, graded on the factor-display ladder:
/// A grades are excellent, B good, C fair, anything lower poor.
pub fn factor_tone(score: f64) -> FactorTone {
    match GradeLadder::FactorDisplay.grade(score).letter() {
        'A' => FactorTone::Excellent,
        'B' => FactorTone::Good,
        'C' => FactorTone::Fair,
        _ => FactorTone::Poor,
    }
}

// ---------------------------------------------------------------------------
// Confidence tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }
}

pub fn confidence_tier(confidence: u8) -> ConfidenceTier {
    if confidence >= 80 {
        ConfidenceTier::High
    } else if confidence >= 70 {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// `+130` / `-150`.
pub fn format_american(price: i32) -> String {
    if price > 0 {
        format!("+{price}")
    } else {
        price.to_string()
    }
}

/// Implied probability of a price as a one-decimal percentage, or `"n/a"`.
pub fn format_probability(price: i32) -> String {
    match implied_probability(price) {
        Ok(p) => format!("{:.1}%", p * 100.0),
        Err(_) => "n/a".to_string(),
    }
}
