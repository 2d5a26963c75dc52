// Letter grades, their comparison ranks, and the score-to-grade ladders.
//
// Two ladders exist and are kept as separate named profiles: the confidence
// ladder used to grade picks, and the factor-display ladder used to grade
// individual factor scores on the dashboard. They disagree on purpose.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown grade `{0}`")]
pub struct UnknownGrade(pub String);

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// A letter grade. `Ord` follows [`Grade::rank`], so `Grade::APlus > Grade::F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 12] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    /// Total-order rank used only for comparison and sorting: `A+ = 12 ... F = 1`.
    pub fn rank(&self) -> u8 {
        match self {
            Grade::APlus => 12,
            Grade::A => 11,
            Grade::AMinus => 10,
            Grade::BPlus => 9,
            Grade::B => 8,
            Grade::BMinus => 7,
            Grade::CPlus => 6,
            Grade::C => 5,
            Grade::CMinus => 4,
            Grade::DPlus => 3,
            Grade::D => 2,
            Grade::F => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// The letter without its +/- modifier.
    pub fn letter(&self) -> char {
        self.label().chars().next().unwrap_or('F')
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

impl TryFrom<String> for Grade {
    type Error = UnknownGrade;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.label().to_string()
    }
}

// ---------------------------------------------------------------------------
// Ladders
// ---------------------------------------------------------------------------

/// Confidence ladder: `>=78.5 A+ ... >=61.0 C`, else `C-`.
const CONFIDENCE_LADDER: &[(f64, Grade)] = &[
    (78.5, Grade::APlus),
    (76.0, Grade::A),
    (73.5, Grade::AMinus),
    (71.0, Grade::BPlus),
    (68.5, Grade::B),
    (66.0, Grade::BMinus),
    (63.5, Grade::CPlus),
    (61.0, Grade::C),
];

/// Factor-display ladder: `>=95 A+ ... >=63 D`, else `F`.
const FACTOR_DISPLAY_LADDER: &[(f64, Grade)] = &[
    (95.0, Grade::APlus),
    (88.0, Grade::A),
    (83.0, Grade::BPlus),
    (78.0, Grade::B),
    (73.0, Grade::CPlus),
    (68.0, Grade::C),
    (63.0, Grade::D),
];

/// A named score-to-grade threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLadder {
    /// Grades aggregated pick confidence.
    #[default]
    Confidence,
    /// Grades a single factor score for display.
    FactorDisplay,
}

impl GradeLadder {
    fn table(&self) -> (&'static [(f64, Grade)], Grade) {
        match self {
            GradeLadder::Confidence => (CONFIDENCE_LADDER, Grade::CMinus),
            GradeLadder::FactorDisplay => (FACTOR_DISPLAY_LADDER, Grade::F),
        }
    }

    /// Map a score onto a grade. Thresholds are checked top-down and the
    /// first one the score reaches wins. Non-finite scores get the floor grade.
    pub fn grade(&self, score: f64) -> Grade {
        let (table, floor) = self.table();
        table
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, grade)| *grade)
            .unwrap_or(floor)
    }

    /// Ordered thresholds of this ladder, best grade first.
    pub fn thresholds(&self) -> &'static [(f64, Grade)] {
        self.table().0
    }

    /// Grade assigned below the lowest threshold.
    pub fn floor(&self) -> Grade {
        self.table().1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
