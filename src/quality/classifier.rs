//! Grade classification.
//!
//! Rules are evaluated in order and the first match wins: A1, then A2, then
//! the B catch-all. Classification is total; every input gets a grade.

use super::scoring::SeveritySummary;
use super::thresholds::{GradeLimits, QualityThresholds};
use crate::model::SeverityClass;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Final quality classification of an inspected roll.
///
/// Ordered best first, so `Grade::A1 < Grade::B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Grade {
    A1,
    A2,
    B,
}

impl Grade {
    /// All grades, best first
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::A1, Self::A2, Self::B]
    }

    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B => "B",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::A1 => "First quality",
            Self::A2 => "Second quality",
            Self::B => "Below standard",
        }
    }

    /// Whether this grade is as good as or better than `other`
    #[must_use]
    pub fn is_at_least(&self, other: Self) -> bool {
        *self <= other
    }

    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim().to_uppercase().as_str() {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "B" => Some(Self::B),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_letter(s).ok_or_else(|| format!("Unknown grade '{s}'. Valid options: A1, A2, B"))
    }
}

/// Assigned grade plus the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub grade: Grade,
    pub rationale: String,
}

/// First limit a summary breaks, described for humans
fn first_violation(summary: &SeveritySummary, normalized_score: f64, limits: &GradeLimits) -> Option<String> {
    for (severity, limit) in [
        (SeverityClass::Critical, limits.critical_defect_limit),
        (SeverityClass::Major, limits.major_defect_limit),
        (SeverityClass::Minor, limits.minor_defect_limit),
    ] {
        let count = summary.tally(severity).count;
        if count > limit {
            return Some(format!(
                "{count} {} defect(s) exceed the limit of {limit}",
                severity.name().to_lowercase()
            ));
        }
    }
    if normalized_score > limits.normalized_point_threshold {
        return Some(format!(
            "normalized score {} exceeds {:.2}",
            score_beyond(normalized_score, limits.normalized_point_threshold),
            limits.normalized_point_threshold
        ));
    }
    None
}

/// Two decimals, or four when two would print the threshold itself
fn score_beyond(score: f64, threshold: f64) -> String {
    let short = format!("{score:.2}");
    if short == format!("{threshold:.2}") {
        format!("{score:.4}")
    } else {
        short
    }
}

/// Assign a grade.
#[must_use]
pub fn classify(
    summary: &SeveritySummary,
    normalized_score: f64,
    thresholds: &QualityThresholds,
) -> Classification {
    let a1_failure = match first_violation(summary, normalized_score, &thresholds.a1) {
        None => {
            return Classification {
                grade: Grade::A1,
                rationale: format!(
                    "All A1 limits met (normalized score {normalized_score:.2} <= {:.2})",
                    thresholds.a1.normalized_point_threshold
                ),
            };
        }
        Some(reason) => reason,
    };

    match first_violation(summary, normalized_score, &thresholds.a2) {
        None => Classification {
            grade: Grade::A2,
            rationale: format!("Not A1: {a1_failure}; all A2 limits met"),
        },
        Some(a2_failure) => Classification {
            grade: Grade::B,
            rationale: format!("Not A1: {a1_failure}; not A2: {a2_failure}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::scoring::SeverityTally;

    fn summary(critical: u32, major: u32, minor: u32) -> SeveritySummary {
        SeveritySummary {
            critical: SeverityTally { count: critical, points: 0.0 },
            major: SeverityTally { count: major, points: 0.0 },
            minor: SeverityTally { count: minor, points: 0.0 },
        }
    }

    #[test]
    fn test_empty_summary_is_a1() {
        let c = classify(&summary(0, 0, 0), 0.0, &QualityThresholds::default());
        assert_eq!(c.grade, Grade::A1);
        assert!(c.rationale.starts_with("All A1 limits met"));
    }

    #[test]
    fn test_single_critical_drops_to_a2_when_score_allows() {
        let c = classify(&summary(1, 0, 0), 10.0, &QualityThresholds::default());
        assert_eq!(c.grade, Grade::A2);
        assert!(c.rationale.contains("1 critical defect(s) exceed the limit of 0"));
    }

    #[test]
    fn test_score_above_a2_threshold_is_b() {
        let c = classify(&summary(1, 0, 0), 36.0, &QualityThresholds::default());
        assert_eq!(c.grade, Grade::B);
        assert!(c.rationale.contains("normalized score 36.00 exceeds 20.00"));
    }

    #[test]
    fn test_limits_are_inclusive() {
        let t = QualityThresholds::default();
        assert_eq!(classify(&summary(0, 2, 4), 7.0, &t).grade, Grade::A1);
        assert_eq!(classify(&summary(0, 2, 5), 7.0, &t).grade, Grade::A2);
        assert_eq!(classify(&summary(0, 2, 4), 7.01, &t).grade, Grade::A2);
    }

    #[test]
    fn test_score_just_over_threshold_is_not_rounded_away() {
        let c = classify(&summary(0, 0, 3), 7.002_8, &QualityThresholds::default());
        assert_eq!(c.grade, Grade::A2);
        assert!(c.rationale.contains("normalized score 7.0028 exceeds 7.00"));
    }

    #[test]
    fn test_two_criticals_is_b() {
        let c = classify(&summary(2, 0, 0), 0.5, &QualityThresholds::default());
        assert_eq!(c.grade, Grade::B);
    }

    #[test]
    fn test_grade_ordering_and_parsing() {
        assert!(Grade::A1.is_at_least(Grade::A2));
        assert!(Grade::A2.is_at_least(Grade::A2));
        assert!(!Grade::B.is_at_least(Grade::A2));
        assert_eq!("a2".parse::<Grade>().unwrap(), Grade::A2);
        assert!("C".parse::<Grade>().is_err());
    }
}
