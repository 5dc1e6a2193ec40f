//! Grading thresholds and empirical scoring constants.
//!
//! Thresholds are plain values passed into every evaluation, so different
//! fabric standards or customers can grade with different limits side by side.

use crate::model::DefectPosition;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-grade limits. A roll qualifies for a grade only if every count is
/// within its limit and the normalized score does not exceed the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GradeLimits {
    pub critical_defect_limit: u32,
    pub major_defect_limit: u32,
    pub minor_defect_limit: u32,
    /// Maximum points per 100 length units
    pub normalized_point_threshold: f64,
}

impl GradeLimits {
    pub const fn new(critical: u32, major: u32, minor: u32, normalized_point_threshold: f64) -> Self {
        Self {
            critical_defect_limit: critical,
            major_defect_limit: major,
            minor_defect_limit: minor,
            normalized_point_threshold,
        }
    }
}

/// Multipliers applied by where across the width a defect sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PositionFactors {
    pub center: f64,
    pub left_edge: f64,
    pub right_edge: f64,
    pub full_width: f64,
    /// Used for positions without a dedicated factor
    pub default: f64,
}

impl PositionFactors {
    #[must_use]
    pub const fn factor(&self, position: DefectPosition) -> f64 {
        match position {
            DefectPosition::Center => self.center,
            DefectPosition::LeftEdge => self.left_edge,
            DefectPosition::RightEdge => self.right_edge,
            DefectPosition::FullWidth => self.full_width,
            DefectPosition::Other => self.default,
        }
    }
}

impl Default for PositionFactors {
    fn default() -> Self {
        Self {
            center: 1.2,
            left_edge: 0.8,
            right_edge: 0.8,
            full_width: 1.0,
            default: 1.0,
        }
    }
}

/// What to do with a roll whose `total_length` is zero or negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Treat it as a validation error
    #[default]
    Reject,
    /// Normalize against a length of 1 and flag the report
    LegacyFallback,
}

/// Complete grading configuration for one fabric standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QualityThresholds {
    /// Label recorded in every report graded with these thresholds
    pub name: String,
    pub a1: GradeLimits,
    pub a2: GradeLimits,
    pub position_factors: PositionFactors,
    /// Area at which the size factor equals 1
    pub reference_area: f64,
    pub area_factor_constant: f64,
    /// Used for a missing observation width or length
    pub default_defect_dimension: f64,
    pub length_policy: LengthPolicy,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        ThresholdPreset::Standard.thresholds()
    }
}

impl QualityThresholds {
    /// Limits for a grade; `B` has none
    #[must_use]
    pub const fn limits(&self, grade: super::Grade) -> Option<&GradeLimits> {
        match grade {
            super::Grade::A1 => Some(&self.a1),
            super::Grade::A2 => Some(&self.a2),
            super::Grade::B => None,
        }
    }

    #[must_use]
    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Named threshold sets for common fabric standards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPreset {
    /// General apparel fabric
    #[default]
    Standard,
    /// Premium apparel: tighter limits, center defects weigh more
    Premium,
    /// Industrial and technical textiles: looser limits
    Industrial,
}

impl ThresholdPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Industrial => "industrial",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "standard" | "default" => Some(Self::Standard),
            "premium" | "strict" => Some(Self::Premium),
            "industrial" | "technical" | "lenient" => Some(Self::Industrial),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "General apparel fabric grading",
            Self::Premium => "Tighter limits for premium apparel; center defects weigh more",
            Self::Industrial => "Looser limits for industrial and technical textiles",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::Premium, Self::Industrial]
    }

    #[must_use]
    pub fn thresholds(&self) -> QualityThresholds {
        let base = QualityThresholds {
            name: self.name().to_string(),
            a1: GradeLimits::new(0, 2, 4, 7.0),
            a2: GradeLimits::new(1, 5, 10, 20.0),
            position_factors: PositionFactors::default(),
            reference_area: 25.0,
            area_factor_constant: 1.5,
            default_defect_dimension: 5.0,
            length_policy: LengthPolicy::Reject,
        };

        match self {
            Self::Standard => base,
            Self::Premium => QualityThresholds {
                a1: GradeLimits::new(0, 1, 2, 4.0),
                a2: GradeLimits::new(1, 3, 6, 12.0),
                position_factors: PositionFactors {
                    center: 1.3,
                    ..PositionFactors::default()
                },
                ..base
            },
            Self::Industrial => QualityThresholds {
                a1: GradeLimits::new(0, 4, 8, 12.0),
                a2: GradeLimits::new(2, 8, 16, 30.0),
                ..base
            },
        }
    }
}

impl std::fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Grade;

    #[test]
    fn test_default_is_standard_preset() {
        let t = QualityThresholds::default();
        assert_eq!(t.name, "standard");
        assert_eq!(t.a1, GradeLimits::new(0, 2, 4, 7.0));
        assert_eq!(t.a2.critical_defect_limit, 1);
        assert!((t.a2.normalized_point_threshold - 20.0).abs() < f64::EPSILON);
        assert_eq!(t.length_policy, LengthPolicy::Reject);
    }

    #[test]
    fn test_position_factor_lookup() {
        let f = PositionFactors::default();
        assert!((f.factor(DefectPosition::Center) - 1.2).abs() < f64::EPSILON);
        assert!((f.factor(DefectPosition::LeftEdge) - 0.8).abs() < f64::EPSILON);
        assert!((f.factor(DefectPosition::RightEdge) - 0.8).abs() < f64::EPSILON);
        assert!((f.factor(DefectPosition::Other) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_preset_names_roundtrip() {
        for preset in ThresholdPreset::all() {
            assert_eq!(ThresholdPreset::from_name(preset.name()), Some(*preset));
            assert_eq!(preset.thresholds().name, preset.name());
        }
        assert_eq!(ThresholdPreset::from_name("STRICT"), Some(ThresholdPreset::Premium));
        assert_eq!(ThresholdPreset::from_name("bogus"), None);
    }

    #[test]
    fn test_limits_per_grade() {
        let t = ThresholdPreset::Industrial.thresholds();
        assert_eq!(t.limits(Grade::A2).unwrap().critical_defect_limit, 2);
        assert!(t.limits(Grade::B).is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let t: QualityThresholds = serde_yaml::from_str(
            "name: customer-x\nposition_factors:\n  center: 1.5\nlength_policy: legacy_fallback\n",
        )
        .unwrap();
        assert_eq!(t.name, "customer-x");
        assert!((t.position_factors.center - 1.5).abs() < f64::EPSILON);
        assert!((t.position_factors.left_edge - 0.8).abs() < f64::EPSILON);
        assert!((t.area_factor_constant - 1.5).abs() < f64::EPSILON);
        assert_eq!(t.length_policy, LengthPolicy::LegacyFallback);
    }
}
