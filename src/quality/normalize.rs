//! Length normalization: points per 100 length units.

use super::thresholds::LengthPolicy;
use super::warnings::ReportWarning;
use crate::error::ValidationErrors;

/// Length used when the legacy fallback replaces a non-positive roll length
pub const FALLBACK_LENGTH: f64 = 1.0;

/// Normalization basis, in length units
pub const NORMALIZATION_BASIS: f64 = 100.0;

/// Total points rescaled to the normalization basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedScore {
    /// Points per 100 length units, unrounded; renderers round for display
    pub score: f64,
    /// Length actually divided by
    pub effective_length: f64,
    /// Whether the legacy fallback length was used
    pub fallback_applied: bool,
}

impl NormalizedScore {
    /// Warning to attach to the report, if the fallback was used
    #[must_use]
    pub const fn warning(&self, total_length: f64) -> Option<ReportWarning> {
        if self.fallback_applied {
            Some(ReportWarning::DegenerateLengthFallback { total_length })
        } else {
            None
        }
    }
}

/// Normalize `total_points` against the roll length.
///
/// Under [`LengthPolicy::Reject`] a non-positive length is a validation error on
/// `total_length`; under [`LengthPolicy::LegacyFallback`] it is replaced by
/// [`FALLBACK_LENGTH`].
pub fn normalize(
    total_points: f64,
    total_length: f64,
    policy: LengthPolicy,
) -> Result<NormalizedScore, ValidationErrors> {
    let (effective_length, fallback_applied) = if total_length > 0.0 {
        (total_length, false)
    } else {
        match policy {
            LengthPolicy::Reject => {
                let mut errors = ValidationErrors::new();
                errors.push(
                    "total_length",
                    format!("must be a positive number, got {total_length}"),
                );
                return Err(errors);
            }
            LengthPolicy::LegacyFallback => {
                tracing::warn!(
                    "Total length {} is not positive, normalizing against {}",
                    total_length,
                    FALLBACK_LENGTH
                );
                (FALLBACK_LENGTH, true)
            }
        }
    };

    Ok(NormalizedScore {
        score: total_points / effective_length * NORMALIZATION_BASIS,
        effective_length,
        fallback_applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_regular_length() {
        let n = normalize(18.0, 50.0, LengthPolicy::Reject).unwrap();
        assert!((n.score - 36.0).abs() < 1e-9);
        assert!(!n.fallback_applied);
        assert!(n.warning(50.0).is_none());

        let n = normalize(2.4, 1000.0, LengthPolicy::Reject).unwrap();
        assert!((n.score - 0.24).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_not_rounded() {
        // 7.5 over 107.1 is 7.0028..., which must stay above a 7.0 limit
        let n = normalize(7.5, 107.1, LengthPolicy::Reject).unwrap();
        assert!(n.score > 7.0);
        assert!((n.score - 7.5 / 107.1 * 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_points_is_zero_score() {
        let n = normalize(0.0, 100.0, LengthPolicy::Reject).unwrap();
        assert!(n.score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_positive_length_rejected_by_default() {
        for length in [0.0, -5.0] {
            let errors = normalize(3.0, length, LengthPolicy::Reject).unwrap_err();
            assert!(errors.contains_field("total_length"));
        }
    }

    #[test]
    fn test_legacy_fallback_inflates_and_flags() {
        let n = normalize(3.0, 0.0, LengthPolicy::LegacyFallback).unwrap();
        assert!((n.score - 300.0).abs() < 1e-9);
        assert!((n.effective_length - FALLBACK_LENGTH).abs() < f64::EPSILON);
        assert!(matches!(
            n.warning(0.0),
            Some(ReportWarning::DegenerateLengthFallback { .. })
        ));
    }
}
