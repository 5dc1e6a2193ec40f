//! Non-fatal conditions recorded on a report.

use serde::{Deserialize, Serialize};

/// A condition that did not block grading but should be reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// The observation references a defect type missing from the catalog and
    /// was excluded from scoring
    UnknownDefectType {
        observation_id: String,
        defect_type_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
    /// `total_length` was not positive; the score was normalized against a
    /// length of 1 and is likely inflated
    DegenerateLengthFallback { total_length: f64 },
}

impl ReportWarning {
    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnknownDefectType {
                observation_id,
                defect_type_id,
                suggestion,
            } => {
                let mut msg = format!(
                    "Observation '{observation_id}' references unknown defect type '{defect_type_id}' and was not scored"
                );
                if let Some(s) = suggestion {
                    msg.push_str(&format!(" (did you mean '{s}'?)"));
                }
                msg
            }
            Self::DegenerateLengthFallback { total_length } => format!(
                "Total length {total_length} is not positive; score normalized against a length of 1"
            ),
        }
    }

    /// Short machine-friendly code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownDefectType { .. } => "unknown-defect-type",
            Self::DegenerateLengthFallback { .. } => "degenerate-length-fallback",
        }
    }
}

impl std::fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message_includes_suggestion() {
        let w = ReportWarning::UnknownDefectType {
            observation_id: "obs-1".to_string(),
            defect_type_id: "hol".to_string(),
            suggestion: Some("hole".to_string()),
        };
        assert!(w.message().contains("'hol'"));
        assert!(w.message().ends_with("(did you mean 'hole'?)"));
        assert_eq!(w.code(), "unknown-defect-type");
    }

    #[test]
    fn test_serialized_with_kind_tag() {
        let w = ReportWarning::DegenerateLengthFallback { total_length: 0.0 };
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["kind"], "degenerate_length_fallback");
    }
}
