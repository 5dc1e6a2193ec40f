//! The quality report and its builder.

use crate::model::{DefectPosition, InspectionSample, SeverityClass};
use crate::quality::{
    Classification, Grade, NormalizedScore, QualityThresholds, ReportWarning, ScoreOutcome,
    ScoredObservation, SeveritySummary, SCORING_ENGINE_VERSION,
};
use crate::utils::fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identification of the inspected roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub batch_number: String,
    pub order_reference: String,
    pub fabric_type: String,
    pub total_length: f64,
    pub total_width: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Supplied by the caller; never generated while building the report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected_at: Option<DateTime<Utc>>,
}

/// One observation as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectLine {
    pub observation_id: String,
    pub defect_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityClass>,
    pub position: DefectPosition,
    pub length_offset: f64,
    pub width: f64,
    pub length: f64,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The defect type was missing from the catalog; not scored
    pub unresolved: bool,
}

impl DefectLine {
    fn from_scored(scored: &ScoredObservation) -> Self {
        let obs = &scored.observation;
        Self {
            observation_id: obs.id.clone(),
            defect_type_id: obs.defect_type_id.clone(),
            code: scored.definition.as_ref().map(|d| d.code.clone()),
            name: scored.definition.as_ref().map(|d| d.name.clone()),
            severity: scored.severity(),
            position: obs.position,
            length_offset: obs.length_offset,
            width: scored.width,
            length: scored.length,
            area: scored.area,
            points: scored.points,
            note: obs.note.clone(),
            unresolved: !scored.is_resolved(),
        }
    }

    /// Single-line description, e.g. `Hole [Critical] at Center, 5.0 x 5.0 @ 12.0: near selvedge`
    #[must_use]
    pub fn description(&self) -> String {
        let label = match (&self.name, self.severity) {
            (Some(name), Some(severity)) => format!("{name} [{severity}]"),
            _ => format!("Unknown type '{}' [unscored]", self.defect_type_id),
        };
        let mut text = format!(
            "{label} at {}, {:.1} x {:.1} @ {:.1}",
            self.position, self.width, self.length, self.length_offset
        );
        if let Some(note) = self.note.as_deref().filter(|n| !n.trim().is_empty()) {
            text.push_str(": ");
            text.push_str(note);
        }
        text
    }
}

/// Complete, immutable grading result for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct QualityReport {
    pub engine_version: String,
    /// Name of the threshold set used
    pub thresholds_name: String,
    pub header: ReportHeader,
    pub summary: SeveritySummary,
    pub total_points: f64,
    /// Points per 100 length units
    pub normalized_score: f64,
    pub effective_length: f64,
    pub grade: Grade,
    pub rationale: String,
    /// Every observation in recorded order, including unresolved ones
    pub defects: Vec<DefectLine>,
    pub warnings: Vec<ReportWarning>,
    /// Content hash of everything above except `header.inspected_at`
    pub fingerprint: String,
}

impl QualityReport {
    /// Whether the report carries any warnings
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Defects that were scored
    pub fn scored_defects(&self) -> impl Iterator<Item = &DefectLine> {
        self.defects.iter().filter(|d| !d.unresolved)
    }

    /// Ordered human-readable defect descriptions
    #[must_use]
    pub fn defect_descriptions(&self) -> Vec<String> {
        self.defects.iter().map(DefectLine::description).collect()
    }

    /// Recompute the fingerprint from the current content
    #[must_use]
    pub fn compute_fingerprint(&self) -> String {
        let mut canonical = self.clone();
        canonical.header.inspected_at = None;
        canonical.fingerprint = String::new();
        let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
        fingerprint(&bytes)
    }
}

/// Assemble a report from the outputs of the scoring, normalization and
/// classification steps.
///
/// Pure: the same inputs always produce an identical report. Warnings are
/// ordered sample-level first, then per observation in recorded order.
pub fn build_report(
    sample: &InspectionSample,
    outcome: &ScoreOutcome,
    normalized: &NormalizedScore,
    classification: &Classification,
    thresholds: &QualityThresholds,
    inspected_at: Option<DateTime<Utc>>,
) -> QualityReport {
    let mut warnings = Vec::with_capacity(outcome.warnings.len() + 1);
    warnings.extend(normalized.warning(sample.total_length));
    warnings.extend(outcome.warnings.iter().cloned());

    let mut report = QualityReport {
        engine_version: SCORING_ENGINE_VERSION.to_string(),
        thresholds_name: thresholds.name.clone(),
        header: ReportHeader {
            batch_number: sample.batch_number.clone(),
            order_reference: sample.order_reference.clone(),
            fabric_type: sample.fabric_type.clone(),
            total_length: sample.total_length,
            total_width: sample.total_width,
            weight: sample.weight,
            notes: sample.notes.clone(),
            inspected_at,
        },
        summary: outcome.summary,
        total_points: outcome.total_points,
        normalized_score: normalized.score,
        effective_length: normalized.effective_length,
        grade: classification.grade,
        rationale: classification.rationale.clone(),
        defects: outcome.scored.iter().map(DefectLine::from_scored).collect(),
        warnings,
        fingerprint: String::new(),
    };
    report.fingerprint = report.compute_fingerprint();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::model::DefectObservation;
    use crate::quality::{classify, normalize, score_observations};
    use chrono::TimeZone;

    fn sample() -> InspectionSample {
        InspectionSample::new("B-7", "SO-1", "Twill")
            .with_measurements(200.0, 150.0, 40.0)
            .with_observation(
                DefectObservation::new("obs-1", "hole", DefectPosition::Center)
                    .at_offset(12.0)
                    .with_note("near splice"),
            )
            .with_observation(DefectObservation::new("obs-2", "mystery", DefectPosition::LeftEdge))
    }

    fn build(inspected_at: Option<DateTime<Utc>>) -> QualityReport {
        let sample = sample();
        let thresholds = QualityThresholds::default();
        let outcome = score_observations(&sample.observations, &StaticCatalog::standard(), &thresholds);
        let normalized = normalize(outcome.total_points, sample.total_length, thresholds.length_policy).unwrap();
        let classification = classify(&outcome.summary, normalized.score, &thresholds);
        build_report(&sample, &outcome, &normalized, &classification, &thresholds, inspected_at)
    }

    #[test]
    fn test_report_lists_all_observations_in_order() {
        let report = build(None);
        assert_eq!(report.defects.len(), 2);
        assert_eq!(report.defects[0].observation_id, "obs-1");
        assert!(report.defects[1].unresolved);
        assert_eq!(report.scored_defects().count(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_defect_descriptions() {
        let report = build(None);
        let descriptions = report.defect_descriptions();
        assert_eq!(
            descriptions[0],
            "Hole [Critical] at Center, 5.0 x 5.0 @ 12.0: near splice"
        );
        assert_eq!(
            descriptions[1],
            "Unknown type 'mystery' [unscored] at Left edge, 5.0 x 5.0 @ 0.0"
        );
    }

    #[test]
    fn test_fingerprint_ignores_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let stamped = build(Some(at));
        let unstamped = build(None);

        assert_eq!(stamped.header.inspected_at, Some(at));
        assert_eq!(stamped.fingerprint, unstamped.fingerprint);
        assert_eq!(stamped.fingerprint, stamped.compute_fingerprint());
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(build(None), build(None));
        let a = serde_json::to_string(&build(None)).unwrap();
        let b = serde_json::to_string(&build(None)).unwrap();
        assert_eq!(a, b);
    }
}
