//! Defect point scoring.
//!
//! Each observation is resolved against the catalog and weighted by its size
//! and position:
//!
//! ```text
//! size_factor = sqrt(area / reference_area)
//! points      = round1(base_points × size_factor × position_factor × area_factor_constant)
//! ```
//!
//! Points are then bucketed by the severity class the catalog assigns, so the
//! grouping always reflects the current catalog rather than anything stored on
//! the observation.

use super::thresholds::QualityThresholds;
use super::warnings::ReportWarning;
use crate::catalog::DefectCatalog;
use crate::model::{DefectObservation, DefectTypeDefinition, SeverityClass};
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

/// Count and points accumulated for one severity class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityTally {
    pub count: u32,
    pub points: f64,
}

/// Per-severity tallies for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub critical: SeverityTally,
    pub major: SeverityTally,
    pub minor: SeverityTally,
}

impl SeveritySummary {
    #[must_use]
    pub const fn tally(&self, severity: SeverityClass) -> &SeverityTally {
        match severity {
            SeverityClass::Critical => &self.critical,
            SeverityClass::Major => &self.major,
            SeverityClass::Minor => &self.minor,
        }
    }

    fn tally_mut(&mut self, severity: SeverityClass) -> &mut SeverityTally {
        match severity {
            SeverityClass::Critical => &mut self.critical,
            SeverityClass::Major => &mut self.major,
            SeverityClass::Minor => &mut self.minor,
        }
    }

    /// Number of scored observations across all classes
    #[must_use]
    pub const fn total_count(&self) -> u32 {
        self.critical.count + self.major.count + self.minor.count
    }

    /// Sum of bucket points, rounded to one decimal
    #[must_use]
    pub fn total_points(&self) -> f64 {
        round_to(
            self.critical.points + self.major.points + self.minor.points,
            1,
        )
    }
}

/// One observation after catalog resolution and weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredObservation {
    pub observation: DefectObservation,
    /// `None` when the defect type did not resolve
    pub definition: Option<DefectTypeDefinition>,
    pub width: f64,
    pub length: f64,
    pub area: f64,
    pub size_factor: f64,
    pub position_factor: f64,
    /// `None` when the observation was excluded from scoring
    pub points: Option<f64>,
}

impl ScoredObservation {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.definition.is_some()
    }

    #[must_use]
    pub fn severity(&self) -> Option<SeverityClass> {
        self.definition.as_ref().map(|d| d.severity_class)
    }
}

/// Result of scoring an observation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Every observation, in input order, resolved or not
    pub scored: Vec<ScoredObservation>,
    pub summary: SeveritySummary,
    pub total_points: f64,
    pub warnings: Vec<ReportWarning>,
}

/// Size and position weighting of one observation, before catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Weighting {
    width: f64,
    length: f64,
    area: f64,
    size_factor: f64,
    position_factor: f64,
}

impl Weighting {
    fn of(observation: &DefectObservation, thresholds: &QualityThresholds) -> Self {
        let (width, length) = observation.dimensions(thresholds.default_defect_dimension);
        let area = observation.area(thresholds.default_defect_dimension);
        Self {
            width,
            length,
            area,
            size_factor: (area / thresholds.reference_area).sqrt(),
            position_factor: thresholds.position_factors.factor(observation.position),
        }
    }

    /// Points for a defect of the given base weight, rounded to one decimal
    fn points(&self, base_points: f64, thresholds: &QualityThresholds) -> f64 {
        round_to(
            base_points * self.size_factor * self.position_factor * thresholds.area_factor_constant,
            1,
        )
    }
}

/// Score every observation and aggregate per severity class.
///
/// Pure: the outcome depends only on the arguments. Unresolved defect types are
/// kept in `scored` with no points and reported as warnings.
pub fn score_observations<C: DefectCatalog + ?Sized>(
    observations: &[DefectObservation],
    catalog: &C,
    thresholds: &QualityThresholds,
) -> ScoreOutcome {
    let mut summary = SeveritySummary::default();
    let mut warnings = Vec::new();
    let mut scored = Vec::with_capacity(observations.len());

    for obs in observations {
        let weighting = Weighting::of(obs, thresholds);
        let definition = catalog.lookup(&obs.defect_type_id).cloned();
        let points = match &definition {
            Some(def) => {
                let points = weighting.points(def.base_points, thresholds);
                let tally = summary.tally_mut(def.severity_class);
                tally.count += 1;
                tally.points += points;
                Some(points)
            }
            None => {
                tracing::warn!(
                    "Observation '{}' references unknown defect type '{}'",
                    obs.id,
                    obs.defect_type_id
                );
                warnings.push(ReportWarning::UnknownDefectType {
                    observation_id: obs.id.clone(),
                    defect_type_id: obs.defect_type_id.clone(),
                    suggestion: catalog.suggest(&obs.defect_type_id),
                });
                None
            }
        };

        scored.push(ScoredObservation {
            observation: obs.clone(),
            definition,
            width: weighting.width,
            length: weighting.length,
            area: weighting.area,
            size_factor: weighting.size_factor,
            position_factor: weighting.position_factor,
            points,
        });
    }

    for severity in SeverityClass::all() {
        let tally = summary.tally_mut(severity);
        tally.points = round_to(tally.points, 1);
    }

    ScoreOutcome {
        scored,
        total_points: summary.total_points(),
        summary,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::model::DefectPosition;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            DefectTypeDefinition::new("hole", "HOLE", "Hole", SeverityClass::Critical, 10.0),
            DefectTypeDefinition::new("float", "FLOAT", "Float", SeverityClass::Major, 4.0),
            DefectTypeDefinition::new("slub", "SLUB", "Slub", SeverityClass::Minor, 2.0),
        ])
        .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_critical_center_default_area() {
        let obs = [DefectObservation::new("o1", "hole", DefectPosition::Center)];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());

        assert_eq!(outcome.summary.critical.count, 1);
        assert!(approx(outcome.summary.critical.points, 18.0));
        assert!(approx(outcome.total_points, 18.0));
        assert!(approx(outcome.scored[0].size_factor, 1.0));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_minor_edge_points() {
        let obs = [DefectObservation::new("o1", "slub", DefectPosition::LeftEdge)];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());
        assert!(approx(outcome.summary.minor.points, 2.4));
    }

    #[test]
    fn test_size_factor_scales_with_sqrt_area() {
        // 10 × 10 = 100 → sqrt(100 / 25) = 2
        let obs = [DefectObservation::new("o1", "float", DefectPosition::FullWidth).with_size(10.0, 10.0)];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());
        assert!(approx(outcome.scored[0].size_factor, 2.0));
        // 4 × 2 × 1.0 × 1.5
        assert!(approx(outcome.summary.major.points, 12.0));
    }

    #[test]
    fn test_unknown_position_uses_default_factor() {
        let obs = [DefectObservation::new("o1", "slub", DefectPosition::Other)];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());
        assert!(approx(outcome.scored[0].position_factor, 1.0));
        assert!(approx(outcome.total_points, 3.0));
    }

    #[test]
    fn test_unresolved_type_is_excluded_and_warned() {
        let obs = [
            DefectObservation::new("o1", "slub", DefectPosition::Center),
            DefectObservation::new("o2", "hol", DefectPosition::Center),
        ];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());

        assert_eq!(outcome.summary.total_count(), 1);
        assert_eq!(outcome.scored.len(), 2);
        assert!(!outcome.scored[1].is_resolved());
        assert_eq!(outcome.scored[1].points, None);
        assert!(matches!(
            &outcome.warnings[0],
            ReportWarning::UnknownDefectType { observation_id, suggestion, .. }
                if observation_id == "o2" && suggestion.as_deref() == Some("hole")
        ));
    }

    #[test]
    fn test_points_accumulate_per_severity() {
        let obs = [
            DefectObservation::new("o1", "slub", DefectPosition::Center),
            DefectObservation::new("o2", "slub", DefectPosition::RightEdge),
            DefectObservation::new("o3", "hole", DefectPosition::LeftEdge),
        ];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());

        assert_eq!(outcome.summary.minor.count, 2);
        // 3.6 + 2.4
        assert!(approx(outcome.summary.minor.points, 6.0));
        // 10 × 0.8 × 1.5
        assert!(approx(outcome.summary.critical.points, 12.0));
        assert!(approx(outcome.total_points, 18.0));
    }

    #[test]
    fn test_unresolved_observation_keeps_its_weighting() {
        let obs = [DefectObservation::new("o1", "nope", DefectPosition::Center).with_size(3.0, 7.0)];
        let outcome = score_observations(&obs, &catalog(), &QualityThresholds::default());
        let scored = &outcome.scored[0];
        assert!(scored.points.is_none());
        assert!(approx(scored.area, 21.0));
        assert!(approx(scored.position_factor, 1.2));
    }
}
