//! Inspection session state.
//!
//! An [`InspectionSession`] owns the sample being inspected and the most recent
//! report. Any change to the sample or its observations discards the report,
//! so [`InspectionSession::report`] never returns a result that no longer
//! matches the recorded observations.
//!
//! ```text
//! Empty ──add──▶ HasDefects ──evaluate──▶ Evaluated
//!                    ▲                        │
//!                    └──add / edit / remove───┘
//! ```

use crate::catalog::DefectCatalog;
use crate::error::Result;
use crate::model::{DefectObservation, InspectionSample};
use crate::quality::{evaluate_at, QualityThresholds};
use crate::reports::QualityReport;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by session edits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("No observation with id '{0}' in this session")]
    UnknownObservation(String),

    #[error("An observation with id '{0}' already exists in this session")]
    DuplicateObservation(String),
}

/// Where a session stands relative to its latest evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No observations recorded and nothing evaluated
    Empty,
    /// Observations present, report missing or stale
    HasDefects,
    /// The stored report matches the current sample
    Evaluated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Empty => "empty",
            Self::HasDefects => "has defects",
            Self::Evaluated => "evaluated",
        };
        f.write_str(label)
    }
}

/// A sample under inspection plus its latest report.
#[derive(Debug, Clone)]
pub struct InspectionSession {
    sample: InspectionSample,
    report: Option<QualityReport>,
    /// Next number for generated `obs-N` ids; never reused within a session
    next_id: u64,
}

impl InspectionSession {
    /// Start a session for a sample, keeping any observations it already has.
    #[must_use]
    pub fn new(sample: InspectionSample) -> Self {
        let next_id = next_generated_id(&sample);
        Self {
            sample,
            report: None,
            next_id,
        }
    }

    #[must_use]
    pub const fn sample(&self) -> &InspectionSample {
        &self.sample
    }

    #[must_use]
    pub fn observations(&self) -> &[DefectObservation] {
        &self.sample.observations
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.report.is_some() {
            SessionState::Evaluated
        } else if self.sample.observations.is_empty() {
            SessionState::Empty
        } else {
            SessionState::HasDefects
        }
    }

    /// The current report, if one exists and is not stale
    #[must_use]
    pub const fn report(&self) -> Option<&QualityReport> {
        self.report.as_ref()
    }

    /// Record an observation and return its id.
    ///
    /// A blank id is replaced by the next free `obs-N`.
    pub fn add_observation(
        &mut self,
        mut observation: DefectObservation,
    ) -> std::result::Result<String, SessionError> {
        if observation.id.trim().is_empty() {
            observation.id = self.generate_id();
        } else if self.sample.observation(&observation.id).is_some() {
            return Err(SessionError::DuplicateObservation(observation.id));
        }

        let id = observation.id.clone();
        tracing::debug!("Recorded observation {} ({})", id, observation.defect_type_id);
        self.sample.observations.push(observation);
        self.invalidate();
        Ok(id)
    }

    /// Edit an observation in place. Its id cannot be changed.
    pub fn update_observation<F>(&mut self, id: &str, edit: F) -> std::result::Result<(), SessionError>
    where
        F: FnOnce(&mut DefectObservation),
    {
        let observation = self
            .sample
            .observations
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| SessionError::UnknownObservation(id.to_string()))?;

        edit(observation);
        observation.id = id.to_string();
        self.invalidate();
        Ok(())
    }

    /// Remove an observation, returning it
    pub fn remove_observation(&mut self, id: &str) -> std::result::Result<DefectObservation, SessionError> {
        let index = self
            .sample
            .observations
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| SessionError::UnknownObservation(id.to_string()))?;

        let removed = self.sample.observations.remove(index);
        self.invalidate();
        Ok(removed)
    }

    /// Edit the sample's own fields (batch, lengths, notes, ...).
    ///
    /// Observations added by the edit follow the same id rules as
    /// [`add_observation`](Self::add_observation): blank ids are replaced by the
    /// next `obs-N`, and a duplicate id rolls the whole edit back.
    pub fn edit_sample<F>(&mut self, edit: F) -> std::result::Result<(), SessionError>
    where
        F: FnOnce(&mut InspectionSample),
    {
        let mut edited = self.sample.clone();
        edit(&mut edited);

        let mut seen = HashSet::with_capacity(edited.observations.len());
        for observation in &edited.observations {
            if !observation.id.trim().is_empty() && !seen.insert(observation.id.as_str()) {
                return Err(SessionError::DuplicateObservation(observation.id.clone()));
            }
        }

        self.next_id = self.next_id.max(next_generated_id(&edited));
        self.sample = edited;
        for index in 0..self.sample.observations.len() {
            if self.sample.observations[index].id.trim().is_empty() {
                let id = self.generate_id();
                self.sample.observations[index].id = id;
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Grade the current sample and keep the report.
    ///
    /// On failure the previous report stays discarded.
    pub fn evaluate<C: DefectCatalog + ?Sized>(
        &mut self,
        thresholds: &QualityThresholds,
        catalog: &C,
        inspected_at: Option<DateTime<Utc>>,
    ) -> Result<&QualityReport> {
        self.report = None;
        let report = evaluate_at(&self.sample, thresholds, catalog, inspected_at)?;
        Ok(self.report.insert(report))
    }

    /// Hand the sample and its report to whoever persists them
    #[must_use]
    pub fn into_parts(self) -> (InspectionSample, Option<QualityReport>) {
        (self.sample, self.report)
    }

    fn generate_id(&mut self) -> String {
        loop {
            let candidate = format!("obs-{}", self.next_id);
            self.next_id += 1;
            if self.sample.observation(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn invalidate(&mut self) {
        if self.report.take().is_some() {
            tracing::trace!("Session report invalidated for batch {}", self.sample.batch_number);
        }
    }
}

/// One past the highest `obs-N` id in the sample
fn next_generated_id(sample: &InspectionSample) -> u64 {
    sample
        .observations
        .iter()
        .filter_map(|o| o.id.strip_prefix("obs-")?.parse::<u64>().ok())
        .max()
        .map_or(1, |n| n + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::model::DefectPosition;
    use crate::quality::Grade;

    fn session() -> InspectionSession {
        InspectionSession::new(
            InspectionSample::new("B-1", "SO-1", "Poplin").with_measurements(100.0, 150.0, 20.0),
        )
    }

    #[test]
    fn test_state_transitions() {
        let mut s = session();
        assert_eq!(s.state(), SessionState::Empty);

        s.add_observation(DefectObservation::new("", "knot", DefectPosition::Center))
            .unwrap();
        assert_eq!(s.state(), SessionState::HasDefects);
        assert!(s.report().is_none());

        s.evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .unwrap();
        assert_eq!(s.state(), SessionState::Evaluated);

        s.update_observation("obs-1", |o| o.position = DefectPosition::LeftEdge)
            .unwrap();
        assert_eq!(s.state(), SessionState::HasDefects);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_generated_ids_are_not_reused() {
        let mut s = session();
        let a = s.add_observation(DefectObservation::new("", "knot", DefectPosition::Center)).unwrap();
        let b = s.add_observation(DefectObservation::new(" ", "slub", DefectPosition::Center)).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("obs-1", "obs-2"));

        s.remove_observation("obs-2").unwrap();
        let c = s.add_observation(DefectObservation::new("", "slub", DefectPosition::Center)).unwrap();
        assert_eq!(c, "obs-3");
    }

    #[test]
    fn test_new_session_continues_existing_numbering() {
        let sample = InspectionSample::new("B-1", "SO-1", "Poplin")
            .with_observation(DefectObservation::new("obs-7", "knot", DefectPosition::Center));
        let mut s = InspectionSession::new(sample);
        let id = s.add_observation(DefectObservation::new("", "knot", DefectPosition::Center)).unwrap();
        assert_eq!(id, "obs-8");
    }

    #[test]
    fn test_unknown_and_duplicate_ids() {
        let mut s = session();
        assert_eq!(
            s.remove_observation("nope").unwrap_err(),
            SessionError::UnknownObservation("nope".to_string())
        );
        assert!(s.update_observation("nope", |_| {}).is_err());

        s.add_observation(DefectObservation::new("x", "knot", DefectPosition::Center)).unwrap();
        assert_eq!(
            s.add_observation(DefectObservation::new("x", "hole", DefectPosition::Center))
                .unwrap_err(),
            SessionError::DuplicateObservation("x".to_string())
        );
    }

    #[test]
    fn test_update_cannot_change_id() {
        let mut s = session();
        s.add_observation(DefectObservation::new("keep", "knot", DefectPosition::Center)).unwrap();
        s.update_observation("keep", |o| o.id = "changed".to_string()).unwrap();
        assert!(s.sample().observation("keep").is_some());
    }

    #[test]
    fn test_failed_evaluation_leaves_no_report() {
        let mut s = session();
        s.evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .unwrap();
        s.edit_sample(|sample| sample.batch_number.clear()).unwrap();
        assert!(s
            .evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .is_err());
        assert!(s.report().is_none());
    }

    #[test]
    fn test_edit_sample_applies_id_rules() {
        let mut s = session();
        s.add_observation(DefectObservation::new("", "knot", DefectPosition::Center)).unwrap();
        s.evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .unwrap();

        let err = s
            .edit_sample(|sample| {
                sample.total_length = 80.0;
                sample
                    .observations
                    .push(DefectObservation::new("obs-1", "slub", DefectPosition::Center));
            })
            .unwrap_err();
        assert_eq!(err, SessionError::DuplicateObservation("obs-1".to_string()));
        assert!((s.sample().total_length - 100.0).abs() < f64::EPSILON);
        assert_eq!(s.observations().len(), 1);
        assert!(s.report().is_some());

        s.edit_sample(|sample| {
            sample.observations.push(DefectObservation::new("obs-5", "slub", DefectPosition::Center));
            sample.observations.push(DefectObservation::new("", "float", DefectPosition::Center));
        })
        .unwrap();
        let ids: Vec<_> = s.observations().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["obs-1", "obs-5", "obs-6"]);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_removing_defect_improves_grade() {
        let mut s = session();
        s.add_observation(DefectObservation::new("", "hole", DefectPosition::Center)).unwrap();
        let graded = s
            .evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .unwrap()
            .grade;
        assert_eq!(graded, Grade::A2);

        s.remove_observation("obs-1").unwrap();
        let report = s
            .evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
            .unwrap();
        assert_eq!(report.grade, Grade::A1);
    }
}
