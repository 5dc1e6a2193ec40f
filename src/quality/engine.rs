//! Evaluation entry points.
//!
//! `evaluate` validates the sample, scores its observations, normalizes the
//! total, classifies it and builds the report. It holds no state, so any
//! number of evaluations may run concurrently on independent inputs.

use super::classifier::classify;
use super::normalize::normalize;
use super::scoring::score_observations;
use super::thresholds::QualityThresholds;
use crate::catalog::DefectCatalog;
use crate::error::{GradingError, Result};
use crate::model::InspectionSample;
use crate::reports::{build_report, QualityReport};
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// Grade a sample without an inspection timestamp.
pub fn evaluate<C: DefectCatalog + ?Sized>(
    sample: &InspectionSample,
    thresholds: &QualityThresholds,
    catalog: &C,
) -> Result<QualityReport> {
    evaluate_at(sample, thresholds, catalog, None)
}

/// Grade a sample, stamping the report with a caller-supplied timestamp.
///
/// Fails with [`GradingError::Validation`] before any scoring when the sample
/// is invalid; no partial report is produced.
pub fn evaluate_at<C: DefectCatalog + ?Sized>(
    sample: &InspectionSample,
    thresholds: &QualityThresholds,
    catalog: &C,
    inspected_at: Option<DateTime<Utc>>,
) -> Result<QualityReport> {
    sample.validate_with(thresholds.length_policy)?;

    let outcome = score_observations(&sample.observations, catalog, thresholds);
    let normalized = normalize(outcome.total_points, sample.total_length, thresholds.length_policy)?;
    let classification = classify(&outcome.summary, normalized.score, thresholds);

    tracing::debug!(
        "Graded batch {} as {} ({} scored, {:.2} pts/100)",
        sample.batch_number,
        classification.grade,
        outcome.summary.total_count(),
        normalized.score
    );

    Ok(build_report(
        sample,
        &outcome,
        &normalized,
        &classification,
        thresholds,
        inspected_at,
    ))
}

/// Thresholds and catalog bundled for repeated evaluations.
#[derive(Debug, Clone)]
pub struct GradingEngine<C> {
    thresholds: QualityThresholds,
    catalog: C,
}

impl<C: DefectCatalog> GradingEngine<C> {
    pub const fn new(thresholds: QualityThresholds, catalog: C) -> Self {
        Self { thresholds, catalog }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn evaluate(&self, sample: &InspectionSample) -> Result<QualityReport> {
        evaluate(sample, &self.thresholds, &self.catalog)
    }

    pub fn evaluate_at(
        &self,
        sample: &InspectionSample,
        inspected_at: Option<DateTime<Utc>>,
    ) -> Result<QualityReport> {
        evaluate_at(sample, &self.thresholds, &self.catalog, inspected_at)
    }
}

impl<C: DefectCatalog + Sync> GradingEngine<C> {
    /// Grade independent samples in parallel.
    ///
    /// Results are returned in input order; one invalid sample does not affect
    /// the others.
    pub fn evaluate_batch(
        &self,
        samples: &[InspectionSample],
        inspected_at: Option<DateTime<Utc>>,
    ) -> Vec<std::result::Result<QualityReport, GradingError>> {
        samples
            .par_iter()
            .map(|sample| self.evaluate_at(sample, inspected_at))
            .collect()
    }
}
