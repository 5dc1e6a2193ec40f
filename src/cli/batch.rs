//! Batch command handler.
//!
//! Implements the `batch` subcommand: grade every sample in one or more files
//! in parallel and print a combined report.

use super::prepare;
use crate::config::AppConfig;
use crate::error::GradingError;
use crate::pipeline::{grade_exit_code, load_samples_with_context, output_reports, PipelineError};
use crate::quality::GradingEngine;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Batch command configuration
pub struct BatchConfig {
    pub sample_paths: Vec<PathBuf>,
    pub app: AppConfig,
    /// Timestamp recorded on every report
    pub inspected_at: Option<DateTime<Utc>>,
}

/// Run the batch command, returning the desired exit code.
///
/// Samples that fail validation are logged and left out of the output; the
/// rest are still graded and reported.
pub fn run_batch(config: BatchConfig) -> Result<i32> {
    let (thresholds, catalog) = prepare(&config.app)?;
    let quiet = config.app.behavior.quiet;

    let mut samples = Vec::new();
    for path in &config.sample_paths {
        let loaded = load_samples_with_context(path, quiet).map_err(|source| PipelineError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;
        samples.extend(loaded);
    }

    let engine = GradingEngine::new(thresholds, catalog);
    let results = engine.evaluate_batch(&samples, config.inspected_at);

    let mut reports = Vec::with_capacity(results.len());
    let mut validation_failures = 0;
    for (sample, result) in samples.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(GradingError::Validation(errors)) => {
                validation_failures += 1;
                tracing::error!("Batch {} not graded: {}", sample.batch_number, errors);
            }
            Err(source) => {
                return Err(PipelineError::EvaluationFailed {
                    batch: sample.batch_number.clone(),
                    source,
                }
                .into());
            }
        }
    }

    if !quiet {
        tracing::info!(
            "Graded {} of {} sample(s)",
            reports.len(),
            samples.len()
        );
    }

    if !reports.is_empty() {
        output_reports(&reports, &config.app.output, quiet)?;
    }

    Ok(grade_exit_code(&reports, validation_failures, config.app.behavior.min_grade))
}
