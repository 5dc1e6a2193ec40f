//! Grade command handler.
//!
//! Implements the `grade` subcommand: grade one sample file and print its report.

use super::prepare;
use crate::config::AppConfig;
use crate::error::GradingError;
use crate::pipeline::{exit_codes, grade_exit_code, load_sample, output_reports};
use crate::quality::evaluate_at;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Grade command configuration
pub struct GradeConfig {
    pub sample_path: PathBuf,
    pub app: AppConfig,
    /// Timestamp recorded on the report
    pub inspected_at: Option<DateTime<Utc>>,
}

/// Run the grade command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_grade(config: GradeConfig) -> Result<i32> {
    let (thresholds, catalog) = prepare(&config.app)?;
    let quiet = config.app.behavior.quiet;

    if !quiet {
        tracing::info!("Grading sample: {}", config.sample_path.display());
    }
    let sample = load_sample(&config.sample_path)
        .with_context(|| format!("Failed to load sample from {}", config.sample_path.display()))?;

    let report = match evaluate_at(&sample, &thresholds, &catalog, config.inspected_at) {
        Ok(report) => report,
        Err(GradingError::Validation(errors)) => {
            for error in &errors {
                tracing::error!("{}: {}", error.field, error.message);
            }
            return Ok(exit_codes::VALIDATION_FAILED);
        }
        Err(other) => return Err(other.into()),
    };

    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }

    output_reports(std::slice::from_ref(&report), &config.app.output, quiet)?;
    Ok(grade_exit_code(
        std::slice::from_ref(&report),
        0,
        config.app.behavior.min_grade,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Grade;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir, total_width: f64, defect: &str) -> PathBuf {
        let path = dir.path().join("roll.yaml");
        let yaml = format!(
            "batch_number: B-1\norder_reference: SO-1\nfabric_type: Poplin\n\
             total_length: 50\ntotal_width: {total_width}\nweight: 10\n\
             observations:\n  - defect_type_id: {defect}\n    position: center\n"
        );
        std::fs::write(&path, yaml).unwrap();
        path
    }

    fn config(sample_path: PathBuf, out: PathBuf, min_grade: Option<Grade>) -> GradeConfig {
        GradeConfig {
            sample_path,
            app: AppConfig::builder()
                .output_format(ReportFormat::Json)
                .output_file(Some(out))
                .min_grade(min_grade)
                .quiet(true)
                .build(),
            inspected_at: None,
        }
    }

    #[test]
    fn test_grade_writes_report_and_checks_min_grade() {
        let tmp = TempDir::new().unwrap();
        let sample = write_sample(&tmp, 150.0, "hole");
        let out = tmp.path().join("report.json");

        // 18 points over 50 → 36 per 100 → B
        let code = run_grade(config(sample.clone(), out.clone(), Some(Grade::A2))).unwrap();
        assert_eq!(code, exit_codes::BELOW_MIN_GRADE);

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["report"]["grade"], "B");

        assert_eq!(run_grade(config(sample, out, None)).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_invalid_sample_returns_validation_code() {
        let tmp = TempDir::new().unwrap();
        let sample = write_sample(&tmp, 0.0, "hole");
        let out = tmp.path().join("report.json");

        let code = run_grade(config(sample, out.clone(), None)).unwrap();
        assert_eq!(code, exit_codes::VALIDATION_FAILED);
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_sample_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = run_grade(config(tmp.path().join("missing.yaml"), tmp.path().join("r.json"), None));
        assert!(result.is_err());
    }
}
