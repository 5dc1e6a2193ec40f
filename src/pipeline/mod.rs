//! Pipeline orchestration for grading runs.
//!
//! Shared load → evaluate → report logic, so the CLI command handlers stay thin.

mod load;
mod output;
mod report_stage;

pub use load::{load_sample, load_samples, load_samples_with_context, parse_samples_str, SampleFormat};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{grade_exit_code, output_reports};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a sample file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// A sample could not be graded
    #[error("Evaluation failed for batch {batch}: {source}")]
    EvaluationFailed {
        batch: String,
        #[source]
        source: crate::error::GradingError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every sample graded at or above the required grade
    pub const SUCCESS: i32 = 0;
    /// At least one sample graded below `--min-grade`
    pub const BELOW_MIN_GRADE: i32 = 1;
    /// At least one sample failed validation and was not graded
    pub const VALIDATION_FAILED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::BELOW_MIN_GRADE, 1);
        assert_eq!(exit_codes::VALIDATION_FAILED, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_evaluation_failed_message() {
        let mut errors = crate::error::ValidationErrors::new();
        errors.push("total_width", "must be a positive number, got 0");
        let err = PipelineError::EvaluationFailed {
            batch: "B-9".to_string(),
            source: errors.into(),
        };
        assert!(err.to_string().starts_with("Evaluation failed for batch B-9: "));
    }
}
