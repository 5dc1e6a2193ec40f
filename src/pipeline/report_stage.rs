//! Report output stage.
//!
//! Renders graded reports in the configured format and decides the process
//! exit code.

use super::{exit_codes, should_use_color, write_output, OutputTarget};
use crate::config::OutputConfig;
use crate::quality::Grade;
use crate::reports::{create_batch_reporter, create_reporter_with_options, QualityReport};
use anyhow::Result;

/// Render reports and write them to the configured destination.
///
/// A single report uses the per-sample renderer; several reports use the batch
/// renderer (an aligned table for the summary format).
pub fn output_reports(reports: &[QualityReport], output: &OutputConfig, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let colored = should_use_color(output.no_color, &target);

    let rendered = if let [report] = reports {
        create_reporter_with_options(output.format, colored).generate(report)?
    } else {
        create_batch_reporter(output.format, colored).generate_batch(reports)?
    };

    write_output(&rendered, &target, quiet)
}

/// Exit code for a finished run.
///
/// Validation failures outrank grade failures, which outrank success.
#[must_use]
pub fn grade_exit_code(reports: &[QualityReport], validation_failures: usize, min_grade: Option<Grade>) -> i32 {
    if validation_failures > 0 {
        return exit_codes::VALIDATION_FAILED;
    }

    let Some(min) = min_grade else {
        return exit_codes::SUCCESS;
    };

    let below: Vec<_> = reports.iter().filter(|r| !r.grade.is_at_least(min)).collect();
    for report in &below {
        tracing::error!(
            "Batch {} graded {} which is below the minimum grade {}",
            report.header.batch_number,
            report.grade,
            min
        );
    }

    if below.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::BELOW_MIN_GRADE
    }
}
