//! Quality report assembly and rendering.
//!
//! [`build_report`] turns engine outputs into an immutable [`QualityReport`];
//! the reporters render one or many reports in several formats:
//! - Summary: Compact terminal output, optionally colored
//! - JSON: Structured data for the persistence layer or other tools
//! - Markdown: Human-readable documentation
//! - CSV: One row per defect, for spreadsheets
//!
//! Free-text fields (batch numbers, notes) come from operators and are escaped
//! before being embedded in Markdown or CSV.

mod csv;
pub mod escape;
mod json;
mod markdown;
mod report;
mod summary;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use report::{build_report, DefectLine, QualityReport, ReportHeader};
pub use summary::{SummaryReporter, TableReporter};
pub use types::ReportFormat;

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for crate::error::GradingError {
    fn from(err: ReportError) -> Self {
        Self::Report(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a single report
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError>;

    /// Render several reports, e.g. from a batch run
    fn generate_batch(&self, reports: &[QualityReport]) -> Result<String, ReportError> {
        let rendered = reports
            .iter()
            .map(|r| self.generate(r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join("\n"))
    }

    /// Write a report to a writer
    fn write_report(&self, report: &QualityReport, writer: &mut dyn Write) -> Result<(), ReportError> {
        let rendered = self.generate(report)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if colored {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}

/// Create a generator for multi-sample output.
///
/// The summary format switches to an aligned table with one row per sample.
#[must_use]
pub fn create_batch_reporter(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary if colored => Box::new(TableReporter::new()),
        ReportFormat::Summary => Box::new(TableReporter::new().no_color()),
        other => create_reporter_with_options(other, colored),
    }
}
