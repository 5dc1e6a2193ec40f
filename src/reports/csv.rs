//! CSV report generator.
//!
//! One row per recorded observation, prefixed with the sample's identity and
//! grade, suitable for spreadsheet import. A sample without observations still
//! gets a single row so batch exports list every roll.

use super::escape::escape_csv;
use super::{DefectLine, QualityReport, ReportError, ReportFormat, ReportGenerator};
use std::fmt::Write as _;

const HEADER: &str = "batch_number,order_reference,fabric_type,grade,total_points,normalized_score,\
observation_id,defect_type_id,code,severity,position,length_offset,width,length,points,note";

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn write_rows(content: &mut String, report: &QualityReport) -> Result<(), ReportError> {
        let prefix = format!(
            "{},{},{},{},{:.1},{:.2}",
            escape_csv(&report.header.batch_number),
            escape_csv(&report.header.order_reference),
            escape_csv(&report.header.fabric_type),
            report.grade,
            report.total_points,
            report.normalized_score
        );

        if report.defects.is_empty() {
            writeln!(content, "{prefix},,,,,,,,,,")?;
            return Ok(());
        }
        for defect in &report.defects {
            writeln!(content, "{prefix},{}", defect_columns(defect))?;
        }
        Ok(())
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn defect_columns(defect: &DefectLine) -> String {
    format!(
        "{},{},{},{},{},{:.1},{:.1},{:.1},{},{}",
        escape_csv(&defect.observation_id),
        escape_csv(&defect.defect_type_id),
        defect.code.as_deref().map(escape_csv).unwrap_or_default(),
        defect.severity.map(|s| s.to_string()).unwrap_or_default(),
        defect.position,
        defect.length_offset,
        defect.width,
        defect.length,
        defect.points.map(|p| format!("{p:.1}")).unwrap_or_default(),
        defect.note.as_deref().map(escape_csv).unwrap_or_default()
    )
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError> {
        self.generate_batch(std::slice::from_ref(report))
    }

    fn generate_batch(&self, reports: &[QualityReport]) -> Result<String, ReportError> {
        let mut content = String::new();
        writeln!(content, "{HEADER}")?;
        for report in reports {
            Self::write_rows(&mut content, report)?;
        }
        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}
