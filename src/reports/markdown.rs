//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{QualityReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::SeverityClass;
use std::fmt::Write as _;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include the per-defect table
    include_defects: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_defects: true,
        }
    }

    /// Only render the header, summary and warnings
    #[must_use]
    pub const fn summary_only(mut self) -> Self {
        self.include_defects = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError> {
        let header = &report.header;
        let mut md = String::new();

        writeln!(md, "# Fabric Inspection Report: {}", escape_markdown_inline(&header.batch_number))?;
        writeln!(md)?;
        writeln!(md, "| Field | Value |")?;
        writeln!(md, "|-------|-------|")?;
        writeln!(md, "| Batch | {} |", escape_markdown_table(&header.batch_number))?;
        writeln!(md, "| Order | {} |", escape_markdown_table(&header.order_reference))?;
        writeln!(md, "| Fabric | {} |", escape_markdown_table(&header.fabric_type))?;
        writeln!(md, "| Length | {} |", header.total_length)?;
        writeln!(md, "| Width | {} |", header.total_width)?;
        writeln!(md, "| Weight | {} |", header.weight)?;
        if let Some(at) = header.inspected_at {
            writeln!(md, "| Inspected | {} |", at.to_rfc3339())?;
        }
        writeln!(md, "| Thresholds | {} |", escape_markdown_table(&report.thresholds_name))?;
        writeln!(md)?;

        writeln!(md, "## Result")?;
        writeln!(md)?;
        writeln!(
            md,
            "**Grade {}** ({}): {:.2} points per 100 length units, {:.1} points total.",
            report.grade,
            report.grade.description(),
            report.normalized_score,
            report.total_points
        )?;
        writeln!(md)?;
        writeln!(md, "> {}", escape_markdown_inline(&report.rationale))?;
        writeln!(md)?;

        writeln!(md, "| Severity | Count | Points |")?;
        writeln!(md, "|----------|-------|--------|")?;
        for severity in SeverityClass::all() {
            let tally = report.summary.tally(severity);
            writeln!(md, "| {severity} | {} | {:.1} |", tally.count, tally.points)?;
        }
        writeln!(md)?;

        if self.include_defects && !report.defects.is_empty() {
            writeln!(md, "## Defects")?;
            writeln!(md)?;
            writeln!(md, "| # | Type | Severity | Position | Offset | Size | Points | Note |")?;
            writeln!(md, "|---|------|----------|----------|--------|------|--------|------|")?;
            for defect in &report.defects {
                let label = defect.name.as_deref().unwrap_or(&defect.defect_type_id);
                writeln!(
                    md,
                    "| {} | {} | {} | {} | {:.1} | {:.1} x {:.1} | {} | {} |",
                    escape_markdown_table(&defect.observation_id),
                    escape_markdown_table(label),
                    defect.severity.map_or_else(|| "unscored".to_string(), |s| s.to_string()),
                    defect.position,
                    defect.length_offset,
                    defect.width,
                    defect.length,
                    defect.points.map_or_else(|| "-".to_string(), |p| format!("{p:.1}")),
                    defect.note.as_deref().map(escape_markdown_table).unwrap_or_default()
                )?;
            }
            writeln!(md)?;
        }

        if report.has_warnings() {
            writeln!(md, "## Warnings")?;
            writeln!(md)?;
            for warning in &report.warnings {
                writeln!(md, "- {}", escape_markdown_inline(&warning.message()))?;
            }
            writeln!(md)?;
        }

        write!(md, "_Scoring engine {}, fingerprint `{}`_", report.engine_version, report.fingerprint)?;
        writeln!(md)?;
        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
