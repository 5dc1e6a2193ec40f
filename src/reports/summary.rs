//! Summary report generators for shell output.
//!
//! [`SummaryReporter`] prints a compact block per report; [`TableReporter`]
//! prints one aligned row per report, which reads better for batch runs.

use super::{QualityReport, ReportError, ReportFormat, ReportGenerator};
use crate::model::SeverityClass;
use crate::quality::Grade;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A1 => "green",
        Grade::A2 => "yellow",
        Grade::B => "red",
    }
}

const fn severity_color(severity: SeverityClass) -> &'static str {
    match severity {
        SeverityClass::Critical => "red",
        SeverityClass::Major => "yellow",
        SeverityClass::Minor => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError> {
        let header = &report.header;
        let mut lines = Vec::new();

        lines.push(self.color(&format!("Fabric Inspection: {}", header.batch_number), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!("{}  {}", self.color("Order:", "cyan"), header.order_reference));
        lines.push(format!("{}  {}", self.color("Fabric:", "cyan"), header.fabric_type));
        lines.push(format!(
            "{}  {} x {} ({} weight)",
            self.color("Roll:", "cyan"),
            header.total_length,
            header.total_width,
            header.weight
        ));
        if let Some(at) = header.inspected_at {
            lines.push(format!(
                "{}  {}",
                self.color("Inspected:", "cyan"),
                at.format("%Y-%m-%d %H:%M UTC")
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{}  {} {}",
            self.color("Grade:", "bold"),
            self.color(report.grade.letter(), grade_color(report.grade)),
            self.color(&format!("({})", report.grade.description()), "dim")
        ));
        lines.push(format!(
            "{}  {:.1} total, {:.2} per 100",
            self.color("Points:", "cyan"),
            report.total_points,
            report.normalized_score
        ));
        lines.push(format!("{}  {}", self.color("Rationale:", "cyan"), report.rationale));

        if !report.defects.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Defects:", "bold"));
            for severity in SeverityClass::all() {
                let tally = report.summary.tally(severity);
                if tally.count > 0 {
                    lines.push(format!(
                        "  {}",
                        self.color(
                            &format!("{severity}: {} ({:.1} pts)", tally.count, tally.points),
                            severity_color(severity)
                        )
                    ));
                }
            }
            for defect in &report.defects {
                let marker = if defect.unresolved { "?" } else { "-" };
                lines.push(format!("  {marker} {}", defect.description()));
            }
        }

        if report.has_warnings() {
            lines.push(String::new());
            lines.push(self.color("Warnings:", "bold"));
            for warning in &report.warnings {
                lines.push(format!("  {}", self.color(&warning.message(), "yellow")));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output with aligned columns
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self) -> Vec<String> {
        vec![
            format!(
                "{} {} {} {} {} {}",
                self.color(&pad("BATCH", 16), "bold"),
                self.color(&pad("FABRIC", 24), "bold"),
                self.color(&pad("GRADE", 6), "bold"),
                self.color(&pad("PTS/100", 9), "bold"),
                self.color(&pad("C/MA/MI", 10), "bold"),
                self.color("WARN", "bold")
            ),
            "─".repeat(72),
        ]
    }

    fn row(&self, report: &QualityReport) -> String {
        let counts = format!(
            "{}/{}/{}",
            report.summary.critical.count, report.summary.major.count, report.summary.minor.count
        );
        format!(
            "{} {} {} {} {} {}",
            pad(&truncate(&report.header.batch_number, 16), 16),
            pad(&truncate(&report.header.fabric_type, 24), 24),
            self.color(&pad(report.grade.letter(), 6), grade_color(report.grade)),
            pad(&format!("{:.2}", report.normalized_score), 9),
            pad(&counts, 10),
            report.warnings.len()
        )
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError> {
        self.generate_batch(std::slice::from_ref(report))
    }

    fn generate_batch(&self, reports: &[QualityReport]) -> Result<String, ReportError> {
        let mut lines = self.header();
        lines.extend(reports.iter().map(|r| self.row(r)));

        let count = |grade: Grade| reports.iter().filter(|r| r.grade == grade).count();
        lines.push(String::new());
        lines.push(format!(
            "Total: {} samples | A1: {}, A2: {}, B: {}",
            reports.len(),
            count(Grade::A1),
            count(Grade::A2),
            count(Grade::B)
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Right-pad to a display width, counting wide characters as two columns
fn pad(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    if used >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - used))
    }
}

/// Truncate a string to fit within `max_width` display columns
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}
