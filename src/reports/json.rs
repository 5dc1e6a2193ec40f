//! JSON report generator.

use super::{QualityReport, ReportError, ReportFormat, ReportGenerator};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

const TOOL: ToolInfo = ToolInfo {
    name: "fabric-grade",
    version: env!("CARGO_PKG_VERSION"),
};

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: ToolInfo,
    report: &'a QualityReport,
}

#[derive(Serialize)]
struct JsonBatchReport<'a> {
    tool: ToolInfo,
    reports: &'a [QualityReport],
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &QualityReport) -> Result<String, ReportError> {
        self.serialize(&JsonReport { tool: TOOL, report })
    }

    fn generate_batch(&self, reports: &[QualityReport]) -> Result<String, ReportError> {
        self.serialize(&JsonBatchReport { tool: TOOL, reports })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
