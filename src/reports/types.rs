//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Brief human-readable summary (colored on terminals)
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    Markdown,
    /// CSV for spreadsheet import
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Csv] {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json.trim_matches('"'), format.to_string());
        }
    }
}
