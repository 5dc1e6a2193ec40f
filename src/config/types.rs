//! Configuration types for fabric-grade.

use crate::catalog::{CatalogError, StaticCatalog};
use crate::quality::{Grade, LengthPolicy, QualityThresholds, ThresholdPreset};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// File settings are layered under CLI arguments with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Named threshold preset used when no explicit thresholds are given
    pub preset: ThresholdPreset,
    /// Complete threshold override; missing fields take standard values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<QualityThresholds>,
    /// Override the length policy of the selected thresholds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_policy: Option<LengthPolicy>,
    /// Defect catalog source
    pub catalog: CatalogConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Create an `AppConfig` that grades with a preset.
    #[must_use]
    pub fn from_preset(preset: ThresholdPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Thresholds to grade with: the explicit override if present, otherwise
    /// the preset, with the length policy override applied last.
    #[must_use]
    pub fn resolve_thresholds(&self) -> QualityThresholds {
        let mut thresholds = self
            .thresholds
            .clone()
            .unwrap_or_else(|| self.preset.thresholds());
        if let Some(policy) = self.length_policy {
            thresholds.length_policy = policy;
        }
        thresholds
    }

    /// Load the configured catalog, or the built-in one when no path is set.
    pub fn load_catalog(&self) -> Result<StaticCatalog, CatalogError> {
        match &self.catalog.path {
            Some(path) => StaticCatalog::load(path),
            None => Ok(StaticCatalog::standard()),
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the threshold preset.
    pub const fn preset(mut self, preset: ThresholdPreset) -> Self {
        self.config.preset = preset;
        self
    }

    /// Use explicit thresholds instead of a preset.
    pub fn thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.config.thresholds = Some(thresholds);
        self
    }

    /// Override the length policy.
    pub const fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.config.length_policy = Some(policy);
        self
    }

    /// Set the defect catalog file.
    pub fn catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.catalog.path = path;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Fail when a sample grades below this.
    pub const fn min_grade(mut self, grade: Option<Grade>) -> Self {
        self.config.behavior.min_grade = grade;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Where defect type definitions come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML or JSON catalog file; the built-in textile catalog when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with a failure code when a sample grades below this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<Grade>,
    /// Suppress non-essential output
    pub quiet: bool,
}
