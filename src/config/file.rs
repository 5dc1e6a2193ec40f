//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::quality::ThresholdPreset;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".fabric-grade.yaml",
    ".fabric-grade.yml",
    "fabric-grade.yaml",
    "fabric-grade.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/fabric-grade/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let search_dirs = [
        cwd.clone(),
        cwd.as_deref().and_then(find_git_root),
        dirs::config_dir().map(|d| d.join("fabric-grade")),
        dirs::home_dir(),
    ];

    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for crate::error::GradingError {
    fn from(err: ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// A file that exists but fails to load is logged and ignored.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, which is how CLI
    /// arguments are layered over file config.
    pub fn merge(&mut self, other: &Self) {
        if other.preset != ThresholdPreset::default() {
            self.preset = other.preset;
        }
        if other.thresholds.is_some() {
            self.thresholds.clone_from(&other.thresholds);
        }
        if other.length_policy.is_some() {
            self.length_policy = other.length_policy;
        }

        if other.catalog.path.is_some() {
            self.catalog.path.clone_from(&other.catalog.path);
        }

        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.min_grade.is_some() {
            self.behavior.min_grade = other.behavior.min_grade;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Fabric Grading Configuration
# Place this file at .fabric-grade.yaml in your working directory or ~/.config/fabric-grade/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Fabric Grading Configuration File
# =================================
#
# Place it at:
#   - .fabric-grade.yaml in your working directory
#   - ~/.config/fabric-grade/fabric-grade.yaml for global config
#
# CLI arguments always override file settings.

# Threshold preset: standard, premium, industrial
preset: standard

# Length policy for rolls with a zero or negative total length:
#   reject          - fail validation (default)
#   legacy_fallback - normalize against a length of 1 and flag the report
# length_policy: reject

# Full threshold override (missing fields take standard values)
# thresholds:
#   name: customer-x
#   a1:
#     critical_defect_limit: 0
#     major_defect_limit: 2
#     minor_defect_limit: 4
#     normalized_point_threshold: 7.0
#   a2:
#     critical_defect_limit: 1
#     major_defect_limit: 5
#     minor_defect_limit: 10
#     normalized_point_threshold: 20.0
#   position_factors:
#     center: 1.2
#     left_edge: 0.8
#     right_edge: 0.8
#     full_width: 1.0
#     default: 1.0
#   reference_area: 25.0
#   area_factor_constant: 1.5
#   default_defect_dimension: 5.0

# Defect catalog file, YAML or JSON (omit path for the built-in textile catalog)
#   catalog:
#     path: ./defect-catalog.yaml
catalog: {}

# Output configuration
output:
  # Format: summary, json, markdown, csv
  format: summary
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if a sample grades below this (A1, A2, B)
  # min_grade: A2
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
