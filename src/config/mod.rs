//! Configuration module for fabric-grade.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values, thresholds included
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fabric_grading::config::{load_or_default, AppConfig};
//! use fabric_grading::quality::{Grade, ThresholdPreset};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ThresholdPreset::Premium);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .preset(ThresholdPreset::Industrial)
//!     .min_grade(Some(Grade::A2))
//!     .build();
//!
//! // Load from file
//! let (config, loaded_from) = load_or_default(None);
//! let thresholds = config.resolve_thresholds();
//! ```
//!
//! # Configuration File
//!
//! Place a `.fabric-grade.yaml` file in your working directory or
//! `~/.config/fabric-grade/`:
//!
//! ```yaml
//! preset: premium
//! output:
//!   format: json
//! behavior:
//!   min_grade: A2
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{AppConfig, AppConfigBuilder, BehaviorConfig, CatalogConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.fabric-grade.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
