//! Configuration validation for fabric-grade.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, CatalogConfig, OutputConfig};
use crate::quality::{GradeLimits, PositionFactors, QualityThresholds};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefix the field path with a parent section
    fn nested(self, parent: &str) -> Self {
        Self {
            field: format!("{parent}.{}", self.field),
            message: self.message,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_positive(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ConfigError::new(
            field,
            format!("Must be a positive number, got {value}"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref thresholds) = self.thresholds {
            errors.extend(thresholds.validate().into_iter().map(|e| e.nested("thresholds")));
        }
        errors.extend(self.catalog.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for QualityThresholds {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("name", "Threshold set name must not be blank"));
        }

        errors.extend(self.a1.validate().into_iter().map(|e| e.nested("a1")));
        errors.extend(self.a2.validate().into_iter().map(|e| e.nested("a2")));
        errors.extend(
            self.position_factors
                .validate()
                .into_iter()
                .map(|e| e.nested("position_factors")),
        );

        check_positive(&mut errors, "reference_area", self.reference_area);
        check_positive(&mut errors, "area_factor_constant", self.area_factor_constant);
        check_positive(&mut errors, "default_defect_dimension", self.default_defect_dimension);

        // A1 must be at least as strict as A2
        for (field, a1, a2) in [
            (
                "critical_defect_limit",
                f64::from(self.a1.critical_defect_limit),
                f64::from(self.a2.critical_defect_limit),
            ),
            (
                "major_defect_limit",
                f64::from(self.a1.major_defect_limit),
                f64::from(self.a2.major_defect_limit),
            ),
            (
                "minor_defect_limit",
                f64::from(self.a1.minor_defect_limit),
                f64::from(self.a2.minor_defect_limit),
            ),
            (
                "normalized_point_threshold",
                self.a1.normalized_point_threshold,
                self.a2.normalized_point_threshold,
            ),
        ] {
            if a1 > a2 {
                errors.push(ConfigError::new(
                    format!("a1.{field}"),
                    format!("A1 limit {a1} is looser than the A2 limit {a2}"),
                ));
            }
        }

        errors
    }
}

impl Validatable for GradeLimits {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let threshold = self.normalized_point_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            errors.push(ConfigError::new(
                "normalized_point_threshold",
                format!("Must be a non-negative number, got {threshold}"),
            ));
        }
        errors
    }
}

impl Validatable for PositionFactors {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("center", self.center),
            ("left_edge", self.left_edge),
            ("right_edge", self.right_edge),
            ("full_width", self.full_width),
            ("default", self.default),
        ] {
            check_positive(&mut errors, field, value);
        }
        errors
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref path) = self.path {
            if !path.exists() {
                errors.push(ConfigError::new(
                    "catalog.path",
                    format!("Catalog file does not exist: {}", path.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::ThresholdPreset;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_all_presets_are_valid() {
        for preset in ThresholdPreset::all() {
            let errors = preset.thresholds().validate();
            assert!(errors.is_empty(), "{preset}: {errors:?}");
        }
    }

    #[test]
    fn test_nested_field_paths() {
        let mut thresholds = QualityThresholds::default();
        thresholds.a1.normalized_point_threshold = -1.0;
        thresholds.position_factors.center = 0.0;
        let config = AppConfig {
            thresholds: Some(thresholds),
            ..AppConfig::default()
        };

        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"thresholds.a1.normalized_point_threshold".to_string()));
        assert!(fields.contains(&"thresholds.position_factors.center".to_string()));
    }

    #[test]
    fn test_a1_looser_than_a2_rejected() {
        let mut thresholds = QualityThresholds::default();
        thresholds.a1.minor_defect_limit = 50;
        let errors = thresholds.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "a1.minor_defect_limit");
    }

    #[test]
    fn test_non_positive_constants_rejected() {
        let thresholds = QualityThresholds {
            reference_area: 0.0,
            area_factor_constant: f64::NAN,
            ..QualityThresholds::default()
        };
        let fields: Vec<_> = thresholds.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["reference_area", "area_factor_constant"]);
    }

    #[test]
    fn test_missing_catalog_and_output_dir() {
        let config = AppConfig::builder()
            .catalog_path(Some(PathBuf::from("/nonexistent/catalog.yaml")))
            .output_file(Some(PathBuf::from("/nonexistent/dir/report.json")))
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].to_string(), "output.file: Parent directory does not exist: /nonexistent/dir");
    }
}
