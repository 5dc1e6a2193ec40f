//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod batch;
mod catalog;
mod grade;

pub use batch::{run_batch, BatchConfig};
pub use catalog::{run_catalog, CatalogListFormat};
pub use grade::{run_grade, GradeConfig};

use crate::catalog::StaticCatalog;
use crate::config::{AppConfig, Validatable};
use crate::quality::QualityThresholds;
use anyhow::{bail, Context, Result};

/// Validate the effective configuration and resolve what an evaluation needs.
fn prepare(app: &AppConfig) -> Result<(QualityThresholds, StaticCatalog)> {
    let errors = app.validate();
    if !errors.is_empty() {
        let joined = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        bail!("Invalid configuration: {joined}");
    }

    let thresholds = app.resolve_thresholds();
    let catalog = app.load_catalog().context("Failed to load defect catalog")?;
    tracing::debug!(
        "Grading with '{}' thresholds and {} defect types",
        thresholds.name,
        catalog.len()
    );
    Ok((thresholds, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::ThresholdPreset;

    #[test]
    fn test_prepare_resolves_preset() {
        let (thresholds, catalog) = prepare(&AppConfig::from_preset(ThresholdPreset::Premium)).unwrap();
        assert_eq!(thresholds.name, "premium");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_prepare_rejects_invalid_thresholds() {
        let mut thresholds = QualityThresholds::default();
        thresholds.reference_area = -1.0;
        let app = AppConfig::builder().thresholds(thresholds).build();
        let err = prepare(&app).unwrap_err();
        assert!(err.to_string().contains("thresholds.reference_area"));
    }
}
