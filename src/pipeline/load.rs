//! Sample loading.
//!
//! A sample file holds either one inspection sample or a list of them, as
//! JSON (`.json`) or YAML (anything else).

use crate::error::{GradingError, Result};
use crate::model::InspectionSample;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format of a sample file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Json,
    Yaml,
}

impl SampleFormat {
    /// Pick the format from the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn decode<T: DeserializeOwned>(content: &str, format: SampleFormat, context: &str) -> Result<T> {
    match format {
        SampleFormat::Json => {
            serde_json::from_str(content).map_err(|e| GradingError::parse(context, e))
        }
        SampleFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| GradingError::parse(context, e))
        }
    }
}

/// Parse one sample or a list of samples from a string.
pub fn parse_samples_str(content: &str, format: SampleFormat) -> Result<Vec<InspectionSample>> {
    let is_list = match format {
        SampleFormat::Json => content.trim_start().starts_with('['),
        SampleFormat::Yaml => matches!(
            serde_yaml::from_str::<serde_yaml::Value>(content),
            Ok(serde_yaml::Value::Sequence(_))
        ),
    };

    if is_list {
        decode(content, format, "sample list")
    } else {
        decode(content, format, "sample").map(|sample| vec![sample])
    }
}

/// Load every sample in a file.
pub fn load_samples(path: &Path) -> Result<Vec<InspectionSample>> {
    let content = std::fs::read_to_string(path).map_err(|e| GradingError::io(path, e))?;
    parse_samples_str(&content, SampleFormat::from_path(path)).map_err(|e| match e {
        GradingError::Parse { message, .. } => GradingError::parse(path.display().to_string(), message),
        other => other,
    })
}

/// Load a file that must contain exactly one sample.
pub fn load_sample(path: &Path) -> Result<InspectionSample> {
    let mut samples = load_samples(path)?;
    if samples.len() != 1 {
        return Err(GradingError::parse(
            path.display().to_string(),
            format!("expected exactly one sample, found {}", samples.len()),
        ));
    }
    Ok(samples.remove(0))
}

/// Load samples with context for CLI error messages
pub fn load_samples_with_context(path: &Path, quiet: bool) -> anyhow::Result<Vec<InspectionSample>> {
    if !quiet {
        tracing::info!("Loading samples: {}", path.display());
    }

    let samples = load_samples(path)
        .with_context(|| format!("Failed to load samples from {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} sample(s)", samples.len());
    }
    Ok(samples)
}
