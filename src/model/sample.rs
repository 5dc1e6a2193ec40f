//! The fabric roll under inspection.

use serde::{Deserialize, Serialize};

use super::defect::DefectObservation;
use crate::error::ValidationErrors;
use crate::quality::LengthPolicy;

/// The fabric roll (and its metadata) currently under quality evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionSample {
    pub batch_number: String,
    pub order_reference: String,
    pub fabric_type: String,
    /// Roll length in length units; the normalization basis
    pub total_length: f64,
    pub total_width: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Observations in the order they were recorded
    #[serde(default)]
    pub observations: Vec<DefectObservation>,
}

impl InspectionSample {
    pub fn new(
        batch_number: impl Into<String>,
        order_reference: impl Into<String>,
        fabric_type: impl Into<String>,
    ) -> Self {
        Self {
            batch_number: batch_number.into(),
            order_reference: order_reference.into(),
            fabric_type: fabric_type.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_measurements(mut self, total_length: f64, total_width: f64, weight: f64) -> Self {
        self.total_length = total_length;
        self.total_width = total_width;
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_observation(mut self, observation: DefectObservation) -> Self {
        self.observations.push(observation);
        self
    }

    /// Look up an observation by id
    #[must_use]
    pub fn observation(&self, id: &str) -> Option<&DefectObservation> {
        self.observations.iter().find(|o| o.id == id)
    }

    /// Validate identifiers and measurements.
    ///
    /// `total_length` is only checked for being a finite number here; whether a
    /// non-positive length is fatal depends on the configured length policy.
    /// Every problem is reported, not just the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.field_errors().into_result()
    }

    /// Validate as [`validate`](Self::validate) does, and also reject a
    /// non-positive `total_length` when the policy is [`LengthPolicy::Reject`].
    pub fn validate_with(&self, policy: LengthPolicy) -> Result<(), ValidationErrors> {
        let mut errors = self.field_errors();
        if policy == LengthPolicy::Reject && self.total_length.is_finite() && self.total_length <= 0.0 {
            errors.push(
                "total_length",
                format!("must be a positive number, got {}", self.total_length),
            );
        }
        errors.into_result()
    }

    fn field_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("batch_number", &self.batch_number),
            ("order_reference", &self.order_reference),
            ("fabric_type", &self.fabric_type),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "must not be blank");
            }
        }

        for (field, value) in [("total_width", self.total_width), ("weight", self.weight)] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(field, format!("must be a positive number, got {value}"));
            }
        }

        if !self.total_length.is_finite() {
            errors.push("total_length", format!("must be a finite number, got {}", self.total_length));
        }

        for (i, obs) in self.observations.iter().enumerate() {
            for (name, value) in [("width", obs.width), ("length", obs.length)] {
                if let Some(v) = value {
                    if !v.is_finite() || v <= 0.0 {
                        errors.push(
                            format!("observations[{i}].{name}"),
                            format!("must be a positive number when given, got {v}"),
                        );
                    }
                }
            }
            if !obs.length_offset.is_finite() || obs.length_offset < 0.0 {
                errors.push(
                    format!("observations[{i}].length_offset"),
                    format!("must not be negative, got {}", obs.length_offset),
                );
            }
        }

        errors
    }
}
