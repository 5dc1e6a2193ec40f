//! Data model for fabric inspection.
//!
//! Observations carry only what the inspector recorded; severity and points
//! are always derived from the catalog by the scoring engine.

mod defect;
mod sample;

pub use defect::{DefectObservation, DefectPosition, DefectTypeDefinition, SeverityClass};
pub use sample::InspectionSample;
