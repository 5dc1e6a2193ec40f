//! Fabric quality grading engine.
//!
//! Turns a list of defect observations on an inspected roll into a weighted,
//! length-normalized defect score and a grade (A1 / A2 / B), in the spirit of
//! the four-point and ten-point fabric inspection systems.
//!
//! # Pipeline
//!
//! 1. **Scoring**: resolve each observation against the [`DefectCatalog`] and
//!    weight it by size and position ([`score_observations`])
//! 2. **Normalization**: rescale total points to 100 length units ([`normalize`])
//! 3. **Classification**: ordered A1 / A2 / B rules ([`classify`])
//! 4. **Report**: assemble a deterministic [`QualityReport`]
//!
//! # Usage
//!
//! ```no_run
//! use fabric_grading::catalog::StaticCatalog;
//! use fabric_grading::model::{DefectObservation, DefectPosition, InspectionSample};
//! use fabric_grading::quality::{evaluate, QualityThresholds};
//!
//! let sample = InspectionSample::new("B-1001", "SO-42", "Denim")
//!     .with_measurements(100.0, 150.0, 32.5)
//!     .with_observation(DefectObservation::new("obs-1", "slub", DefectPosition::Center));
//!
//! let report = evaluate(&sample, &QualityThresholds::default(), &StaticCatalog::standard())?;
//! println!("Grade {} ({:.2} pts/100)", report.grade, report.normalized_score);
//! # Ok::<(), fabric_grading::GradingError>(())
//! ```
//!
//! [`DefectCatalog`]: crate::catalog::DefectCatalog
//! [`QualityReport`]: crate::reports::QualityReport

mod classifier;
mod engine;
mod normalize;
mod scoring;
mod thresholds;
mod warnings;

pub use classifier::{classify, Classification, Grade};
pub use engine::{evaluate, evaluate_at, GradingEngine};
pub use normalize::{normalize, NormalizedScore, FALLBACK_LENGTH, NORMALIZATION_BASIS};
pub use scoring::{score_observations, ScoreOutcome, ScoredObservation, SeveritySummary, SeverityTally};
pub use thresholds::{GradeLimits, LengthPolicy, PositionFactors, QualityThresholds, ThresholdPreset};
pub use warnings::ReportWarning;

/// Scoring engine version recorded in every report
pub const SCORING_ENGINE_VERSION: &str = "1.0";
