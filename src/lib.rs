//! **A grading engine for inspected fabric rolls.**
//!
//! `fabric-grading` turns the defects recorded while inspecting a roll of fabric
//! into a weighted, length-normalized defect score and a quality grade
//! (A1 / A2 / B). It powers the `fabric-grade` command-line tool and can be
//! embedded in inspection stations, MES back ends or batch reporting jobs.
//!
//! ## Key Features
//!
//! - **Weighted scoring**: every observation is weighted by its catalog base
//!   points, its size relative to a reference area, and where across the width
//!   it sits.
//! - **Length normalization**: points are rescaled to 100 length units so rolls
//!   of different length compare fairly.
//! - **Ordered classification**: A1, then A2, then B, with per-severity count
//!   limits and a point threshold for each grade.
//! - **Configurable standards**: threshold presets plus full YAML overrides;
//!   defect catalogs from YAML or JSON.
//! - **Deterministic reports**: identical inputs produce identical reports,
//!   fingerprinted for audit, rendered as terminal summary, JSON, Markdown or CSV.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the inspected [`InspectionSample`] and its
//!   [`DefectObservation`]s, plus catalog [`DefectTypeDefinition`]s.
//! - **[`catalog`]**: the [`DefectCatalog`] lookup trait and the in-memory
//!   [`StaticCatalog`].
//! - **[`quality`]**: scoring, normalization, classification and the
//!   [`evaluate`] entry point.
//! - **[`reports`]**: the [`QualityReport`] and its renderers.
//! - **[`session`]**: an [`InspectionSession`] that keeps a report in step with
//!   observation edits.
//! - **[`config`]** and **[`pipeline`]**: file configuration and the load,
//!   grade and output steps used by the CLI.
//!
//! ## Getting Started
//!
//! ```
//! use fabric_grading::{evaluate, DefectObservation, DefectPosition, InspectionSample};
//! use fabric_grading::{Grade, QualityThresholds, StaticCatalog};
//!
//! let sample = InspectionSample::new("B-1001", "SO-42", "Denim")
//!     .with_measurements(1000.0, 150.0, 32.5)
//!     .with_observation(DefectObservation::new("obs-1", "slub", DefectPosition::LeftEdge));
//!
//! let report = evaluate(&sample, &QualityThresholds::default(), &StaticCatalog::standard())?;
//! assert_eq!(report.grade, Grade::A1);
//! assert!((report.normalized_score - 0.24).abs() < 1e-9);
//! # Ok::<(), fabric_grading::GradingError>(())
//! ```
//!
//! ### Editing during an inspection
//!
//! ```
//! use fabric_grading::{DefectObservation, DefectPosition, InspectionSample};
//! use fabric_grading::{InspectionSession, QualityThresholds, SessionState, StaticCatalog};
//!
//! let sample = InspectionSample::new("B-1002", "SO-42", "Twill").with_measurements(100.0, 150.0, 30.0);
//! let mut session = InspectionSession::new(sample);
//! let id = session.add_observation(DefectObservation::new("", "hole", DefectPosition::Center))?;
//!
//! session.evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)?;
//! assert_eq!(session.state(), SessionState::Evaluated);
//!
//! session.remove_observation(&id)?;
//! assert!(session.report().is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Defect counts are small; u32/usize to f64 conversions are exact in practice
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod quality;
pub mod reports;
pub mod session;
pub mod utils;

// Re-export main types for convenience
pub use catalog::{CatalogError, DefectCatalog, StaticCatalog};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{FieldError, GradingError, Result, ValidationErrors};
pub use model::{
    DefectObservation, DefectPosition, DefectTypeDefinition, InspectionSample, SeverityClass,
};
pub use quality::{
    evaluate, evaluate_at, Grade, GradingEngine, LengthPolicy, QualityThresholds, ReportWarning,
    ThresholdPreset,
};
pub use reports::{QualityReport, ReportFormat, ReportGenerator};
pub use session::{InspectionSession, SessionError, SessionState};
