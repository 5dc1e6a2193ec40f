//! Defect catalog: the registry mapping defect-type ids to severity and base points.
//!
//! The engine only depends on the [`DefectCatalog`] lookup capability; where the
//! definitions come from (a YAML file, a database, the built-in list) is up to
//! the caller. [`StaticCatalog`] is the in-memory implementation and validates
//! its entries once, when it is built.

mod standard;
mod static_catalog;

pub use static_catalog::{CatalogDocument, StaticCatalog};

use crate::model::DefectTypeDefinition;
use std::path::PathBuf;
use thiserror::Error;

/// Lookup capability required by the scoring engine.
///
/// An unresolved id is not an error: the engine turns it into a warning and
/// excludes the observation from scoring.
pub trait DefectCatalog {
    /// Resolve a defect-type id
    fn lookup(&self, defect_type_id: &str) -> Option<&DefectTypeDefinition>;

    /// Closest known id for an unresolved one, used to annotate warnings
    fn suggest(&self, _defect_type_id: &str) -> Option<String> {
        None
    }
}

impl<C: DefectCatalog + ?Sized> DefectCatalog for &C {
    fn lookup(&self, defect_type_id: &str) -> Option<&DefectTypeDefinition> {
        (**self).lookup(defect_type_id)
    }

    fn suggest(&self, defect_type_id: &str) -> Option<String> {
        (**self).suggest(defect_type_id)
    }
}

/// Errors raised while building or loading a catalog
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("Duplicate defect type id: {0}")]
    DuplicateId(String),

    #[error("Duplicate defect type code: {0}")]
    DuplicateCode(String),

    #[error("Defect type '{id}' has invalid base points {value} (must be a positive number)")]
    InvalidBasePoints { id: String, value: f64 },

    #[error("Defect type has a blank {field} (id: '{id}')")]
    BlankField { field: &'static str, id: String },

    #[error("Invalid catalog document: {0}")]
    Parse(String),

    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
