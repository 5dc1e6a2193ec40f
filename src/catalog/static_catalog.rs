//! In-memory defect catalog.

use super::{CatalogError, DefectCatalog};
use crate::model::{DefectTypeDefinition, SeverityClass};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Minimum Jaro-Winkler similarity for an id to be offered as a suggestion
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub defect_types: Vec<DefectTypeDefinition>,
}

/// Validated, immutable defect catalog keyed by id in load order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: IndexMap<String, DefectTypeDefinition>,
}

impl StaticCatalog {
    /// Build a catalog, checking id/code uniqueness and base points.
    pub fn new(definitions: Vec<DefectTypeDefinition>) -> Result<Self, CatalogError> {
        let mut entries = IndexMap::with_capacity(definitions.len());
        let mut codes = HashSet::with_capacity(definitions.len());

        for def in definitions {
            if def.id.trim().is_empty() {
                return Err(CatalogError::BlankField {
                    field: "id",
                    id: def.id,
                });
            }
            if def.code.trim().is_empty() {
                return Err(CatalogError::BlankField {
                    field: "code",
                    id: def.id,
                });
            }
            if !def.base_points.is_finite() || def.base_points <= 0.0 {
                return Err(CatalogError::InvalidBasePoints {
                    id: def.id,
                    value: def.base_points,
                });
            }
            if !codes.insert(def.code.clone()) {
                return Err(CatalogError::DuplicateCode(def.code));
            }
            if entries.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
            entries.insert(def.id.clone(), def);
        }

        Ok(Self { entries })
    }

    /// The built-in textile defect catalog.
    #[must_use]
    pub fn standard() -> Self {
        let entries = super::standard::definitions()
            .into_iter()
            .map(|def| (def.id.clone(), def))
            .collect();
        Self { entries }
    }

    /// Parse a YAML catalog document
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_yaml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.defect_types)
    }

    /// Parse a JSON catalog document
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.defect_types)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        tracing::info!(
            "Loaded {} defect types from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Find a definition by its human code (case-insensitive)
    #[must_use]
    pub fn lookup_code(&self, code: &str) -> Option<&DefectTypeDefinition> {
        self.entries
            .values()
            .find(|def| def.code.eq_ignore_ascii_case(code))
    }

    /// Definitions in load order
    pub fn iter(&self) -> impl Iterator<Item = &DefectTypeDefinition> {
        self.entries.values()
    }

    /// Definitions of one severity class
    pub fn by_severity(
        &self,
        severity: SeverityClass,
    ) -> impl Iterator<Item = &DefectTypeDefinition> {
        self.entries
            .values()
            .filter(move |def| def.severity_class == severity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as a serializable document
    #[must_use]
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            defect_types: self.entries.values().cloned().collect(),
        }
    }
}

impl DefectCatalog for StaticCatalog {
    fn lookup(&self, defect_type_id: &str) -> Option<&DefectTypeDefinition> {
        self.entries.get(defect_type_id)
    }

    fn suggest(&self, defect_type_id: &str) -> Option<String> {
        let needle = defect_type_id.to_lowercase();
        self.entries
            .keys()
            .map(|id| (id, strsim::jaro_winkler(&needle, &id.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            // Ties keep the earliest entry so suggestions stay deterministic
            .fold(None::<(&String, f64)>, |best, (id, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((id, score)),
            })
            .map(|(id, _)| id.clone())
    }
}
