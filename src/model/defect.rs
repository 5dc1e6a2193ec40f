//! Defect catalog entries and defect observations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tier of defect seriousness.
///
/// Drives both the base point weight of a catalog entry and which per-grade
/// count limit an observation is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeverityClass {
    Critical,
    Major,
    Minor,
}

impl SeverityClass {
    /// All severity classes, most serious first
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Critical, Self::Major, Self::Minor]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl std::fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable catalog entry describing one kind of fabric defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectTypeDefinition {
    /// Stable identifier referenced by observations
    pub id: String,
    /// Unique human label (e.g. `HOLE`)
    pub code: String,
    pub name: String,
    pub severity_class: SeverityClass,
    /// Base penalty before size and position adjustments; always positive
    pub base_points: f64,
    #[serde(default)]
    pub description: String,
}

impl DefectTypeDefinition {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        severity_class: SeverityClass,
        base_points: f64,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            severity_class,
            base_points,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Where across the fabric width a defect was found.
///
/// Serialized as `snake_case`; deserialized through [`DefectPosition::from_label`],
/// so inspection-sheet labels such as `Left-edge` or `Full-width` are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DefectPosition {
    LeftEdge,
    RightEdge,
    Center,
    FullWidth,
    /// Any position label the engine does not recognise
    #[default]
    Other,
}

impl DefectPosition {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LeftEdge => "Left edge",
            Self::RightEdge => "Right edge",
            Self::Center => "Center",
            Self::FullWidth => "Full width",
            Self::Other => "Other",
        }
    }

    /// Parse a position from a loosely formatted label.
    ///
    /// Unrecognised labels map to [`DefectPosition::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "left_edge" | "leftedge" | "left" => Self::LeftEdge,
            "right_edge" | "rightedge" | "right" => Self::RightEdge,
            "center" | "centre" | "middle" => Self::Center,
            "full_width" | "fullwidth" | "full" => Self::FullWidth,
            _ => Self::Other,
        }
    }
}

impl From<String> for DefectPosition {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl std::fmt::Display for DefectPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected defect instance on the roll under inspection.
///
/// Severity is not stored here; it comes from the catalog at scoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectObservation {
    /// Stable within an inspection session
    #[serde(default)]
    pub id: String,
    /// Reference into the defect catalog; may not resolve
    pub defect_type_id: String,
    #[serde(default)]
    pub position: DefectPosition,
    /// Distance along the roll where the defect was found
    #[serde(default)]
    pub length_offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DefectObservation {
    pub fn new(
        id: impl Into<String>,
        defect_type_id: impl Into<String>,
        position: DefectPosition,
    ) -> Self {
        Self {
            id: id.into(),
            defect_type_id: defect_type_id.into(),
            position,
            length_offset: 0.0,
            width: None,
            length: None,
            note: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, length: f64) -> Self {
        self.width = Some(width);
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn at_offset(mut self, length_offset: f64) -> Self {
        self.length_offset = length_offset;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Width and length with missing dimensions replaced by `default_dimension`
    #[must_use]
    pub fn dimensions(&self, default_dimension: f64) -> (f64, f64) {
        (
            self.width.unwrap_or(default_dimension),
            self.length.unwrap_or(default_dimension),
        )
    }

    /// Physical extent `width × length`
    #[must_use]
    pub fn area(&self, default_dimension: f64) -> f64 {
        let (width, length) = self.dimensions(default_dimension);
        width * length
    }
}
