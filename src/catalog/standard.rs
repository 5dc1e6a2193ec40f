//! Built-in textile defect catalog.

use crate::model::{DefectTypeDefinition, SeverityClass};

use SeverityClass::{Critical, Major, Minor};

/// (id, code, name, severity, base points, description)
const STANDARD_DEFECTS: &[(&str, &str, &str, SeverityClass, f64, &str)] = &[
    ("hole", "HOLE", "Hole", Critical, 10.0, "Opening through the fabric"),
    ("cut", "CUT", "Cut", Critical, 10.0, "Mechanical cut across yarns"),
    ("oil_stain", "OILST", "Oil stain", Critical, 8.0, "Machine oil or grease mark"),
    ("broken_end", "BRKEND", "Broken end", Major, 5.0, "Missing or broken warp yarn"),
    ("broken_pick", "BRKPCK", "Broken pick", Major, 5.0, "Missing or broken weft yarn"),
    ("shade_bar", "SHDBAR", "Shade bar", Major, 6.0, "Visible band of different shade"),
    ("float", "FLOAT", "Float", Major, 4.0, "Yarn floating over the weave"),
    ("slub", "SLUB", "Slub", Minor, 2.0, "Thick place in the yarn"),
    ("knot", "KNOT", "Knot", Minor, 1.0, "Visible knot"),
    ("thin_place", "THIN", "Thin place", Minor, 2.0, "Locally thin yarn or weave"),
    ("soil_mark", "SOIL", "Soil mark", Minor, 3.0, "Light handling mark"),
];

pub(super) fn definitions() -> Vec<DefectTypeDefinition> {
    STANDARD_DEFECTS
        .iter()
        .map(|&(id, code, name, severity, points, description)| {
            DefectTypeDefinition::new(id, code, name, severity, points).with_description(description)
        })
        .collect()
}
