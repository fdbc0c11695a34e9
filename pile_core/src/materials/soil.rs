//! Soil Classification Tables
//!
//! Maps the borehole-log soil labels to a skin-friction class and a default
//! unit weight. Labels the map does not know are treated as sand at 18 kN/m3,
//! so hand-entered layer descriptions never fail the calculation.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Skin-friction class of a soil layer.
///
/// Selects which per-layer friction term the layer contributes to:
/// sand uses 2NAs, clay uses 6.25NAs, rock contributes no skin friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilClass {
    Sand,
    Clay,
    Rock,
}

impl SoilClass {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilClass::Sand => "sand",
            SoilClass::Clay => "clay",
            SoilClass::Rock => "rock",
        }
    }
}

impl std::fmt::Display for SoilClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Known borehole-log soil labels, for UI selection
pub const SOIL_LABELS: [&str; 13] = [
    "fill",
    "cultivated(CL)",
    "deposit(SM)",
    "deposit(CL)",
    "deposit(SP)",
    "weathered-soil(SM)",
    "weathered-soil(CL)",
    "weathered-rock(WR)",
    "soft-rock(SR)",
    "hard-rock(HR)",
    "gravel(GP)",
    "sand(SP)",
    "silt(ML)",
];

/// Label -> (class, default unit weight kN/m3)
static SOIL_TABLE: Lazy<HashMap<&'static str, (SoilClass, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("fill", (SoilClass::Sand, 18.0)),
        ("cultivated(CL)", (SoilClass::Clay, 16.0)),
        ("deposit(SM)", (SoilClass::Sand, 18.0)),
        ("deposit(CL)", (SoilClass::Clay, 17.0)),
        ("deposit(SP)", (SoilClass::Sand, 18.0)),
        ("weathered-soil(SM)", (SoilClass::Sand, 19.0)),
        ("weathered-soil(CL)", (SoilClass::Clay, 18.0)),
        ("weathered-rock(WR)", (SoilClass::Sand, 20.0)),
        ("soft-rock(SR)", (SoilClass::Rock, 22.0)),
        ("hard-rock(HR)", (SoilClass::Rock, 24.0)),
        ("gravel(GP)", (SoilClass::Sand, 19.0)),
        ("sand(SP)", (SoilClass::Sand, 18.0)),
        ("silt(ML)", (SoilClass::Clay, 17.0)),
    ])
});

/// Classify a soil label. Unmapped labels classify as sand.
pub fn classify(label: &str) -> SoilClass {
    SOIL_TABLE
        .get(label)
        .map(|(class, _)| *class)
        .unwrap_or(SoilClass::Sand)
}

/// Default unit weight for a soil label (kN/m3). Unmapped labels get 18.
///
/// The engine itself takes unit weights from the input layers; this table
/// exists for input builders (forms, CLIs) pre-filling a layer from its
/// soil label.
pub fn default_unit_weight(label: &str) -> f64 {
    SOIL_TABLE
        .get(label)
        .map(|(_, uw)| *uw)
        .unwrap_or(crate::units::DEFAULT_UNIT_WEIGHT)
}
