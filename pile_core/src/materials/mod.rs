//! # Pile & Soil Catalogs
//!
//! Static reference data the bearing capacity engine depends on but does not
//! own: pile section catalogs and the soil classification tables. All tables
//! encode normative code values and are versioned with the code - any change
//! changes results.
//!
//! ## Catalogs
//!
//! - **PHC piles**: KS F 4306 section table with A/B/C strength grades
//! - **Steel pipe piles**: corrosion-deducted section table
//! - **Soil labels**: borehole-log label -> {class, default unit weight}
//!
//! ## Example
//!
//! ```rust
//! use pile_core::materials::{PileType, phc, soil, SoilClass};
//!
//! let row = phc::lookup(500.0).unwrap();
//! assert_eq!(row.grade(pile_core::materials::PhcGrade::A).qap_tf, 169.0);
//!
//! assert_eq!(soil::classify("silt(ML)"), SoilClass::Clay);
//! assert_eq!(PileType::Phc.slenderness_limit(), 85.0);
//! ```

pub mod phc;
pub mod soil;
pub mod steel_pipe;

// Re-export catalog types
pub use phc::{PhcGrade, PhcGradeSpec, PhcSpec, PHC_SPECS};
pub use soil::{SoilClass, SOIL_LABELS};
pub use steel_pipe::{SteelPipeOption, SteelPipeSpec, STEEL_SPECS};

use serde::{Deserialize, Serialize};

/// Pile material type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PileType {
    /// Pretensioned spun high-strength concrete pile
    #[serde(rename = "PHC")]
    #[default]
    Phc,
    /// Steel pipe pile
    #[serde(rename = "steel")]
    SteelPipe,
}

impl PileType {
    /// All pile types for UI selection
    pub const ALL: [PileType; 2] = [PileType::Phc, PileType::SteelPipe];

    /// Slenderness limit n for the material-capacity reduction
    pub fn slenderness_limit(&self) -> f64 {
        match self {
            PileType::Phc => 85.0,
            PileType::SteelPipe => 100.0,
        }
    }

    /// Elastic modulus of the pile material (kN/m2)
    pub fn elastic_modulus_kpa(&self) -> f64 {
        match self {
            PileType::Phc => 39_200_000.0,
            PileType::SteelPipe => 210_000_000.0,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PileType::Phc => "PHC",
            PileType::SteelPipe => "Steel Pipe",
        }
    }
}

impl std::fmt::Display for PileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_type_constants() {
        assert_eq!(PileType::Phc.slenderness_limit(), 85.0);
        assert_eq!(PileType::SteelPipe.slenderness_limit(), 100.0);
        assert_eq!(PileType::Phc.elastic_modulus_kpa(), 39_200_000.0);
        assert_eq!(PileType::SteelPipe.elastic_modulus_kpa(), 210_000_000.0);
    }

    #[test]
    fn test_pile_type_serde_rename() {
        assert_eq!(serde_json::to_string(&PileType::Phc).unwrap(), "\"PHC\"");
        assert_eq!(
            serde_json::to_string(&PileType::SteelPipe).unwrap(),
            "\"steel\""
        );
    }
}
