//! PHC Pile Catalog (KS F 4306)
//!
//! Section properties for pretensioned spun high-strength concrete piles.
//! Each nominal diameter carries three strength grades (A, B, C) differing in
//! effective prestress, allowable axial load, and effective section modulus.
//!
//! Catalog values are published in mixed legacy units (cm2, cm4, cm3,
//! tonnes-force); the section resolver converts them to SI. These are
//! normative code-table values - any change changes results.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// PHC strength grade per KS F 4306
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PhcGrade {
    /// Grade A - effective prestress 4.0 MPa
    #[default]
    A,
    /// Grade B - effective prestress 8.0 MPa
    B,
    /// Grade C - effective prestress 10.0 MPa
    C,
}

impl PhcGrade {
    /// All grades for UI selection
    pub const ALL: [PhcGrade; 3] = [PhcGrade::A, PhcGrade::B, PhcGrade::C];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PhcGrade::A => "A",
            PhcGrade::B => "B",
            PhcGrade::C => "C",
        }
    }
}

impl std::fmt::Display for PhcGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-grade sub-entry of a PHC catalog row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhcGradeSpec {
    /// Allowable axial load (tonnes-force)
    pub qap_tf: f64,
    /// Effective section modulus Ze (cm3)
    pub ze_cm3: f64,
    /// Effective second moment of area Ie (cm4)
    pub ie_cm4: f64,
    /// Effective prestress (kgf/cm2)
    pub prestress_kgf_cm2: f64,
}

/// One diameter row of the PHC catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhcSpec {
    /// Nominal outer diameter (mm)
    pub diameter_mm: f64,
    /// Wall thickness (mm)
    pub thickness_mm: f64,
    /// Net concrete area Ac (cm2)
    pub ac_cm2: f64,
    /// Second moment of area Ic (cm4)
    pub ic_cm4: f64,
    /// Unit weight (kg/m)
    pub weight_kg_m: f64,
    /// Grade A sub-entry
    pub grade_a: PhcGradeSpec,
    /// Grade B sub-entry
    pub grade_b: PhcGradeSpec,
    /// Grade C sub-entry
    pub grade_c: PhcGradeSpec,
}

impl PhcSpec {
    /// Get the sub-entry for a strength grade
    pub fn grade(&self, grade: PhcGrade) -> &PhcGradeSpec {
        match grade {
            PhcGrade::A => &self.grade_a,
            PhcGrade::B => &self.grade_b,
            PhcGrade::C => &self.grade_c,
        }
    }
}

macro_rules! grade {
    ($qap:expr, $ze:expr, $ie:expr, $ps:expr) => {
        PhcGradeSpec {
            qap_tf: $qap,
            ze_cm3: $ze,
            ie_cm4: $ie,
            prestress_kgf_cm2: $ps,
        }
    };
}

/// PHC pile catalog per KS F 4306
pub const PHC_SPECS: [PhcSpec; 5] = [
    PhcSpec {
        diameter_mm: 350.0,
        thickness_mm: 60.0,
        ac_cm2: 547.0,
        ic_cm4: 59_930.0,
        weight_kg_m: 142.0,
        grade_a: grade!(88.0, 3508.0, 61_400.0, 40.0),
        grade_b: grade!(66.0, 3614.0, 63_240.0, 80.0),
        grade_c: grade!(55.0, 3655.0, 63_960.0, 100.0),
    },
    PhcSpec {
        diameter_mm: 400.0,
        thickness_mm: 65.0,
        ac_cm2: 684.0,
        ic_cm4: 99_580.0,
        weight_kg_m: 178.0,
        grade_a: grade!(109.0, 5104.0, 102_100.0, 40.0),
        grade_b: grade!(82.0, 5229.0, 104_600.0, 80.0),
        grade_c: grade!(68.0, 5327.0, 106_500.0, 100.0),
    },
    PhcSpec {
        diameter_mm: 450.0,
        thickness_mm: 70.0,
        ac_cm2: 836.0,
        ic_cm4: 156_000.0,
        weight_kg_m: 217.0,
        grade_a: grade!(68.0, 7121.0, 160_200.0, 40.0),
        grade_b: grade!(100.0, 7310.0, 164_500.0, 80.0),
        grade_c: grade!(84.0, 7437.0, 167_300.0, 100.0),
    },
    PhcSpec {
        diameter_mm: 500.0,
        thickness_mm: 80.0,
        ac_cm2: 1056.0,
        ic_cm4: 241_200.0,
        weight_kg_m: 274.0,
        grade_a: grade!(169.0, 9914.0, 247_900.0, 40.0),
        grade_b: grade!(127.0, 10_180.0, 254_500.0, 80.0),
        grade_c: grade!(106.0, 10_360.0, 258_900.0, 100.0),
    },
    PhcSpec {
        diameter_mm: 600.0,
        thickness_mm: 90.0,
        ac_cm2: 1442.0,
        ic_cm4: 483_400.0,
        weight_kg_m: 375.0,
        grade_a: grade!(231.0, 16_560.0, 496_900.0, 40.0),
        grade_b: grade!(173.0, 17_010.0, 570_400.0, 80.0),
        grade_c: grade!(144.0, 17_330.0, 519_800.0, 100.0),
    },
];

/// Look up a PHC catalog row by nominal diameter.
///
/// Returns `MissingCatalogEntry` for untabulated diameters; the section
/// resolver treats that as a signal to derive the section analytically.
pub fn lookup(diameter_mm: f64) -> CalcResult<&'static PhcSpec> {
    PHC_SPECS
        .iter()
        .find(|row| (row.diameter_mm - diameter_mm).abs() < 1e-6)
        .ok_or_else(|| CalcError::missing_catalog_entry("PHC", diameter_mm, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_d500() {
        let row = lookup(500.0).unwrap();
        assert_eq!(row.thickness_mm, 80.0);
        assert_eq!(row.ac_cm2, 1056.0);
        assert_eq!(row.grade(PhcGrade::A).qap_tf, 169.0);
        assert_eq!(row.grade(PhcGrade::C).ze_cm3, 10_360.0);
    }

    #[test]
    fn test_lookup_miss() {
        let err = lookup(550.0).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_CATALOG_ENTRY");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_serialization() {
        let row = lookup(350.0).unwrap();
        let json = serde_json::to_string(row).unwrap();
        let roundtrip: PhcSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(*row, roundtrip);
    }
}
