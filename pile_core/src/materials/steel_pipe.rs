//! Steel Pipe Pile Catalog
//!
//! Section properties for steel pipe piles with the 2 mm corrosion allowance
//! already deducted, as published in the Korean foundation design tables.
//! Allowable loads are tabulated directly in kN; unit weights in kgf/m.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One thickness option of a steel pipe diameter row (corrosion-deducted)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelPipeOption {
    /// Nominal wall thickness (mm)
    pub thickness_mm: f64,
    /// Unit weight (kgf/m)
    pub weight_kgf_m: f64,
    /// Net section area Ap (cm2)
    pub ap_cm2: f64,
    /// Second moment of area I (cm4)
    pub i_cm4: f64,
    /// Section modulus Z (cm3)
    pub z_cm3: f64,
    /// Radius of gyration (cm)
    pub k_cm: f64,
    /// Allowable axial load (kN)
    pub qap_kn: f64,
}

/// One diameter row of the steel pipe catalog.
///
/// Rows live only in the static [`STEEL_SPECS`] table, so the type is
/// serialize-only; the borrowed options slice has no owned form to
/// deserialize into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteelPipeSpec {
    /// Nominal outer diameter (mm)
    pub diameter_mm: f64,
    /// Available wall thicknesses
    pub options: &'static [SteelPipeOption],
}

macro_rules! option {
    ($t:expr, $w:expr, $ap:expr, $i:expr, $z:expr, $k:expr, $qap:expr) => {
        SteelPipeOption {
            thickness_mm: $t,
            weight_kgf_m: $w,
            ap_cm2: $ap,
            i_cm4: $i,
            z_cm3: $z,
            k_cm: $k,
            qap_kn: $qap,
        }
    };
}

/// Steel pipe pile catalog (corrosion-deducted section properties)
pub const STEEL_SPECS: [SteelPipeSpec; 3] = [
    SteelPipeSpec {
        diameter_mm: 406.4,
        options: &[
            option!(9.0, 88.2, 112.4, 22_200.0, 1090.0, 14.0, 1131.0),
            option!(10.0, 97.8, 124.5, 24_500.0, 1200.0, 14.0, 1426.0),
            option!(12.0, 117.0, 148.7, 28_900.0, 1420.0, 14.0, 1823.0),
        ],
    },
    SteelPipeSpec {
        diameter_mm: 508.0,
        options: &[
            option!(9.0, 111.0, 141.1, 43_900.0, 1730.0, 17.6, 1520.0),
            option!(10.0, 123.0, 156.5, 48_500.0, 1910.0, 17.6, 1754.0),
            option!(12.0, 147.0, 187.0, 57_500.0, 2270.0, 17.5, 2233.0),
        ],
    },
    SteelPipeSpec {
        diameter_mm: 609.6,
        options: &[
            option!(9.0, 133.0, 169.8, 76_600.0, 2510.0, 21.2, 1808.0),
            option!(10.0, 148.0, 188.4, 84_700.0, 2780.0, 21.2, 2082.0),
            option!(12.0, 177.0, 225.3, 101_000.0, 3300.0, 21.1, 2642.0),
        ],
    },
];

/// Look up a steel pipe option by nominal diameter and wall thickness.
///
/// Returns `MissingCatalogEntry` for untabulated combinations; the section
/// resolver treats that as a signal to derive the section analytically.
pub fn lookup(diameter_mm: f64, thickness_mm: f64) -> CalcResult<&'static SteelPipeOption> {
    STEEL_SPECS
        .iter()
        .find(|row| (row.diameter_mm - diameter_mm).abs() < 1e-6)
        .and_then(|row| {
            row.options
                .iter()
                .find(|o| (o.thickness_mm - thickness_mm).abs() < 1e-6)
        })
        .ok_or_else(|| CalcError::missing_catalog_entry("steel", diameter_mm, thickness_mm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_d609_t12() {
        let opt = lookup(609.6, 12.0).unwrap();
        assert_eq!(opt.ap_cm2, 225.3);
        assert_eq!(opt.qap_kn, 2642.0);
    }

    #[test]
    fn test_lookup_miss() {
        assert!(lookup(711.2, 12.0).is_err());
        // tabulated diameter, untabulated thickness
        let err = lookup(508.0, 14.0).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_CATALOG_ENTRY");
    }

    #[test]
    fn test_serialization() {
        let opt = lookup(406.4, 9.0).unwrap();
        let json = serde_json::to_string(opt).unwrap();
        let roundtrip: SteelPipeOption = serde_json::from_str(&json).unwrap();
        assert_eq!(*opt, roundtrip);
    }

    #[test]
    fn test_catalog_row_serializes() {
        let json = serde_json::to_string(&STEEL_SPECS[2]).unwrap();
        assert!(json.contains("\"diameter_mm\":609.6"));
        assert!(json.contains("\"qap_kn\":2642.0"));
    }
}
