//! # Section Resolver & Material Capacity
//!
//! Resolves the pile cross-section properties from the catalogs (or derives
//! them from annulus geometry for untabulated dimensions), then reduces the
//! allowable section load for slenderness and joints per KDS 11 50 40.
//!
//! The catalog and derived paths produce the same unit system (m, m2, m4,
//! m3, kN) so either may activate silently depending on whether the requested
//! diameter/thickness is tabulated.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};
use crate::materials::{phc, steel_pipe, PhcGrade, PileType};
use crate::units::{
    KiloNewtons, Meters, Millimeters, TonnesForce, CONCRETE_UNIT_WEIGHT, GRAVITY_KN_PER_TF,
    STEEL_UNIT_WEIGHT, STEEL_YIELD_KPA,
};

/// Allowable load fallback for untabulated PHC diameters (kN).
///
/// Known approximation: the catalog has no row to take the tonnage value
/// from, so a representative mid-range value is used instead.
const PHC_FALLBACK_QAP_KN: f64 = 1650.0;

/// Resolved pile cross-section, immutable for the rest of the calculation.
///
/// All values are SI (m, m2, m4, m3, kN, kN/m2) regardless of whether they
/// came from a catalog row or the analytical annulus derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileSection {
    /// Pile material type
    pub pile_type: PileType,

    /// Outer diameter D (m)
    pub diameter_m: f64,

    /// Wall thickness t (m)
    pub thickness_m: f64,

    /// Outer perimeter U = pi*D (m)
    pub perimeter_m: f64,

    /// Gross tip area pi/4*D^2 (m2)
    pub tip_area_m2: f64,

    /// Net cross-sectional area (m2)
    pub net_area_m2: f64,

    /// Second moment of area I (m4)
    pub second_moment_m4: f64,

    /// Section modulus Z (m3)
    pub section_modulus_m3: f64,

    /// Elastic modulus E (kN/m2)
    pub elastic_modulus_kpa: f64,

    /// Flexural rigidity EI (kN-m2)
    pub flexural_rigidity: f64,

    /// Allowable section load Qap (kN)
    pub allowable_load_kn: f64,

    /// Slenderness limit n for the material reduction
    pub slenderness_limit: f64,

    /// Self-weight per meter (kN/m)
    pub unit_weight_kn_m: f64,

    /// Corrosion-deducted annulus area At (m2) - steel only, used by the
    /// code static rock tip formula
    pub annulus_area_m2: f64,

    /// Inner-bore plug area Ai (m2) - steel only, used by the code static
    /// rock tip formula
    pub plug_area_m2: f64,

    /// Whether the section came from a catalog row (vs. analytical fallback)
    pub from_catalog: bool,
}

/// Resolve the pile section from pile type, dimensions, and grade/corrosion.
///
/// Catalog rows are matched on the millimeter keys; a miss falls back to the
/// thin/thick annulus derivation. Fails with `InvalidGeometry` when the
/// dimensions describe a degenerate annulus.
pub fn resolve_section(
    pile_type: PileType,
    diameter_mm: f64,
    thickness_mm: f64,
    phc_grade: PhcGrade,
    corrosion_mm: f64,
) -> CalcResult<PileSection> {
    if diameter_mm <= 0.0 || thickness_mm <= 0.0 {
        return Err(CalcError::invalid_geometry(format!(
            "non-positive section dimensions: D={diameter_mm} mm, t={thickness_mm} mm"
        )));
    }
    if diameter_mm <= 2.0 * thickness_mm {
        return Err(CalcError::invalid_geometry(format!(
            "degenerate annulus: D={diameter_mm} mm <= 2t={} mm",
            2.0 * thickness_mm
        )));
    }

    let Meters(d) = Millimeters(diameter_mm).into();
    let Meters(t) = Millimeters(thickness_mm).into();
    let tip_area = PI / 4.0 * d * d;
    let elastic_modulus = pile_type.elastic_modulus_kpa();

    let (net_area, second_moment, section_modulus, allowable_load, unit_weight, at, ai, from_catalog) =
        match pile_type {
            PileType::Phc => {
                let (net_area, second_moment, section_modulus, allowable_load, from_catalog) =
                    match phc::lookup(diameter_mm) {
                        Ok(row) => {
                            let grade = row.grade(phc_grade);
                            let KiloNewtons(qap) = TonnesForce(grade.qap_tf).into();
                            (
                                row.ac_cm2 / 1e4,
                                row.ic_cm4 / 1e8,
                                grade.ze_cm3 / 1e6,
                                qap,
                                true,
                            )
                        }
                        Err(_) => {
                            let (area, i, z) = annulus_properties(d, t);
                            (area, i, z, PHC_FALLBACK_QAP_KN, false)
                        }
                    };
                let unit_weight = net_area * CONCRETE_UNIT_WEIGHT;
                (
                    net_area,
                    second_moment,
                    section_modulus,
                    allowable_load,
                    unit_weight,
                    0.0,
                    0.0,
                    from_catalog,
                )
            }
            PileType::SteelPipe => {
                if corrosion_mm < 0.0 || corrosion_mm >= thickness_mm {
                    return Err(CalcError::invalid_geometry(format!(
                        "corrosion allowance {corrosion_mm} mm leaves no wall \
                         (nominal thickness {thickness_mm} mm)"
                    )));
                }
                let Meters(corr) = Millimeters(corrosion_mm).into();
                // companion areas for the rock tip formula, always from geometry
                let at = PI / 4.0 * (d * d - (d - 2.0 * (t - corr)).powi(2));
                let ai = PI / 4.0 * (d - 2.0 * t).powi(2);
                match steel_pipe::lookup(diameter_mm, thickness_mm) {
                    Ok(opt) => (
                        opt.ap_cm2 / 1e4,
                        opt.i_cm4 / 1e8,
                        opt.z_cm3 / 1e6,
                        opt.qap_kn,
                        opt.weight_kgf_m * GRAVITY_KN_PER_TF / 1000.0,
                        at,
                        ai,
                        true,
                    ),
                    Err(_) => {
                        let (area, i, z) = annulus_properties(d, t);
                        // yield stress over the code safety factor of 3
                        let qap = area * STEEL_YIELD_KPA / 3.0;
                        (area, i, z, qap, area * STEEL_UNIT_WEIGHT, at, ai, false)
                    }
                }
            }
        };

    Ok(PileSection {
        pile_type,
        diameter_m: d,
        thickness_m: t,
        perimeter_m: PI * d,
        tip_area_m2: tip_area,
        net_area_m2: net_area,
        second_moment_m4: second_moment,
        section_modulus_m3: section_modulus,
        elastic_modulus_kpa: elastic_modulus,
        flexural_rigidity: elastic_modulus * second_moment,
        allowable_load_kn: allowable_load,
        slenderness_limit: pile_type.slenderness_limit(),
        unit_weight_kn_m: unit_weight,
        annulus_area_m2: at,
        plug_area_m2: ai,
        from_catalog,
    })
}

/// Annulus (hollow circle) area, second moment, and section modulus for
/// outer diameter `d` and wall thickness `t`, in meters.
fn annulus_properties(d: f64, t: f64) -> (f64, f64, f64) {
    let di = d - 2.0 * t;
    let area = PI / 4.0 * (d * d - di * di);
    let i = PI / 64.0 * (d.powi(4) - di.powi(4));
    let z = i / (d / 2.0);
    (area, i, z)
}

// ============================================================================
// Material Capacity (slenderness + joint reduction)
// ============================================================================

/// Pile joint (splice) type, selecting the per-joint reduction policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Welded splice: 5% per joint
    #[default]
    Welding,
    /// Bolted splice: 10% per joint
    Bolt,
    /// Fill splice: 20% per joint for the first two, 30% each thereafter
    Fill,
}

impl JointType {
    /// All joint types for UI selection
    pub const ALL: [JointType; 3] = [JointType::Welding, JointType::Bolt, JointType::Fill];

    /// Joint reduction mu2 (%) for `count` joints.
    ///
    /// The fill policy carries no cap; large joint counts can legitimately
    /// drive the material capacity to zero or below, and the engine reports
    /// that rather than clamping.
    pub fn reduction_pct(&self, count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let count = count as f64;
        match self {
            JointType::Welding => count * 5.0,
            JointType::Bolt => count * 10.0,
            JointType::Fill => count.min(2.0) * 20.0 + (count - 2.0).max(0.0) * 30.0,
        }
    }
}

/// Material-side allowable vertical capacity and its reduction factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialCapacity {
    /// Slenderness ratio L/d
    pub length_over_diameter: f64,

    /// Slenderness reduction mu1 (%), in [0, 30]
    pub slenderness_reduction_pct: f64,

    /// Joint reduction mu2 (%), unbounded for fill joints
    pub joint_reduction_pct: f64,

    /// Allowable section load Qap before reduction (kN)
    pub allowable_load_kn: f64,

    /// Reduced material capacity (kN). May be negative when mu1+mu2 > 100;
    /// callers must treat that as a failed section, not a usable capacity.
    pub capacity_kn: f64,
}

/// Reduce the allowable section load for slenderness and joints.
pub fn material_capacity(
    section: &PileSection,
    pile_length_m: f64,
    joint_count: u32,
    joint_type: JointType,
) -> MaterialCapacity {
    let ratio = pile_length_m / section.diameter_m;
    let n = section.slenderness_limit;
    // reduction applies strictly above the limit, capped at 30%
    let mu1 = if ratio > n {
        ((ratio / n - 1.0) * 100.0).min(30.0)
    } else {
        0.0
    };
    let mu2 = joint_type.reduction_pct(joint_count);
    let capacity = (1.0 - (mu1 + mu2) / 100.0) * section.allowable_load_kn;

    MaterialCapacity {
        length_over_diameter: ratio,
        slenderness_reduction_pct: mu1,
        joint_reduction_pct: mu2,
        allowable_load_kn: section.allowable_load_kn,
        capacity_kn: capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phc_d500() -> PileSection {
        resolve_section(PileType::Phc, 500.0, 80.0, PhcGrade::A, 0.0).unwrap()
    }

    #[test]
    fn test_phc_catalog_section() {
        let s = phc_d500();
        assert!(s.from_catalog);
        assert!((s.net_area_m2 - 0.1056).abs() < 1e-12);
        assert!((s.second_moment_m4 - 0.002412).abs() < 1e-12);
        assert!((s.section_modulus_m3 - 0.009914).abs() < 1e-12);
        assert!((s.allowable_load_kn - 1657.32385).abs() < 1e-6);
        assert!((s.flexural_rigidity - 94_550.4).abs() < 1e-6);
        // self-weight from net area and concrete unit weight
        assert!((s.unit_weight_kn_m - 2.5344).abs() < 1e-9);
    }

    #[test]
    fn test_phc_fallback_section() {
        // D550 is not tabulated
        let s = resolve_section(PileType::Phc, 550.0, 85.0, PhcGrade::A, 0.0).unwrap();
        assert!(!s.from_catalog);
        assert_eq!(s.allowable_load_kn, PHC_FALLBACK_QAP_KN);
        let (area, i, z) = annulus_properties(0.55, 0.085);
        assert!((s.net_area_m2 - area).abs() < 1e-15);
        assert!((s.second_moment_m4 - i).abs() < 1e-15);
        assert!((s.section_modulus_m3 - z).abs() < 1e-15);
    }

    #[test]
    fn test_steel_catalog_section() {
        let s = resolve_section(PileType::SteelPipe, 609.6, 12.0, PhcGrade::A, 2.0).unwrap();
        assert!(s.from_catalog);
        assert!((s.net_area_m2 - 0.02253).abs() < 1e-12);
        assert_eq!(s.allowable_load_kn, 2642.0);
        assert!((s.unit_weight_kn_m - 1.735777050).abs() < 1e-9);
        // companion areas computed from geometry even on the catalog path
        assert!((s.annulus_area_m2 - 0.018836989550924405).abs() < 1e-12);
        assert!((s.plug_area_m2 - 0.26933451872273556).abs() < 1e-12);
    }

    #[test]
    fn test_steel_fallback_allowable_load() {
        // D700 is not tabulated
        let s = resolve_section(PileType::SteelPipe, 700.0, 12.0, PhcGrade::A, 2.0).unwrap();
        assert!(!s.from_catalog);
        assert!((s.allowable_load_kn - s.net_area_m2 * STEEL_YIELD_KPA / 3.0).abs() < 1e-9);
        assert!((s.unit_weight_kn_m - s.net_area_m2 * STEEL_UNIT_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_annulus_rejected() {
        let err = resolve_section(PileType::SteelPipe, 20.0, 10.0, PhcGrade::A, 2.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        assert!(resolve_section(PileType::Phc, -500.0, 80.0, PhcGrade::A, 0.0).is_err());
    }

    #[test]
    fn test_corrosion_consuming_wall_rejected() {
        let err = resolve_section(PileType::SteelPipe, 609.6, 12.0, PhcGrade::A, 12.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_mu1_zero_under_limit() {
        let s = phc_d500();
        let m = material_capacity(&s, 10.02, 0, JointType::Welding);
        assert_eq!(m.slenderness_reduction_pct, 0.0);
        assert_eq!(m.joint_reduction_pct, 0.0);
        assert!((m.capacity_kn - 1657.32385).abs() < 1e-6);
    }

    #[test]
    fn test_mu1_threshold_is_strict() {
        let s = phc_d500();
        // L/d exactly at n = 85 -> no reduction
        let m = material_capacity(&s, 85.0 * s.diameter_m, 0, JointType::Welding);
        assert_eq!(m.slenderness_reduction_pct, 0.0);
        // just above -> reduction kicks in
        let m = material_capacity(&s, 85.0 * s.diameter_m + 0.01, 0, JointType::Welding);
        assert!(m.slenderness_reduction_pct > 0.0);
    }

    #[test]
    fn test_mu1_cap() {
        let s = phc_d500();
        // absurdly slender: mu1 clamps to 30
        let m = material_capacity(&s, 200.0, 0, JointType::Welding);
        assert_eq!(m.slenderness_reduction_pct, 30.0);
    }

    #[test]
    fn test_joint_reduction_policies() {
        assert_eq!(JointType::Welding.reduction_pct(3), 15.0);
        assert_eq!(JointType::Bolt.reduction_pct(3), 30.0);
        assert_eq!(JointType::Fill.reduction_pct(1), 20.0);
        assert_eq!(JointType::Fill.reduction_pct(2), 40.0);
        assert_eq!(JointType::Fill.reduction_pct(4), 100.0);
        assert_eq!(JointType::Welding.reduction_pct(0), 0.0);
    }

    #[test]
    fn test_fill_joints_can_zero_out_capacity() {
        let s = phc_d500();
        // 4 fill joints = 100% reduction; more goes negative and is reported
        let m = material_capacity(&s, 10.0, 4, JointType::Fill);
        assert_eq!(m.capacity_kn, 0.0);
        let m = material_capacity(&s, 10.0, 5, JointType::Fill);
        assert!(m.capacity_kn < 0.0);
    }
}
