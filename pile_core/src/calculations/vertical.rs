//! # Vertical Capacity Stages
//!
//! Per-layer skin friction, tip resistance (soil-bearing or rock-socket),
//! and the ground/material capacity combination per KDS 11 50 40.
//!
//! Skin friction clamps N at 30; the soil-bearing tip formula clamps N at 50.
//! The two caps are independent and must not be merged.

use serde::{Deserialize, Serialize};

use crate::calculations::pile::{SoilLayer, SptRecord};
use crate::calculations::section::{MaterialCapacity, PileSection};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{soil, PileType, SoilClass};
use crate::units::{FS_BEARING, QU_EFF_CAP_KPA, SKIN_N_CAP, TIP_N_CAP};

// ============================================================================
// Skin Friction (§ soil layer processor)
// ============================================================================

/// Per-layer skin friction breakdown, in input order, for audit display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBreakdown {
    /// Soil label as given
    pub soil_type: String,

    /// Resolved skin-friction class
    pub soil_class: SoilClass,

    /// Layer thickness (m)
    pub thickness_m: f64,

    /// Representative SPT N (as given, before clamping)
    pub avg_n: f64,

    /// Unit weight (kN/m3)
    pub unit_weight: f64,

    /// Lateral surface area U x thickness (m2)
    pub lateral_area_m2: f64,

    /// Sand-term contribution 2*N*As (kN), zero for clay and rock layers
    pub sand_friction_kn: f64,

    /// Clay-term contribution 6.25*N*As (kN), zero for sand and rock layers
    pub clay_friction_kn: f64,
}

/// Total skin friction with the per-layer audit rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinFriction {
    /// Per-layer rows, top to bottom
    pub layers: Vec<LayerBreakdown>,

    /// Sum of the sand term 2NsAs (kN)
    pub sand_total_kn: f64,

    /// Sum of the clay term 6.25NcAc (kN)
    pub clay_total_kn: f64,
}

impl SkinFriction {
    /// Combined skin friction (kN)
    pub fn total_kn(&self) -> f64 {
        self.sand_total_kn + self.clay_total_kn
    }
}

/// Compute the per-layer skin friction for a pile of the given perimeter.
///
/// An empty layer sequence yields zero totals (tip resistance alone carries
/// the ground capacity).
pub fn skin_friction(layers: &[SoilLayer], perimeter_m: f64) -> SkinFriction {
    let mut rows = Vec::with_capacity(layers.len());
    let mut sand_total = 0.0;
    let mut clay_total = 0.0;

    for layer in layers {
        let class = soil::classify(&layer.soil_type);
        let lateral_area = perimeter_m * layer.thickness_m;
        let n = layer.avg_n.min(SKIN_N_CAP);
        let (sand, clay) = match class {
            SoilClass::Sand => (2.0 * n * lateral_area, 0.0),
            SoilClass::Clay => (0.0, 6.25 * n * lateral_area),
            SoilClass::Rock => (0.0, 0.0),
        };
        sand_total += sand;
        clay_total += clay;
        rows.push(LayerBreakdown {
            soil_type: layer.soil_type.clone(),
            soil_class: class,
            thickness_m: layer.thickness_m,
            avg_n: layer.avg_n,
            unit_weight: layer.unit_weight,
            lateral_area_m2: lateral_area,
            sand_friction_kn: sand,
            clay_friction_kn: clay,
        });
    }

    SkinFriction {
        layers: rows,
        sand_total_kn: sand_total,
        clay_total_kn: clay_total,
    }
}

// ============================================================================
// Tip Resistance
// ============================================================================

/// Tip bearing-resistance method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BearingMethod {
    /// SPT-based soil bearing (Meyerhof), 250*N*Ap
    #[serde(rename = "meyerhof")]
    SoilBearing,
    /// Rock-socketed tip: min of code static / Goodman / Canadian FEM.
    /// Steel piles only.
    #[serde(rename = "rock")]
    RockSocket,
}

impl BearingMethod {
    /// Default method for a pile type: soil bearing for PHC, rock for steel
    pub fn default_for(pile_type: PileType) -> Self {
        match pile_type {
            PileType::Phc => BearingMethod::SoilBearing,
            PileType::SteelPipe => BearingMethod::RockSocket,
        }
    }
}

/// Rock/socket parameters for the rock-socketed tip formulas.
///
/// Field defaults are representative soft-rock values, applied when a site
/// investigation value is not entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockParams {
    /// Unconfined compressive strength qu (kPa)
    pub qu_kpa: f64,
    /// Discontinuity spacing Sd (m)
    pub sd_m: f64,
    /// Discontinuity width td (m)
    pub td_m: f64,
    /// Rock internal friction angle (degrees)
    pub phi_deg: f64,
}

impl Default for RockParams {
    fn default() -> Self {
        RockParams {
            qu_kpa: 32_460.0,
            sd_m: 0.15,
            td_m: 0.002,
            phi_deg: 35.0,
        }
    }
}

impl RockParams {
    fn validate(&self) -> CalcResult<()> {
        if self.qu_kpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "qu_kpa",
                self.qu_kpa.to_string(),
                "Unconfined compressive strength must be positive",
            ));
        }
        if self.sd_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "sd_m",
                self.sd_m.to_string(),
                "Discontinuity spacing must be positive",
            ));
        }
        if self.td_m < 0.0 {
            return Err(CalcError::invalid_input(
                "td_m",
                self.td_m.to_string(),
                "Discontinuity width cannot be negative",
            ));
        }
        if self.phi_deg <= 0.0 || self.phi_deg >= 90.0 {
            // tan(45 + phi/2) leaves its domain outside (0, 90)
            return Err(CalcError::invalid_geometry(format!(
                "rock friction angle {} deg outside (0, 90)",
                self.phi_deg
            )));
        }
        Ok(())
    }
}

/// Sub-results of the rock-socketed tip evaluation, exposed for audit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockTipDetail {
    /// qu capped at 10 MPa, as the code static formula requires (kPa)
    pub qu_eff_kpa: f64,
    /// Laboratory qu, uncapped (kPa)
    pub qu_lab_kpa: f64,
    /// Corrosion-deducted annulus area At (m2)
    pub annulus_area_m2: f64,
    /// Inner plug area Ai (m2)
    pub plug_area_m2: f64,
    /// Code static formula: 443*sqrt(qu_eff)*At^0.4*Ai^(1/3) (kN)
    pub code_static_kn: f64,
    /// Goodman flow factor N_phi = tan^2(45 + phi/2)
    pub n_phi: f64,
    /// Gross circular tip area (m2)
    pub tip_area_m2: f64,
    /// Goodman (1980): qu_lab*(N_phi + 1)*Ap (kN)
    pub goodman_kn: f64,
    /// Discontinuity spacing Sd (m)
    pub sd_m: f64,
    /// Discontinuity width td (m)
    pub td_m: f64,
    /// Canadian FEM empirical factor Ksp
    pub ksp: f64,
    /// Canadian FEM: 3*qu_lab*Ksp*2*Ap (kN)
    pub canadian_kn: f64,
    /// Governing (minimum) candidate (kN)
    pub governing_kn: f64,
}

/// Ultimate tip resistance with the method that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipResistance {
    /// Method that was evaluated
    pub method: BearingMethod,

    /// Tip N-value used by the soil-bearing formula (clamped to 50);
    /// absent on the rock path
    pub tip_n: Option<f64>,

    /// Governing ultimate tip load (kN)
    pub ultimate_kn: f64,

    /// Rock-socket sub-results when the rock path ran
    pub rock: Option<RockTipDetail>,
}

/// Evaluate the tip resistance for the selected method.
///
/// The rock-socket path is steel-only: selecting it for a PHC pile fails
/// with `UnsupportedMethod`. An empty SPT sequence on the soil path falls
/// back to the documented tip-N default of 50.
pub fn tip_resistance(
    section: &PileSection,
    method: BearingMethod,
    spt: &[SptRecord],
    rock: &RockParams,
) -> CalcResult<TipResistance> {
    match method {
        BearingMethod::SoilBearing => {
            let tip_n = spt.last().map(|r| r.n).unwrap_or(TIP_N_CAP).min(TIP_N_CAP);
            Ok(TipResistance {
                method,
                tip_n: Some(tip_n),
                ultimate_kn: 250.0 * tip_n * section.tip_area_m2,
                rock: None,
            })
        }
        BearingMethod::RockSocket => {
            if section.pile_type != PileType::SteelPipe {
                return Err(CalcError::unsupported_method(
                    "rock-socket",
                    section.pile_type.display_name(),
                ));
            }
            rock.validate()?;

            let qu_eff = rock.qu_kpa.min(QU_EFF_CAP_KPA);
            let qu_lab = rock.qu_kpa;
            let at = section.annulus_area_m2;
            let ai = section.plug_area_m2;
            // empirical fit: units and exponents are normative, not derivable
            let code_static = 443.0 * qu_eff.sqrt() * at.powf(0.4) * ai.powf(1.0 / 3.0);

            let n_phi = (45.0 + rock.phi_deg / 2.0).to_radians().tan().powi(2);
            let ap_full = section.tip_area_m2;
            let goodman = qu_lab * (n_phi + 1.0) * ap_full;

            let ksp = (3.0 + rock.sd_m / section.diameter_m)
                / (10.0 * (1.0 + 300.0 * rock.td_m / rock.sd_m).sqrt());
            let canadian = 3.0 * qu_lab * ksp * 2.0 * ap_full;

            let governing = code_static.min(goodman).min(canadian);
            Ok(TipResistance {
                method,
                tip_n: None,
                ultimate_kn: governing,
                rock: Some(RockTipDetail {
                    qu_eff_kpa: qu_eff,
                    qu_lab_kpa: qu_lab,
                    annulus_area_m2: at,
                    plug_area_m2: ai,
                    code_static_kn: code_static,
                    n_phi,
                    tip_area_m2: ap_full,
                    goodman_kn: goodman,
                    sd_m: rock.sd_m,
                    td_m: rock.td_m,
                    ksp,
                    canadian_kn: canadian,
                    governing_kn: governing,
                }),
            })
        }
    }
}

// ============================================================================
// Ground Capacity & Combination
// ============================================================================

/// Which side governs the applied allowable vertical capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoverningCase {
    /// The reduced section (material) capacity controls
    Material,
    /// The allowable ground capacity controls
    Ground,
}

/// Combined vertical capacity result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalCapacity {
    /// Material-side capacity and reduction factors
    pub material: MaterialCapacity,

    /// Skin friction with per-layer breakdown
    pub skin: SkinFriction,

    /// Tip resistance with method sub-results
    pub tip: TipResistance,

    /// Ultimate ground capacity Qu = tip + skin (kN)
    pub ultimate_kn: f64,

    /// Tip share of Qu (kN)
    pub ultimate_tip_kn: f64,

    /// Skin share of Qu (kN)
    pub ultimate_skin_kn: f64,

    /// Safety factor applied to Qu
    pub safety_factor: f64,

    /// Allowable ground capacity Qu / FS (kN)
    pub ground_allowable_kn: f64,

    /// Applied allowable capacity = min(material, ground) (kN)
    pub applied_allowable_kn: f64,

    /// Which operand controls the applied value
    pub governed_by: GoverningCase,
}

/// Combine material, skin and tip results into the vertical capacity record.
pub fn vertical_capacity(
    material: MaterialCapacity,
    skin: SkinFriction,
    tip: TipResistance,
) -> VerticalCapacity {
    let ultimate_tip = tip.ultimate_kn;
    let ultimate_skin = skin.total_kn();
    let ultimate = ultimate_tip + ultimate_skin;
    let ground_allowable = ultimate / FS_BEARING;
    let (applied, governed_by) = if material.capacity_kn <= ground_allowable {
        (material.capacity_kn, GoverningCase::Material)
    } else {
        (ground_allowable, GoverningCase::Ground)
    };

    VerticalCapacity {
        material,
        skin,
        tip,
        ultimate_kn: ultimate,
        ultimate_tip_kn: ultimate_tip,
        ultimate_skin_kn: ultimate_skin,
        safety_factor: FS_BEARING,
        ground_allowable_kn: ground_allowable,
        applied_allowable_kn: applied,
        governed_by,
    }
}
