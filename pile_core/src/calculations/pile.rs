//! # Pile Bearing Capacity Calculation
//!
//! The top-level engine: one input record in, one result record out. The
//! stages run leaves-first (section, material, skin, tip, combination,
//! horizontal, pull-out, settlement), each depending only on earlier
//! outputs. The call is pure and deterministic - identical inputs produce
//! bit-identical results.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::calculations::pile::{calculate, PileInput, SoilLayer, SptRecord};
//! use pile_core::materials::PileType;
//!
//! let input = PileInput {
//!     label: "P-1".to_string(),
//!     pile_type: PileType::Phc,
//!     diameter_mm: 500.0,
//!     thickness_mm: 80.0,
//!     pile_top_el: 130.0,
//!     ground_el: 127.38,
//!     bearing_el: 119.98,
//!     gwl_depth_m: 3.75,
//!     ..Default::default()
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.vertical.applied_allowable_kn > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::horizontal::{horizontal_capacity, HorizontalCapacity};
use crate::calculations::pullout::{pullout_capacity, PulloutCapacity};
use crate::calculations::section::{
    material_capacity, resolve_section, JointType, PileSection,
};
use crate::calculations::settlement::{settlement, Settlement};
use crate::calculations::vertical::{
    skin_friction, tip_resistance, vertical_capacity, BearingMethod, RockParams, VerticalCapacity,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{PhcGrade, PileType};
use crate::units::DEFAULT_UNIT_WEIGHT;

/// One averaged soil layer, top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Soil label (see [`crate::materials::soil::SOIL_LABELS`]);
    /// unmapped labels classify as sand
    pub soil_type: String,

    /// Layer thickness (m)
    pub thickness_m: f64,

    /// Representative SPT N for the layer
    pub avg_n: f64,

    /// Unit weight (kN/m3)
    pub unit_weight: f64,
}

/// One SPT log record, ordered by depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SptRecord {
    /// Depth below ground (m)
    pub depth_m: f64,

    /// Blow count N
    pub n: f64,

    /// Soil label remark
    #[serde(default)]
    pub soil_type: String,
}

fn default_corrosion_mm() -> f64 {
    2.0
}

fn default_disp_cm() -> f64 {
    1.5
}

fn default_alpha() -> f64 {
    1.0
}

/// Input record for one pile design calculation.
///
/// Elevations are signed (relative to the project datum); dimensions are
/// millimeter catalog keys; everything else is SI. Optional fields default
/// to the values the design sheets assume when left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileInput {
    /// User label for this pile (e.g. "P-1", borehole number)
    pub label: String,

    /// Pile material type
    pub pile_type: PileType,

    /// Nominal outer diameter (mm)
    pub diameter_mm: f64,

    /// Wall thickness (mm)
    pub thickness_mm: f64,

    /// Strength grade (PHC only)
    pub phc_grade: PhcGrade,

    /// Corrosion allowance (mm, steel only)
    pub corrosion_mm: f64,

    /// Pile top elevation (EL, m)
    pub pile_top_el: f64,

    /// Ground surface elevation (EL, m)
    pub ground_el: f64,

    /// Bearing stratum elevation at the pile tip (EL, m)
    pub bearing_el: f64,

    /// Groundwater depth below ground (m)
    pub gwl_depth_m: f64,

    /// Tip bearing-resistance method; defaults per pile type
    /// (soil bearing for PHC, rock socket for steel)
    pub bearing_method: Option<BearingMethod>,

    /// Rock/socket parameters (rock method only)
    pub rock: RockParams,

    /// Number of splice joints
    pub joint_count: u32,

    /// Splice joint type
    pub joint_type: JointType,

    /// Allowable lateral displacement (cm)
    pub allowable_disp_cm: f64,

    /// Yield/limit stress for Broms Case 2 (kPa); defaults per pile type
    /// (20 MPa for PHC, 235 MPa for steel)
    pub yield_stress_kpa: Option<f64>,

    /// Lateral coefficient multiplier alpha for the Kh formulas
    pub alpha: f64,

    /// Averaged soil layers, top to bottom
    pub layers: Vec<SoilLayer>,

    /// SPT log records, ordered by depth
    pub spt: Vec<SptRecord>,
}

impl Default for PileInput {
    fn default() -> Self {
        PileInput {
            label: String::new(),
            pile_type: PileType::Phc,
            diameter_mm: 0.0,
            thickness_mm: 0.0,
            phc_grade: PhcGrade::A,
            corrosion_mm: default_corrosion_mm(),
            pile_top_el: 0.0,
            ground_el: 0.0,
            bearing_el: 0.0,
            gwl_depth_m: 0.0,
            bearing_method: None,
            rock: RockParams::default(),
            joint_count: 0,
            joint_type: JointType::Welding,
            allowable_disp_cm: default_disp_cm(),
            yield_stress_kpa: None,
            alpha: default_alpha(),
            layers: Vec::new(),
            spt: Vec::new(),
        }
    }
}

impl PileInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.thickness_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "thickness_mm",
                self.thickness_mm.to_string(),
                "Wall thickness must be positive",
            ));
        }
        if self.pile_top_el <= self.bearing_el {
            return Err(CalcError::invalid_input(
                "bearing_el",
                self.bearing_el.to_string(),
                "Bearing elevation must be below the pile top (length must be positive)",
            ));
        }
        if self.allowable_disp_cm <= 0.0 {
            return Err(CalcError::invalid_input(
                "allowable_disp_cm",
                self.allowable_disp_cm.to_string(),
                "Allowable displacement must be positive",
            ));
        }
        if self.alpha <= 0.0 {
            return Err(CalcError::invalid_input(
                "alpha",
                self.alpha.to_string(),
                "Lateral coefficient multiplier must be positive",
            ));
        }
        if let Some(sigma) = self.yield_stress_kpa {
            if sigma <= 0.0 {
                return Err(CalcError::invalid_input(
                    "yield_stress_kpa",
                    sigma.to_string(),
                    "Yield stress must be positive",
                ));
            }
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.thickness_m < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("layers[{i}].thickness_m"),
                    layer.thickness_m.to_string(),
                    "Layer thickness cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Pile length from top to bearing elevation (m)
    pub fn pile_length_m(&self) -> f64 {
        self.pile_top_el - self.bearing_el
    }

    /// Tip method, defaulted per pile type when not selected
    pub fn method(&self) -> BearingMethod {
        self.bearing_method
            .unwrap_or_else(|| BearingMethod::default_for(self.pile_type))
    }

    /// Yield/limit stress, defaulted per pile type when not given (kPa)
    pub fn yield_stress(&self) -> f64 {
        self.yield_stress_kpa.unwrap_or(match self.pile_type {
            PileType::Phc => 20_000.0,
            PileType::SteelPipe => 235_000.0,
        })
    }
}

/// Complete result record: every intermediate and final quantity of the
/// stages, fully reconstructible from the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileResult {
    /// Label copied from the input
    pub label: String,

    /// Resolved section properties
    pub section: PileSection,

    /// Pile length (m)
    pub pile_length_m: f64,

    /// Cut/fill depth: pile top minus ground elevation (m)
    pub cut_fill_depth_m: f64,

    /// Groundwater elevation (EL, m)
    pub gwl_el: f64,

    /// Vertical capacity (material, skin, tip, combination)
    pub vertical: VerticalCapacity,

    /// Horizontal capacity (Kh table, Broms, Chang)
    pub horizontal: HorizontalCapacity,

    /// Pull-out capacity
    pub pullout: PulloutCapacity,

    /// Settlement estimate
    pub settlement: Settlement,
}

/// Run the full bearing capacity calculation.
///
/// # Arguments
///
/// * `input` - Pile design input with soil layers and SPT records
///
/// # Returns
///
/// * `Ok(PileResult)` - Complete stage-by-stage results
/// * `Err(CalcError)` - If inputs are invalid or the method is unsupported
pub fn calculate(input: &PileInput) -> CalcResult<PileResult> {
    input.validate()?;

    let section = resolve_section(
        input.pile_type,
        input.diameter_mm,
        input.thickness_mm,
        input.phc_grade,
        input.corrosion_mm,
    )?;
    let pile_length = input.pile_length_m();
    let gwl_el = input.ground_el - input.gwl_depth_m;

    let material = material_capacity(&section, pile_length, input.joint_count, input.joint_type);
    let skin = skin_friction(&input.layers, section.perimeter_m);
    let tip = tip_resistance(&section, input.method(), &input.spt, &input.rock)?;
    let vertical = vertical_capacity(material, skin, tip);

    let top_unit_weight = input
        .layers
        .first()
        .map(|l| l.unit_weight)
        .unwrap_or(DEFAULT_UNIT_WEIGHT);
    let horizontal = horizontal_capacity(
        &section,
        pile_length,
        top_unit_weight,
        &input.spt,
        input.alpha,
        input.allowable_disp_cm,
        input.yield_stress(),
    )?;

    let pullout = pullout_capacity(
        &section,
        pile_length,
        input.pile_top_el,
        gwl_el,
        vertical.ultimate_skin_kn,
    );

    let settlement = settlement(
        &section,
        pile_length,
        vertical.applied_allowable_kn,
        vertical.ultimate_kn,
        vertical.ultimate_tip_kn,
    );

    Ok(PileResult {
        label: input.label.clone(),
        section,
        pile_length_m: pile_length,
        cut_fill_depth_m: input.pile_top_el - input.ground_el,
        gwl_el,
        vertical,
        horizontal,
        pullout,
        settlement,
    })
}
