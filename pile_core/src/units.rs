//! # Unit Types & Physical Constants
//!
//! Type-safe wrappers for the units that cross module boundaries, plus the
//! normative constants the design-code formulas depend on.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - the engine works in a consistent SI set (m, kN, kPa, degrees)
//! - JSON serialization stays clean (just numbers)
//! - zero runtime overhead
//!
//! Catalog keys are the one exception: pile diameters and wall thicknesses
//! are keyed in millimeters, matching how the section tables are published.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::units::{Meters, Millimeters, KiloNewtons, TonnesForce};
//!
//! let d: Meters = Millimeters(508.0).into();
//! assert!((d.0 - 0.508).abs() < 1e-12);
//!
//! let q: KiloNewtons = TonnesForce(169.0).into();
//! assert!((q.0 - 1657.32385).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters (catalog keys)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters (engine-internal)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in tonnes-force (legacy catalog values)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnesForce(pub f64);

/// Force in kilonewtons (engine-internal)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<TonnesForce> for KiloNewtons {
    fn from(tf: TonnesForce) -> Self {
        KiloNewtons(tf.0 * GRAVITY_KN_PER_TF)
    }
}

impl From<KiloNewtons> for TonnesForce {
    fn from(kn: KiloNewtons) -> Self {
        TonnesForce(kn.0 / GRAVITY_KN_PER_TF)
    }
}

// ============================================================================
// Normative Constants
// ============================================================================

/// Standard gravity conversion: 1 tf = 9.80665 kN, 1 kgf = 9.80665 N
pub const GRAVITY_KN_PER_TF: f64 = 9.80665;

/// Unit weight of water used by the buoyancy correction (kN/m3)
pub const WATER_UNIT_WEIGHT: f64 = 10.0;

/// Unit weight of concrete for PHC self-weight (kN/m3)
pub const CONCRETE_UNIT_WEIGHT: f64 = 24.0;

/// Unit weight of steel per net section area (kN/m per m2)
pub const STEEL_UNIT_WEIGHT: f64 = 78.5;

/// Steel yield stress for the non-catalog allowable load fallback (kPa)
pub const STEEL_YIELD_KPA: f64 = 235_000.0;

/// Default top-layer unit weight when no soil layers are given (kN/m3)
pub const DEFAULT_UNIT_WEIGHT: f64 = 18.0;

/// Safety factor on ultimate ground capacity (vertical and pull-out)
pub const FS_BEARING: f64 = 3.0;

/// Safety factor on Broms' ultimate lateral loads
pub const FS_BROMS: f64 = 2.5;

/// SPT N-value cap for the skin friction formulas
pub const SKIN_N_CAP: f64 = 30.0;

/// SPT N-value cap for the soil-bearing tip formula
pub const TIP_N_CAP: f64 = 50.0;

/// Default average N when no qualifying shallow SPT records exist
pub const DEFAULT_AVG_N: f64 = 10.0;

/// Unconfined compressive strength cap in the code static rock formula (kPa)
pub const QU_EFF_CAP_KPA: f64 = 10_000.0;

/// Serviceability limit on total settlement (mm)
pub const SETTLEMENT_LIMIT_MM: f64 = 25.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(609.6).into();
        assert!((m.0 - 0.6096).abs() < 1e-12);
        let mm: Millimeters = Meters(0.35).into();
        assert!((mm.0 - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_force_conversion() {
        let kn: KiloNewtons = TonnesForce(100.0).into();
        assert!((kn.0 - 980.665).abs() < 1e-9);
        let tf: TonnesForce = kn.into();
        assert!((tf.0 - 100.0).abs() < 1e-9);
    }
}
