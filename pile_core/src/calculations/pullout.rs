//! # Pull-out Stage
//!
//! Allowable pull-out resistance: skin friction under tension over the
//! bearing safety factor, plus the effective (buoyancy-corrected) pile
//! self-weight. Negative effective weight is clamped to zero, never
//! subtracted from the friction term.

use serde::{Deserialize, Serialize};

use crate::calculations::section::PileSection;
use crate::units::{FS_BEARING, WATER_UNIT_WEIGHT};

/// Pull-out capacity breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulloutCapacity {
    /// Pile length above the groundwater table (m)
    pub above_water_m: f64,

    /// Pile length below the groundwater table (m)
    pub below_water_m: f64,

    /// Effective self-weight after the buoyant tip-volume correction (kN).
    /// Can be negative for light sections mostly below water.
    pub effective_weight_kn: f64,

    /// Total skin friction under tension (kN)
    pub skin_total_kn: f64,

    /// Allowable pull-out = skin/FS + max(weight, 0) (kN)
    pub allowable_kn: f64,
}

/// Evaluate the pull-out stage.
///
/// The pile length is split at the groundwater elevation; the submerged
/// segment gets a buoyancy deduction of tip-volume x 10 kN/m3.
pub fn pullout_capacity(
    section: &PileSection,
    pile_length_m: f64,
    pile_top_el: f64,
    gwl_el: f64,
    skin_total_kn: f64,
) -> PulloutCapacity {
    let above_water = (pile_top_el - gwl_el).max(0.0);
    let below_water = pile_length_m - above_water;
    let buoyancy = if below_water > 0.0 {
        section.tip_area_m2 * below_water * WATER_UNIT_WEIGHT
    } else {
        0.0
    };
    let effective_weight = section.unit_weight_kn_m * pile_length_m - buoyancy;
    let allowable = skin_total_kn / FS_BEARING + effective_weight.max(0.0);

    PulloutCapacity {
        above_water_m: above_water,
        below_water_m: below_water,
        effective_weight_kn: effective_weight,
        skin_total_kn,
        allowable_kn: allowable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::resolve_section;
    use crate::materials::{PhcGrade, PileType};

    fn phc_section() -> PileSection {
        resolve_section(PileType::Phc, 500.0, 80.0, PhcGrade::A, 0.0).unwrap()
    }

    #[test]
    fn test_nbh03_pullout() {
        // top EL 130, ground EL 127.38, GWL depth 3.75 -> GWL EL 123.63
        let s = phc_section();
        let p = pullout_capacity(&s, 10.02, 130.0, 123.63, 571.41643378);
        assert!((p.above_water_m - 6.37).abs() < 1e-9);
        assert!((p.below_water_m - 3.65).abs() < 1e-9);
        assert!((p.effective_weight_kn - 18.22792975899829).abs() < 1e-6);
        assert!((p.allowable_kn - 208.70007435).abs() < 1e-4);
    }

    #[test]
    fn test_dry_pile_no_buoyancy() {
        let s = phc_section();
        // groundwater below the pile tip: whole length above water
        let p = pullout_capacity(&s, 10.0, 130.0, 115.0, 300.0);
        assert_eq!(p.below_water_m, -5.0);
        assert!((p.effective_weight_kn - s.unit_weight_kn_m * 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_weight_clamped() {
        // fully submerged steel pipe: buoyancy on the gross tip volume
        // exceeds the light net-section self-weight
        let s = resolve_section(PileType::SteelPipe, 609.6, 12.0, PhcGrade::A, 2.0).unwrap();
        let p = pullout_capacity(&s, 10.0, 130.0, 130.0, 300.0);
        assert!(p.effective_weight_kn < 0.0);
        assert!((p.allowable_kn - 300.0 / 3.0).abs() < 1e-12);
    }
}
