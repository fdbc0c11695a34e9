//! # Pile Capacity Calculations
//!
//! This module contains the calculation stages for pile bearing capacity
//! design. Each stage follows the pattern:
//!
//! - Input parameters and result types (JSON-serializable)
//! - A pure function `stage(input...) -> result` (fallible stages return
//!   `CalcResult`)
//!
//! The stages compose in [`pile::calculate`], which runs the whole design
//! check from a single [`pile::PileInput`].
//!
//! ## Available Stages
//!
//! - [`section`] - Section property resolution and material capacity
//! - [`vertical`] - Skin friction, tip resistance, and the governing
//!   vertical capacity
//! - [`horizontal`] - Subgrade reaction, Broms, and Chang lateral capacity
//! - [`pullout`] - Tensile (pull-out) capacity
//! - [`settlement`] - Semi-empirical settlement estimate
//! - [`pile`] - The combined end-to-end calculation

pub mod horizontal;
pub mod pile;
pub mod pullout;
pub mod section;
pub mod settlement;
pub mod vertical;

// Re-export commonly used types
pub use pile::{calculate, PileInput, PileResult, SoilLayer, SptRecord};
pub use section::{JointType, MaterialCapacity, PileSection};
pub use vertical::{BearingMethod, RockParams, VerticalCapacity};
