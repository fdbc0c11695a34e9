//! # pile_core - Pile Foundation Bearing Capacity Engine
//!
//! `pile_core` evaluates single-pile foundation designs to KDS 11 50 40,
//! covering PHC and open-ended steel pipe piles. All inputs and outputs are
//! JSON-serializable, so the engine drops cleanly behind a CLI, a service,
//! or an AI-assistant protocol.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: Identical inputs produce identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::{calculate, PileInput};
//!
//! let input = PileInput {
//!     label: "P-1".to_string(),
//!     diameter_mm: 500.0,
//!     thickness_mm: 80.0,
//!     pile_top_el: 130.0,
//!     ground_el: 127.38,
//!     bearing_el: 119.98,
//!     ..Default::default()
//! };
//! let result = calculate(&input).unwrap();
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("applied_allowable_kn"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The calculation stages and the combined run
//! - [`materials`] - Pile section catalogs and the soil classification table
//! - [`units`] - Type-safe unit wrappers and shared physical constants
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, PileInput, PileResult};
pub use errors::{CalcError, CalcResult};
