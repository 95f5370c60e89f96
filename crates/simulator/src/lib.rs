//! # ROI Simulator
//!
//! This crate holds the only real domain logic of the system: the rules that
//! decide whether a parameter set is acceptable, and the calculation that turns
//! an accepted parameter set into a `ScenarioResult`.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O, no clock, no randomness. It depends only on
//!   `core-types` and the `CalculationConstants` from `configuration`.
//! - **Validate, Then Calculate:** `validate` reports every broken rule at once.
//!   `RoiCalculator::calculate` only accepts a `ScenarioParams`, which can only be
//!   built from an input that passed validation (see `validated`).
//!
//! ## Public API
//!
//! - `validate` / `violations`: the input-validation contract.
//! - `validated`: validation plus conversion into `ScenarioParams`.
//! - `RoiCalculator`: the stateless calculator.
//! - `Violation`: the typed validation rules.

// Declare the modules that constitute this crate.
pub mod calculator;
pub mod error;
pub mod validation;

// Re-export the key components to create a clean, public-facing API.
pub use calculator::RoiCalculator;
pub use error::Violation;
pub use validation::{validate, validated, violations};
