pub mod email;
pub mod enums;
pub mod error;
mod lenient;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use email::EmailAddress;
pub use enums::RoiPercentage;
pub use error::CoreError;
pub use structs::{Lead, Scenario, ScenarioInput, ScenarioParams, ScenarioResult};
