//! # Report Rendering
//!
//! Turns a stored `Scenario` into a standalone, printable HTML document.
//!
//! Formatting helpers live in `format` so the layout code in `renderer` only
//! decides *where* values go, never *how* they look.

pub mod error;
pub mod format;
pub mod renderer;

pub use error::ReportError;
pub use renderer::{report_filename, RenderedReport, ReportRenderer};
