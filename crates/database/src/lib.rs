//! # Scenario Storage Crate
//!
//! This crate owns persistence for the ROI service: saved scenarios and the
//! leads captured when reports are generated.
//!
//! ## Architectural Principles
//!
//! - **Adapter Layer:** All database-specific logic lives here. The rest of the
//!   application talks to the `ScenarioStore` and `LeadStore` traits and never
//!   sees SQL.
//! - **Swappable Backends:** `DbRepository` stores to PostgreSQL through a `sqlx`
//!   connection pool; `MemoryRepository` keeps everything in process and backs
//!   tests and database-less demo runs.
//! - **Asynchronous & Pooled:** All operations are asynchronous.
//!
//! ## Public API
//!
//! - `open_storage`: connects, migrates, and falls back to memory when allowed.
//! - `connect` / `run_migrations`: the lower-level PostgreSQL setup.
//! - `ScenarioStore` / `LeadStore`: the storage contracts.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryRepository;
pub use repository::DbRepository;
pub use store::{open_storage, LeadStore, ScenarioStore, Storage};
