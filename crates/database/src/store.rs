use crate::connection::{connect, run_migrations};
use crate::error::DbError;
use crate::memory::MemoryRepository;
use crate::repository::DbRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use configuration::DatabaseSettings;
use core_types::{EmailAddress, Lead, Scenario, ScenarioParams, ScenarioResult};
use std::sync::Arc;
use uuid::Uuid;

/// Persistence of named scenarios.
///
/// Names are unique: creating a second scenario with an existing name fails
/// with `DbError::DuplicateName`. Implementations are swapped freely (Postgres
/// in production, in-memory when no database is available and in tests).
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// Stores a new scenario and returns it with its assigned id and timestamps.
    async fn create_scenario(
        &self,
        scenario_name: &str,
        params: &ScenarioParams,
        results: &ScenarioResult,
    ) -> Result<Scenario, DbError>;

    /// Fetches one scenario by id, or `DbError::NotFound`.
    async fn get_scenario(&self, id: Uuid) -> Result<Scenario, DbError>;

    /// Fetches all scenarios, newest first.
    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DbError>;

    /// Removes one scenario by id, or `DbError::NotFound`.
    async fn delete_scenario(&self, id: Uuid) -> Result<(), DbError>;
}

/// Records who asked for a report.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Records that `email` downloaded the report for `scenario_id` at `downloaded_at`.
    async fn record_lead(
        &self,
        email: &EmailAddress,
        scenario_id: Uuid,
        downloaded_at: DateTime<Utc>,
    ) -> Result<Lead, DbError>;

    /// Fetches every lead captured for a scenario, oldest first.
    async fn leads_for_scenario(&self, scenario_id: Uuid) -> Result<Vec<Lead>, DbError>;
}

/// The pair of stores the application runs against.
#[derive(Clone)]
pub struct Storage {
    pub scenarios: Arc<dyn ScenarioStore>,
    pub leads: Arc<dyn LeadStore>,
    /// True when running on the in-memory fallback.
    pub ephemeral: bool,
}

impl Storage {
    pub fn postgres(repo: DbRepository) -> Self {
        let repo = Arc::new(repo);
        Self {
            scenarios: repo.clone(),
            leads: repo,
            ephemeral: false,
        }
    }

    pub fn in_memory() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        Self {
            scenarios: repo.clone(),
            leads: repo,
            ephemeral: true,
        }
    }
}

/// Connects to PostgreSQL and applies migrations.
///
/// If that fails and `settings.require` is false, the failure is logged and
/// an in-memory store is returned instead, so the service can still be
/// demonstrated without a database. Nothing stored in that mode survives a
/// restart.
pub async fn open_storage(settings: &DatabaseSettings) -> Result<Storage, DbError> {
    let attempt = async {
        let pool = connect(settings).await?;
        run_migrations(&pool).await?;
        Ok::<_, DbError>(DbRepository::new(pool))
    };

    match attempt.await {
        Ok(repo) => {
            tracing::info!("Connected to PostgreSQL and applied migrations.");
            Ok(Storage::postgres(repo))
        }
        Err(e) if !settings.require => {
            tracing::warn!(error = %e, "Database unavailable; falling back to the in-memory store.");
            Ok(Storage::in_memory())
        }
        Err(e) => Err(e),
    }
}
