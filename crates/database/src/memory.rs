use crate::error::DbError;
use crate::store::{LeadStore, ScenarioStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{EmailAddress, Lead, Scenario, ScenarioParams, ScenarioResult};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A process-local store with the same contract as `DbRepository`.
///
/// Scenarios are kept in insertion order, which is also creation order.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    scenarios: RwLock<Vec<Scenario>>,
    leads: RwLock<Vec<Lead>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScenarioStore for MemoryRepository {
    async fn create_scenario(
        &self,
        scenario_name: &str,
        params: &ScenarioParams,
        results: &ScenarioResult,
    ) -> Result<Scenario, DbError> {
        let mut scenarios = self.scenarios.write().await;
        if scenarios.iter().any(|s| s.scenario_name == scenario_name) {
            return Err(DbError::DuplicateName(scenario_name.to_string()));
        }

        let now = Utc::now();
        let scenario = Scenario {
            id: Uuid::new_v4(),
            scenario_name: scenario_name.to_string(),
            params: params.clone(),
            results: results.clone(),
            created_at: now,
            updated_at: now,
        };
        scenarios.push(scenario.clone());
        Ok(scenario)
    }

    async fn get_scenario(&self, id: Uuid) -> Result<Scenario, DbError> {
        self.scenarios
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DbError> {
        Ok(self.scenarios.read().await.iter().rev().cloned().collect())
    }

    async fn delete_scenario(&self, id: Uuid) -> Result<(), DbError> {
        let mut scenarios = self.scenarios.write().await;
        let position = scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or(DbError::NotFound)?;
        scenarios.remove(position);
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryRepository {
    async fn record_lead(
        &self,
        email: &EmailAddress,
        scenario_id: Uuid,
        downloaded_at: DateTime<Utc>,
    ) -> Result<Lead, DbError> {
        let lead = Lead {
            id: Uuid::new_v4(),
            email: email.clone(),
            scenario_id,
            report_downloaded: true,
            report_downloaded_at: Some(downloaded_at),
            created_at: Utc::now(),
        };
        self.leads.write().await.push(lead.clone());
        Ok(lead)
    }

    async fn leads_for_scenario(&self, scenario_id: Uuid) -> Result<Vec<Lead>, DbError> {
        Ok(self
            .leads
            .read()
            .await
            .iter()
            .filter(|l| l.scenario_id == scenario_id)
            .cloned()
            .collect())
    }
}
