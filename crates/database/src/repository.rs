use crate::error::DbError;
use crate::store::{LeadStore, ScenarioStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{
    EmailAddress, Lead, RoiPercentage, Scenario, ScenarioParams, ScenarioResult,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

/// PostgreSQL implementation of both stores. Every SQL statement in the
/// service lives in this file.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

const SCENARIO_COLUMNS: &str = r#"
    scenario_id, scenario_name,
    monthly_invoice_volume, num_ap_staff, avg_hours_per_invoice, hourly_wage,
    error_rate_manual, error_cost, time_horizon_months, one_time_implementation_cost,
    monthly_savings, cumulative_savings, net_savings, payback_months, roi_percentage,
    labor_cost_manual, auto_cost, error_savings,
    created_at, updated_at
"#;

// This struct represents a row fetched from the scenarios table.
#[derive(FromRow, Debug, Clone)]
pub struct DbScenario {
    pub scenario_id: Uuid,
    pub scenario_name: String,
    pub monthly_invoice_volume: Decimal,
    pub num_ap_staff: Decimal,
    pub avg_hours_per_invoice: Decimal,
    pub hourly_wage: Decimal,
    pub error_rate_manual: Decimal,
    pub error_cost: Decimal,
    pub time_horizon_months: i64,
    pub one_time_implementation_cost: Decimal,
    pub monthly_savings: Decimal,
    pub cumulative_savings: Decimal,
    pub net_savings: Decimal,
    pub payback_months: Decimal,
    pub roi_percentage: Option<Decimal>,
    pub labor_cost_manual: Decimal,
    pub auto_cost: Decimal,
    pub error_savings: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbScenario> for Scenario {
    fn from(row: DbScenario) -> Self {
        Scenario {
            id: row.scenario_id,
            scenario_name: row.scenario_name,
            params: ScenarioParams {
                monthly_invoice_volume: row.monthly_invoice_volume,
                num_ap_staff: row.num_ap_staff,
                avg_hours_per_invoice: row.avg_hours_per_invoice,
                hourly_wage: row.hourly_wage,
                error_rate_manual: row.error_rate_manual,
                error_cost: row.error_cost,
                time_horizon_months: row.time_horizon_months,
                one_time_implementation_cost: row.one_time_implementation_cost,
            },
            results: ScenarioResult {
                monthly_savings: row.monthly_savings,
                cumulative_savings: row.cumulative_savings,
                net_savings: row.net_savings,
                payback_months: row.payback_months,
                roi_percentage: row
                    .roi_percentage
                    .map_or(RoiPercentage::Infinite, RoiPercentage::Finite),
                labor_cost_manual: row.labor_cost_manual,
                auto_cost: row.auto_cost,
                error_savings: row.error_savings,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Represents a row from the `leads` table.
#[derive(FromRow, Debug, Clone)]
pub struct DbLead {
    pub lead_id: Uuid,
    pub email: String,
    pub scenario_id: Uuid,
    pub report_downloaded: bool,
    pub report_downloaded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbLead> for Lead {
    type Error = DbError;

    fn try_from(row: DbLead) -> Result<Self, Self::Error> {
        Ok(Lead {
            id: row.lead_id,
            email: EmailAddress::parse(row.email)?,
            scenario_id: row.scenario_id,
            report_downloaded: row.report_downloaded,
            report_downloaded_at: row.report_downloaded_at,
            created_at: row.created_at,
        })
    }
}

impl DbRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScenarioStore for DbRepository {
    /// Inserts the scenario. The unique index on `scenario_name` turns a
    /// duplicate into `DbError::DuplicateName`.
    async fn create_scenario(
        &self,
        scenario_name: &str,
        params: &ScenarioParams,
        results: &ScenarioResult,
    ) -> Result<Scenario, DbError> {
        let query = format!(
            r#"
            INSERT INTO scenarios (
                scenario_id, scenario_name,
                monthly_invoice_volume, num_ap_staff, avg_hours_per_invoice, hourly_wage,
                error_rate_manual, error_cost, time_horizon_months, one_time_implementation_cost,
                monthly_savings, cumulative_savings, net_savings, payback_months, roi_percentage,
                labor_cost_manual, auto_cost, error_savings,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, NOW(), NOW()
            )
            RETURNING {SCENARIO_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, DbScenario>(&query)
            .bind(Uuid::new_v4())
            .bind(scenario_name)
            .bind(params.monthly_invoice_volume)
            .bind(params.num_ap_staff)
            .bind(params.avg_hours_per_invoice)
            .bind(params.hourly_wage)
            .bind(params.error_rate_manual)
            .bind(params.error_cost)
            .bind(params.time_horizon_months)
            .bind(params.one_time_implementation_cost)
            .bind(results.monthly_savings)
            .bind(results.cumulative_savings)
            .bind(results.net_savings)
            .bind(results.payback_months)
            .bind(results.roi_percentage.as_decimal()) // NULL when infinite
            .bind(results.labor_cost_manual)
            .bind(results.auto_cost)
            .bind(results.error_savings)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    DbError::DuplicateName(scenario_name.to_string())
                }
                other => other.into(),
            })?;

        Ok(row.into())
    }

    async fn get_scenario(&self, id: Uuid) -> Result<Scenario, DbError> {
        let query = format!("SELECT {SCENARIO_COLUMNS} FROM scenarios WHERE scenario_id = $1");
        let row = sqlx::query_as::<_, DbScenario>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;
        Ok(row.into())
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, DbError> {
        let query = format!("SELECT {SCENARIO_COLUMNS} FROM scenarios ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, DbScenario>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Scenario::from).collect())
    }

    async fn delete_scenario(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM scenarios WHERE scenario_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for DbRepository {
    async fn record_lead(
        &self,
        email: &EmailAddress,
        scenario_id: Uuid,
        downloaded_at: DateTime<Utc>,
    ) -> Result<Lead, DbError> {
        let row = sqlx::query_as::<_, DbLead>(
            r#"
            INSERT INTO leads (lead_id, email, scenario_id, report_downloaded, report_downloaded_at, created_at)
            VALUES ($1, $2, $3, TRUE, $4, NOW())
            RETURNING lead_id, email, scenario_id, report_downloaded, report_downloaded_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(scenario_id)
        .bind(downloaded_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn leads_for_scenario(&self, scenario_id: Uuid) -> Result<Vec<Lead>, DbError> {
        let rows = sqlx::query_as::<_, DbLead>(
            r#"
            SELECT lead_id, email, scenario_id, report_downloaded, report_downloaded_at, created_at
            FROM leads
            WHERE scenario_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(scenario_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Lead::try_from).collect()
    }
}
