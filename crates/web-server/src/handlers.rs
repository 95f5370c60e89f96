use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use core_types::{EmailAddress, Scenario, ScenarioInput, ScenarioParams, ScenarioResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub inputs: ScenarioInput,
    pub results: ScenarioResult,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub success: bool,
    pub scenario: Scenario,
}

#[derive(Debug, Serialize)]
pub struct ScenarioListResponse {
    pub success: bool,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub scenario_id: Option<String>,
}

/// # GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
    })
}

/// # POST /api/simulate
/// Validates and calculates without storing anything.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScenarioInput>, JsonRejection>,
) -> Result<Json<SimulationResponse>, AppError> {
    let Json(inputs) = payload?;
    let params = checked_params(&inputs)?;
    let results = state.calculator.calculate(&params);
    warn_if_never_paid_back(&params, &results);

    Ok(Json(SimulationResponse {
        success: true,
        inputs,
        results,
    }))
}

/// # POST /api/scenarios
/// Validates, calculates and stores a named scenario.
pub async fn create_scenario(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScenarioInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ScenarioResponse>), AppError> {
    let Json(inputs) = payload?;
    let params = checked_params(&inputs)?;

    let name = inputs
        .scenario_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Scenario name is required".to_string()))?;

    let results = state.calculator.calculate(&params);
    warn_if_never_paid_back(&params, &results);

    let scenario = state.scenarios.create_scenario(name, &params, &results).await?;
    tracing::info!(scenario_id = %scenario.id, name = %scenario.scenario_name, "Scenario saved.");

    Ok((
        StatusCode::CREATED,
        Json(ScenarioResponse {
            success: true,
            scenario,
        }),
    ))
}

/// # GET /api/scenarios
/// Newest first.
pub async fn list_scenarios(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScenarioListResponse>, AppError> {
    let scenarios = state.scenarios.list_scenarios().await?;
    Ok(Json(ScenarioListResponse {
        success: true,
        scenarios,
    }))
}

/// # GET /api/scenarios/:id
pub async fn get_scenario(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScenarioResponse>, AppError> {
    let id = scenario_id(&id)?;
    let scenario = state.scenarios.get_scenario(id).await?;
    Ok(Json(ScenarioResponse {
        success: true,
        scenario,
    }))
}

/// # DELETE /api/scenarios/:id
pub async fn delete_scenario(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = scenario_id(&id)?;
    state.scenarios.delete_scenario(id).await?;
    tracing::info!(scenario_id = %id, "Scenario deleted.");
    Ok(Json(MessageResponse {
        success: true,
        message: "Scenario deleted successfully",
    }))
}

/// # POST /api/report/generate
/// Records the requester as a lead, then returns the report as an attachment.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(email), Some(raw_id)) = (non_empty(request.email), non_empty(request.scenario_id))
    else {
        return Err(AppError::BadRequest(
            "Email and scenario_id are required".to_string(),
        ));
    };

    let email = EmailAddress::parse(email.trim())
        .map_err(|_| AppError::BadRequest("Invalid email format".to_string()))?;
    let id = scenario_id(&raw_id)?;
    let scenario = state.scenarios.get_scenario(id).await?;

    let now = Utc::now();
    let lead = state.leads.record_lead(&email, scenario.id, now).await?;
    tracing::info!(lead_id = %lead.id, scenario_id = %scenario.id, "Lead captured for report download.");

    let report = state.renderer.render(&scenario, &email, now.date_naive())?;
    let disposition = format!("attachment; filename=\"{}\"", report.filename);

    Ok((
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

fn checked_params(inputs: &ScenarioInput) -> Result<ScenarioParams, AppError> {
    simulator::validated(inputs).map_err(|violations| {
        AppError::Validation(violations.iter().map(ToString::to_string).collect())
    })
}

/// Ids that do not parse cannot name a stored scenario.
fn scenario_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::scenario_not_found())
}

fn warn_if_never_paid_back(params: &ScenarioParams, results: &ScenarioResult) {
    if params.one_time_implementation_cost > Decimal::ZERO && results.monthly_savings <= Decimal::ZERO {
        tracing::warn!(
            monthly_savings = %results.monthly_savings,
            implementation_cost = %params.one_time_implementation_cost,
            "Scenario never recovers its implementation cost."
        );
    }
}
