use crate::email::EmailAddress;
use crate::enums::RoiPercentage;
use crate::lenient;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A parameter set exactly as a caller supplied it.
///
/// Every field is optional so that a missing value can be reported as a
/// validation violation instead of failing deserialization. Numeric fields
/// also accept numeric strings, and a blank string counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub monthly_invoice_volume: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub num_ap_staff: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub avg_hours_per_invoice: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub hourly_wage: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub error_rate_manual: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub error_cost: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::months"
    )]
    pub time_horizon_months: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::decimal"
    )]
    pub one_time_implementation_cost: Option<Decimal>,
}

/// A complete, validated parameter set. This is what the calculator consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Invoices processed per month.
    pub monthly_invoice_volume: Decimal,
    /// Accounts-payable headcount.
    pub num_ap_staff: Decimal,
    pub avg_hours_per_invoice: Decimal,
    pub hourly_wage: Decimal,
    /// Manual error rate, in percent (0-100).
    pub error_rate_manual: Decimal,
    /// Cost of correcting one erroneous invoice.
    pub error_cost: Decimal,
    pub time_horizon_months: i64,
    pub one_time_implementation_cost: Decimal,
}

/// The outcome of a single calculation. Currency amounts carry two decimal
/// places, `payback_months` carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub monthly_savings: Decimal,
    pub cumulative_savings: Decimal,
    pub net_savings: Decimal,
    pub payback_months: Decimal,
    pub roi_percentage: RoiPercentage,
    pub labor_cost_manual: Decimal,
    pub auto_cost: Decimal,
    pub error_savings: Decimal,
}

/// A named, persisted scenario: its parameters plus the results computed when
/// it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub scenario_name: String,
    #[serde(flatten)]
    pub params: ScenarioParams,
    pub results: ScenarioResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An email captured when somebody downloads a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub email: EmailAddress,
    pub scenario_id: Uuid,
    pub report_downloaded: bool,
    pub report_downloaded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
