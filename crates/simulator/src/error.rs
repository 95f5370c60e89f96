use thiserror::Error;

/// A single rule broken by a scenario's parameters.
///
/// The `Display` text of each variant is the message reported to callers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    #[error("Monthly invoice volume must be at least 1")]
    MonthlyInvoiceVolume,

    #[error("Number of AP staff must be at least 1")]
    ApStaff,

    #[error("Average hours per invoice must be at least 0.01")]
    AvgHoursPerInvoice,

    #[error("Hourly wage must be at least 1")]
    HourlyWage,

    #[error("Manual error rate must be between 0 and 100 percent")]
    ErrorRateManual,

    #[error("Error cost must be 0 or greater")]
    ErrorCost,

    #[error("Time horizon must be at least 1 month")]
    TimeHorizon,

    #[error("Implementation cost must be 0 or greater")]
    ImplementationCost,
}
