use crate::error::Violation;
use core_types::{ScenarioInput, ScenarioParams};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Checks every rule against `input` and returns the messages of the ones that
/// fail, in a fixed order. An empty list means the input is acceptable.
pub fn validate(input: &ScenarioInput) -> Vec<String> {
    violations(input).iter().map(ToString::to_string).collect()
}

/// The typed form of [`validate`].
pub fn violations(input: &ScenarioInput) -> Vec<Violation> {
    let mut found = Vec::new();

    if below_positive_minimum(input.monthly_invoice_volume, dec!(1)) {
        found.push(Violation::MonthlyInvoiceVolume);
    }
    if below_positive_minimum(input.num_ap_staff, dec!(1)) {
        found.push(Violation::ApStaff);
    }
    if below_positive_minimum(input.avg_hours_per_invoice, dec!(0.01)) {
        found.push(Violation::AvgHoursPerInvoice);
    }
    if below_positive_minimum(input.hourly_wage, dec!(1)) {
        found.push(Violation::HourlyWage);
    }
    match input.error_rate_manual {
        Some(rate) if rate >= Decimal::ZERO && rate <= dec!(100) => {}
        _ => found.push(Violation::ErrorRateManual),
    }
    match input.error_cost {
        Some(cost) if cost >= Decimal::ZERO => {}
        _ => found.push(Violation::ErrorCost),
    }
    match input.time_horizon_months {
        Some(months) if months >= 1 => {}
        _ => found.push(Violation::TimeHorizon),
    }
    if input
        .one_time_implementation_cost
        .is_some_and(|cost| cost < Decimal::ZERO)
    {
        found.push(Violation::ImplementationCost);
    }

    found
}

/// Validates `input` and, if every rule passes, converts it into the
/// parameter set the calculator accepts. A missing implementation cost
/// becomes zero.
pub fn validated(input: &ScenarioInput) -> Result<ScenarioParams, Vec<Violation>> {
    let found = violations(input);

    // A missing required field is always among `found`.
    let (
        Some(monthly_invoice_volume),
        Some(num_ap_staff),
        Some(avg_hours_per_invoice),
        Some(hourly_wage),
        Some(error_rate_manual),
        Some(error_cost),
        Some(time_horizon_months),
    ) = (
        input.monthly_invoice_volume,
        input.num_ap_staff,
        input.avg_hours_per_invoice,
        input.hourly_wage,
        input.error_rate_manual,
        input.error_cost,
        input.time_horizon_months,
    )
    else {
        return Err(found);
    };
    if !found.is_empty() {
        return Err(found);
    }

    Ok(ScenarioParams {
        monthly_invoice_volume,
        num_ap_staff,
        avg_hours_per_invoice,
        hourly_wage,
        error_rate_manual,
        error_cost,
        time_horizon_months,
        one_time_implementation_cost: input
            .one_time_implementation_cost
            .unwrap_or(Decimal::ZERO),
    })
}

/// A field with a positive minimum counts as invalid when it is absent, when
/// it is exactly zero, or when it is below the minimum. Zero is named
/// explicitly because it is treated the same as a missing value.
fn below_positive_minimum(value: Option<Decimal>, minimum: Decimal) -> bool {
    match value {
        None => true,
        Some(v) => v.is_zero() || v < minimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ScenarioInput {
        ScenarioInput {
            scenario_name: Some("Baseline".to_string()),
            monthly_invoice_volume: Some(dec!(2000)),
            num_ap_staff: Some(dec!(3)),
            avg_hours_per_invoice: Some(dec!(0.17)),
            hourly_wage: Some(dec!(30)),
            error_rate_manual: Some(dec!(0.5)),
            error_cost: Some(dec!(100)),
            time_horizon_months: Some(36),
            one_time_implementation_cost: Some(dec!(50000)),
        }
    }

    #[test]
    fn valid_input_has_no_violations() {
        assert!(validate(&valid_input()).is_empty());
    }

    #[test]
    fn implementation_cost_is_optional() {
        let input = ScenarioInput {
            one_time_implementation_cost: None,
            ..valid_input()
        };
        assert!(validate(&input).is_empty());
        let params = validated(&input).unwrap();
        assert_eq!(params.one_time_implementation_cost, Decimal::ZERO);
    }

    #[test]
    fn zero_is_accepted_where_the_minimum_is_zero() {
        let input = ScenarioInput {
            error_rate_manual: Some(dec!(0)),
            error_cost: Some(dec!(0)),
            one_time_implementation_cost: Some(dec!(0)),
            ..valid_input()
        };
        assert!(validate(&input).is_empty());
    }

    #[test]
    fn each_boundary_violation_reports_only_its_own_message() {
        let cases: Vec<(ScenarioInput, &str)> = vec![
            (
                ScenarioInput { monthly_invoice_volume: Some(dec!(0)), ..valid_input() },
                "Monthly invoice volume must be at least 1",
            ),
            (
                ScenarioInput { num_ap_staff: Some(dec!(0)), ..valid_input() },
                "Number of AP staff must be at least 1",
            ),
            (
                ScenarioInput { avg_hours_per_invoice: Some(dec!(0.009)), ..valid_input() },
                "Average hours per invoice must be at least 0.01",
            ),
            (
                ScenarioInput { hourly_wage: Some(dec!(0.99)), ..valid_input() },
                "Hourly wage must be at least 1",
            ),
            (
                ScenarioInput { error_rate_manual: Some(dec!(100.01)), ..valid_input() },
                "Manual error rate must be between 0 and 100 percent",
            ),
            (
                ScenarioInput { error_rate_manual: Some(dec!(-0.1)), ..valid_input() },
                "Manual error rate must be between 0 and 100 percent",
            ),
            (
                ScenarioInput { error_cost: Some(dec!(-1)), ..valid_input() },
                "Error cost must be 0 or greater",
            ),
            (
                ScenarioInput { time_horizon_months: Some(0), ..valid_input() },
                "Time horizon must be at least 1 month",
            ),
            (
                ScenarioInput { one_time_implementation_cost: Some(dec!(-5)), ..valid_input() },
                "Implementation cost must be 0 or greater",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(validate(&input), vec![expected.to_string()]);
        }
    }

    #[test]
    fn missing_fields_are_all_reported_together() {
        let found = violations(&ScenarioInput::default());
        assert_eq!(
            found,
            vec![
                Violation::MonthlyInvoiceVolume,
                Violation::ApStaff,
                Violation::AvgHoursPerInvoice,
                Violation::HourlyWage,
                Violation::ErrorRateManual,
                Violation::ErrorCost,
                Violation::TimeHorizon,
            ]
        );
    }

    #[test]
    fn boundary_values_are_valid() {
        let input = ScenarioInput {
            monthly_invoice_volume: Some(dec!(1)),
            num_ap_staff: Some(dec!(1)),
            avg_hours_per_invoice: Some(dec!(0.01)),
            hourly_wage: Some(dec!(1)),
            error_rate_manual: Some(dec!(100)),
            error_cost: Some(dec!(0)),
            time_horizon_months: Some(1),
            one_time_implementation_cost: None,
            scenario_name: None,
        };
        assert!(validate(&input).is_empty());
    }

    #[test]
    fn zero_staff_yields_no_params() {
        let input = ScenarioInput { num_ap_staff: Some(dec!(0)), ..valid_input() };
        let err = validated(&input).unwrap_err();
        assert_eq!(err, vec![Violation::ApStaff]);
    }

    #[test]
    fn negative_horizon_is_rejected() {
        let input = ScenarioInput { time_horizon_months: Some(-3), ..valid_input() };
        assert_eq!(violations(&input), vec![Violation::TimeHorizon]);
    }
}
