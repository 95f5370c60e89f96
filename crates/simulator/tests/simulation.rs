use configuration::CalculationConstants;
use core_types::{RoiPercentage, ScenarioInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use simulator::{validate, validated, RoiCalculator, Violation};

fn parse(json: &str) -> ScenarioInput {
    serde_json::from_str(json).expect("valid JSON input")
}

#[test]
fn json_request_to_result() {
    let input = parse(
        r#"{
            "scenario_name": "Q4 rollout",
            "monthly_invoice_volume": 2000,
            "num_ap_staff": 3,
            "avg_hours_per_invoice": 0.17,
            "hourly_wage": 30,
            "error_rate_manual": 0.5,
            "error_cost": 100,
            "time_horizon_months": 36,
            "one_time_implementation_cost": 50000
        }"#,
    );
    assert!(validate(&input).is_empty());

    let params = validated(&input).unwrap();
    let result = RoiCalculator::new(CalculationConstants::default()).calculate(&params);

    assert_eq!(result.monthly_savings, dec!(34100));
    assert_eq!(result.payback_months, dec!(1.5));
    assert_eq!(result.roi_percentage, RoiPercentage::Finite(dec!(2355.2)));
}

#[test]
fn zero_staff_stops_before_calculation() {
    let input = parse(
        r#"{
            "monthly_invoice_volume": 2000,
            "num_ap_staff": 0,
            "avg_hours_per_invoice": 0.17,
            "hourly_wage": 30,
            "error_rate_manual": 0.5,
            "error_cost": 100,
            "time_horizon_months": 36
        }"#,
    );
    assert_eq!(
        validate(&input),
        vec!["Number of AP staff must be at least 1".to_string()]
    );
    assert_eq!(validated(&input), Err(vec![Violation::ApStaff]));
}

#[test]
fn omitted_implementation_cost_reports_infinite_roi() {
    let input = parse(
        r#"{
            "monthly_invoice_volume": 500,
            "num_ap_staff": 1,
            "avg_hours_per_invoice": 0.25,
            "hourly_wage": 22.5,
            "error_rate_manual": 2,
            "error_cost": 40,
            "time_horizon_months": 12
        }"#,
    );
    let params = validated(&input).unwrap();
    let result = RoiCalculator::default().calculate(&params);

    // labor 1 * 22.5 * 0.25 * 500 = 2812.5; auto 100; errors (0.02 - 0.001) * 500 * 40 = 380
    assert_eq!(result.labor_cost_manual, dec!(2812.5));
    assert_eq!(result.auto_cost, dec!(100));
    assert_eq!(result.error_savings, dec!(380));
    // (2812.5 + 380 - 100) * 1.1 = 3401.75
    assert_eq!(result.monthly_savings, dec!(3401.75));
    assert_eq!(result.cumulative_savings, dec!(40821));
    assert_eq!(result.payback_months, Decimal::ZERO);
    assert_eq!(result.roi_percentage, RoiPercentage::Infinite);
}

#[test]
fn injected_constants_change_the_projection() {
    let input = parse(
        r#"{
            "monthly_invoice_volume": 1000,
            "num_ap_staff": 2,
            "avg_hours_per_invoice": 0.1,
            "hourly_wage": 25,
            "error_rate_manual": 0.1,
            "error_cost": 10,
            "time_horizon_months": 6,
            "one_time_implementation_cost": 1000
        }"#,
    );
    let params = validated(&input).unwrap();
    let constants = CalculationConstants {
        automated_cost_per_invoice: dec!(1),
        error_rate_auto: dec!(0.1),
        min_roi_boost_factor: dec!(1),
    };
    let result = RoiCalculator::new(constants).calculate(&params);

    // labor 2 * 25 * 0.1 * 1000 = 5000; auto 1000; no error savings.
    assert_eq!(result.monthly_savings, dec!(4000));
    assert_eq!(result.net_savings, dec!(23000));
    assert_eq!(result.payback_months, dec!(0.3));
    assert_eq!(result.roi_percentage, RoiPercentage::Finite(dec!(2300)));
}
