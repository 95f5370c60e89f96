use chrono::{NaiveDate, Utc};
use core_types::{EmailAddress, RoiPercentage, Scenario, ScenarioParams, ScenarioResult};
use report::ReportRenderer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn scenario(name: &str, implementation_cost: Decimal, roi: RoiPercentage) -> Scenario {
    let now = Utc::now();
    Scenario {
        id: Uuid::new_v4(),
        scenario_name: name.to_string(),
        params: ScenarioParams {
            monthly_invoice_volume: dec!(2000),
            num_ap_staff: dec!(3),
            avg_hours_per_invoice: dec!(0.17),
            hourly_wage: dec!(30),
            error_rate_manual: dec!(0.5),
            error_cost: dec!(100),
            time_horizon_months: 36,
            one_time_implementation_cost: implementation_cost,
        },
        results: ScenarioResult {
            monthly_savings: dec!(34100),
            cumulative_savings: dec!(1227600),
            net_savings: dec!(1177600),
            payback_months: dec!(1.5),
            roi_percentage: roi,
            labor_cost_manual: dec!(30600),
            auto_cost: dec!(400),
            error_savings: dec!(800),
        },
        created_at: now,
        updated_at: now,
    }
}

fn render(scenario: &Scenario) -> String {
    let email = EmailAddress::parse("cfo@example.com").unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let report = ReportRenderer::new().render(scenario, &email, date).unwrap();
    assert_eq!(report.content_type, "text/html; charset=utf-8");
    String::from_utf8(report.bytes).unwrap()
}

#[test]
fn report_contains_every_section() {
    let html = render(&scenario(
        "Q3 Pilot",
        dec!(50000),
        RoiPercentage::Finite(dec!(2355.20)),
    ));

    for heading in [
        "Scenario: Q3 Pilot",
        "Input Parameters",
        "ROI Analysis Results",
        "Cost Breakdown",
        "Executive Summary",
    ] {
        assert!(html.contains(heading), "missing {heading}");
    }
    assert!(html.contains("Generated on: March 7, 2025"));
    assert!(html.contains("Prepared for: cfo@example.com"));
    assert!(html.contains("Invoice Processing ROI Calculator"));
}

#[test]
fn values_are_formatted_for_readers() {
    let html = render(&scenario(
        "Q3 Pilot",
        dec!(50000),
        RoiPercentage::Finite(dec!(2355.20)),
    ));

    assert!(html.contains("2,000 invoices"));
    assert!(html.contains("0.17 hours"));
    assert!(html.contains("$34,100.00"));
    assert!(html.contains("$1,177,600.00"));
    assert!(html.contains("$1,227,600.00 over 36 months"));
    assert!(html.contains("$50,000.00"));
    assert!(html.contains("1.5 months"));
    assert!(html.contains("2355.20%"));
}

#[test]
fn zero_cost_reports_infinite_roi() {
    let html = render(&scenario("Free", Decimal::ZERO, RoiPercentage::Infinite));
    assert!(html.contains("Infinite"));
    assert!(html.contains("$0.00"));
}

#[test]
fn scenario_names_are_escaped_and_filename_is_safe() {
    let s = scenario(
        "<script>alert(1)</script>",
        dec!(50000),
        RoiPercentage::Finite(dec!(2355.20)),
    );
    let email = EmailAddress::parse("cfo@example.com").unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let report = ReportRenderer::new().render(&s, &email, date).unwrap();
    let html = String::from_utf8(report.bytes).unwrap();

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert_eq!(report.filename, "ROI_Report__script_alert_1___script_.html");
}
