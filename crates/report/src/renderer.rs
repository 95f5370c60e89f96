use crate::error::ReportError;
use crate::format::{currency, escape_html, grouped, payback, plain};
use chrono::NaiveDate;
use core_types::{EmailAddress, Scenario};
use std::fmt::Write;

const CONTENT_TYPE: &str = "text/html; charset=utf-8";

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 40px; color: #333; }
.header { text-align: center; border-bottom: 2px solid #007bff; padding-bottom: 20px; margin-bottom: 30px; }
.header h1 { color: #007bff; margin: 0; }
.section { margin-bottom: 30px; }
.section h2 { color: #007bff; border-bottom: 1px solid #ddd; padding-bottom: 10px; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
.item { padding: 10px; background: #f8f9fa; border-radius: 5px; }
.item strong { color: #007bff; }
.card { background: #e3f2fd; padding: 20px; border-radius: 8px; text-align: center; border-left: 4px solid #007bff; }
.card h3 { margin: 0 0 10px 0; color: #007bff; }
.card .value { font-size: 24px; font-weight: bold; color: #2e7d32; }
.summary { background: #f0f8ff; padding: 20px; border-radius: 8px; border: 2px solid #007bff; }
.footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; font-size: 12px; }
"#;

/// A finished document ready to be written to disk or sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders stored scenarios as standalone HTML reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `scenario` for the lead `prepared_for`, dated `generated_on`.
    pub fn render(
        &self,
        scenario: &Scenario,
        prepared_for: &EmailAddress,
        generated_on: NaiveDate,
    ) -> Result<RenderedReport, ReportError> {
        let mut html = String::with_capacity(8 * 1024);
        let name = escape_html(&scenario.scenario_name);

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">\n<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>ROI Report - {name}</title>")?;
        writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>")?;

        self.write_header(&mut html, &name, prepared_for, generated_on)?;
        self.write_inputs(&mut html, scenario)?;
        self.write_results(&mut html, scenario)?;
        self.write_breakdown(&mut html, scenario)?;
        self.write_summary(&mut html, scenario)?;

        writeln!(html, "<div class=\"footer\">")?;
        writeln!(
            html,
            "<p>This report was generated automatically by the Invoice Processing ROI Calculator</p>"
        )?;
        writeln!(html, "</div>\n</body>\n</html>")?;

        Ok(RenderedReport {
            filename: report_filename(&scenario.scenario_name),
            content_type: CONTENT_TYPE,
            bytes: html.into_bytes(),
        })
    }

    fn write_header(
        &self,
        html: &mut String,
        name: &str,
        prepared_for: &EmailAddress,
        generated_on: NaiveDate,
    ) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "<h1>Invoice Processing ROI Analysis</h1>")?;
        writeln!(html, "<h2>Scenario: {name}</h2>")?;
        writeln!(html, "<p>Generated on: {}</p>", generated_on.format("%B %-d, %Y"))?;
        writeln!(
            html,
            "<p>Prepared for: {}</p>",
            escape_html(prepared_for.as_str())
        )?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_inputs(&self, html: &mut String, scenario: &Scenario) -> Result<(), ReportError> {
        let p = &scenario.params;
        let items = [
            (
                "Monthly Invoice Volume",
                format!("{} invoices", grouped(p.monthly_invoice_volume)),
            ),
            ("AP Staff Count", format!("{} employees", plain(p.num_ap_staff))),
            ("Hours per Invoice", format!("{} hours", plain(p.avg_hours_per_invoice))),
            ("Hourly Wage", currency(p.hourly_wage)),
            ("Manual Error Rate", format!("{}%", plain(p.error_rate_manual))),
            ("Error Correction Cost", currency(p.error_cost)),
            ("Time Horizon", format!("{} months", p.time_horizon_months)),
            ("Implementation Cost", currency(p.one_time_implementation_cost)),
        ];
        write_item_section(html, "Input Parameters", &items)
    }

    fn write_results(&self, html: &mut String, scenario: &Scenario) -> Result<(), ReportError> {
        let r = &scenario.results;
        let cards = [
            ("Monthly Savings", currency(r.monthly_savings)),
            ("Payback Period", payback(r.payback_months)),
            ("Total ROI", r.roi_percentage.to_string()),
            ("Net Savings", currency(r.net_savings)),
        ];

        writeln!(html, "<div class=\"section\">\n<h2>ROI Analysis Results</h2>")?;
        writeln!(html, "<div class=\"grid\">")?;
        for (title, value) in cards {
            writeln!(
                html,
                "<div class=\"card\"><h3>{title}</h3><div class=\"value\">{value}</div></div>"
            )?;
        }
        writeln!(html, "</div>\n</div>")?;
        Ok(())
    }

    fn write_breakdown(&self, html: &mut String, scenario: &Scenario) -> Result<(), ReportError> {
        let r = &scenario.results;
        let items = [
            (
                "Current Manual Labor Cost",
                format!("{} per month", currency(r.labor_cost_manual)),
            ),
            ("Automation Cost", format!("{} per month", currency(r.auto_cost))),
            (
                "Error Reduction Savings",
                format!("{} per month", currency(r.error_savings)),
            ),
            (
                "Cumulative Savings",
                format!(
                    "{} over {} months",
                    currency(r.cumulative_savings),
                    scenario.params.time_horizon_months
                ),
            ),
        ];
        write_item_section(html, "Cost Breakdown", &items)
    }

    fn write_summary(&self, html: &mut String, scenario: &Scenario) -> Result<(), ReportError> {
        let r = &scenario.results;
        let p = &scenario.params;

        writeln!(html, "<div class=\"section\">\n<div class=\"summary\">")?;
        writeln!(html, "<h2>Executive Summary</h2>")?;
        writeln!(
            html,
            "<p>Based on your business parameters, switching to automated invoice processing \
             will generate <strong>{}</strong> in monthly savings. With an implementation cost of \
             <strong>{}</strong>, you'll achieve payback in <strong>{}</strong> and realize a \
             <strong>{}</strong> return on investment over {} months.</p>",
            currency(r.monthly_savings),
            currency(p.one_time_implementation_cost),
            payback(r.payback_months),
            r.roi_percentage,
            p.time_horizon_months,
        )?;
        writeln!(
            html,
            "<p>Total net savings over the analysis period: <strong>{}</strong></p>",
            currency(r.net_savings)
        )?;
        writeln!(html, "</div>\n</div>")?;
        Ok(())
    }
}

fn write_item_section(
    html: &mut String,
    heading: &str,
    items: &[(&str, String)],
) -> Result<(), ReportError> {
    writeln!(html, "<div class=\"section\">\n<h2>{heading}</h2>")?;
    writeln!(html, "<div class=\"grid\">")?;
    for (label, value) in items {
        writeln!(
            html,
            "<div class=\"item\"><strong>{label}:</strong><br>{}</div>",
            escape_html(value)
        )?;
    }
    writeln!(html, "</div>\n</div>")?;
    Ok(())
}

/// `ROI_Report_<name>.html`, with anything outside `[A-Za-z0-9_.-]` replaced
/// by `_` so the name is safe in a `Content-Disposition` header and on disk.
pub fn report_filename(scenario_name: &str) -> String {
    let safe: String = scenario_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("ROI_Report_{safe}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_sanitised() {
        assert_eq!(report_filename("Q3 Pilot"), "ROI_Report_Q3_Pilot.html");
        assert_eq!(report_filename("a/b\"c"), "ROI_Report_a_b_c.html");
        assert_eq!(report_filename("v1.2-final"), "ROI_Report_v1.2-final.html");
    }
}
