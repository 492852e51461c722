//! HTML report adapter.
//!
//! Renders a [`ReportSummary`] through an Askama template. The output is
//! used both as the HTML part of the report email and as a standalone file.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::domain::error::KpiError;
use crate::domain::format::{format_currency, format_trend};
use crate::domain::metrics::TrendComparison;
use crate::domain::report::{APP_NAME, ReportSummary};

struct Row {
    label: String,
    value: String,
    trend: String,
}

impl Row {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            trend: String::new(),
        }
    }

    fn with_trend(mut self, trend: Option<&TrendComparison>, pick: fn(&TrendComparison) -> f64) -> Self {
        if let Some(t) = trend {
            self.trend = format_trend(pick(t), "last month");
        }
        self
    }
}

#[derive(Template)]
#[template(path = "report_email.html")]
struct ReportTemplate<'a> {
    app_name: &'a str,
    subject: String,
    user_name: &'a str,
    period: String,
    generated_on: String,
    headline_rows: Vec<Row>,
    revenue_rows: Vec<Row>,
    expense_rows: Vec<Row>,
}

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, summary: &ReportSummary) -> Result<String, KpiError> {
        let m = &summary.metrics;
        let trend = summary.trend.as_ref();

        let headline_rows = vec![
            Row::new("Total Revenue", format_currency(Some(m.total_revenue)))
                .with_trend(trend, |t| t.revenue_change),
            Row::new("Total Expenses", format_currency(Some(m.total_expenses)))
                .with_trend(trend, |t| t.expenses_change),
            Row::new("Gas Costs", format_currency(Some(m.mileage_gas_costs))),
            Row::new("Net Profit", format_currency(Some(m.net_profit)))
                .with_trend(trend, |t| t.net_profit_change),
            Row::new("Hours Logged", format!("{:.1}", m.total_hours)),
            Row::new("Revenue per Hour", format_currency(Some(m.revenue_per_hour))),
            Row::new(
                "Properties Closed",
                format!("{} of {}", m.closed_properties, m.total_properties),
            )
            .with_trend(trend, |t| t.closed_change),
        ];

        let revenue_rows = m
            .revenue_by_type
            .iter()
            .map(|(kind, amount)| Row::new(kind.label(), format_currency(Some(*amount))))
            .collect();
        let expense_rows = m
            .expenses_by_category
            .iter()
            .map(|(category, amount)| Row::new(category.label(), format_currency(Some(*amount))))
            .collect();

        let template = ReportTemplate {
            app_name: APP_NAME,
            subject: summary.subject(),
            user_name: &summary.user_name,
            period: summary.period.label(),
            generated_on: summary.generated_on.format("%Y-%m-%d").to_string(),
            headline_rows,
            revenue_rows,
            expense_rows,
        };

        template.render().map_err(|e| KpiError::Render {
            reason: e.to_string(),
        })
    }

    pub fn write(&self, summary: &ReportSummary, output_path: &Path) -> Result<(), KpiError> {
        let html = self.render(summary)?;
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, html)?;
        Ok(())
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}
