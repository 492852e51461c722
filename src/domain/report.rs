//! Report summary shared by the email and SMS generators.

use chrono::NaiveDate;

use super::format::{format_currency, format_trend};
use super::metrics::{MileageRates, ReportMetrics, TrendComparison};
use super::period::ReportPeriod;
use super::record::RecordSet;

pub const APP_NAME: &str = "EliteKPI";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub user_name: String,
    pub period: ReportPeriod,
    pub generated_on: NaiveDate,
    pub metrics: ReportMetrics,
    /// Present only for windows that have a predecessor.
    pub trend: Option<TrendComparison>,
}

impl ReportSummary {
    pub fn build(
        user_name: &str,
        period: ReportPeriod,
        records: &RecordSet,
        rates: &MileageRates,
        generated_on: NaiveDate,
    ) -> Self {
        let metrics = ReportMetrics::compute(&period.filter(records), rates);
        let trend = period.previous().map(|prev| {
            let previous = ReportMetrics::compute(&prev.filter(records), rates);
            TrendComparison::between(&metrics, &previous)
        });
        let user_name = match user_name.trim() {
            "" => "Agent".to_string(),
            name => name.to_string(),
        };
        Self {
            user_name,
            period,
            generated_on,
            metrics,
            trend,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "{APP_NAME} Report for {} - {}",
            self.user_name,
            self.period.label()
        )
    }

    fn trend_suffix(&self, change: impl Fn(&TrendComparison) -> f64) -> String {
        match &self.trend {
            Some(trend) => format!(" ({})", format_trend(change(trend), "last month")),
            None => String::new(),
        }
    }

    pub fn text_body(&self) -> String {
        let m = &self.metrics;
        let mut out = String::new();
        out.push_str(&format!("{APP_NAME} Performance Report\n"));
        out.push_str(&format!("Agent: {}\n", self.user_name));
        out.push_str(&format!("Period: {}\n", self.period.label()));
        out.push_str(&format!("Generated: {}\n\n", self.generated_on.format("%Y-%m-%d")));

        out.push_str(&format!(
            "Total Revenue: {}{}\n",
            format_currency(Some(m.total_revenue)),
            self.trend_suffix(|t| t.revenue_change)
        ));
        out.push_str(&format!(
            "Total Expenses: {}{}\n",
            format_currency(Some(m.total_expenses)),
            self.trend_suffix(|t| t.expenses_change)
        ));
        out.push_str(&format!(
            "Gas Costs: {} ({:.1} miles)\n",
            format_currency(Some(m.mileage_gas_costs)),
            m.total_miles
        ));
        out.push_str(&format!(
            "Net Profit: {}{}\n",
            format_currency(Some(m.net_profit)),
            self.trend_suffix(|t| t.net_profit_change)
        ));
        out.push_str(&format!("Hours Logged: {:.1}\n", m.total_hours));
        out.push_str(&format!(
            "Revenue per Hour: {}\n",
            format_currency(Some(m.revenue_per_hour))
        ));
        out.push_str(&format!(
            "Properties Closed: {} of {}{}\n",
            m.closed_properties,
            m.total_properties,
            self.trend_suffix(|t| t.closed_change)
        ));

        if !m.revenue_by_type.is_empty() {
            out.push_str("\nRevenue by Type:\n");
            for (kind, amount) in &m.revenue_by_type {
                out.push_str(&format!("  {}: {}\n", kind.label(), format_currency(Some(*amount))));
            }
        }

        if !m.expenses_by_category.is_empty() {
            out.push_str("\nExpenses by Category:\n");
            for (category, amount) in &m.expenses_by_category {
                out.push_str(&format!(
                    "  {}: {}\n",
                    category.label(),
                    format_currency(Some(*amount))
                ));
            }
        }

        out
    }

    /// Single line, short enough for one SMS segment in typical cases.
    pub fn sms_body(&self) -> String {
        let m = &self.metrics;
        format!(
            "{APP_NAME} {}: Revenue {}, Net {}, Closed {}",
            self.period.label(),
            format_currency(Some(m.total_revenue)),
            format_currency(Some(m.net_profit)),
            m.closed_properties
        )
    }
}
