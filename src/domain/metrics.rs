//! Aggregate metrics over a [`RecordSet`].
//!
//! Every field is defaulted here, at the aggregation boundary, so
//! presentation code never has to guard against missing values.

use std::collections::BTreeMap;

use super::calculator::{
    calculate_conversion_rate, calculate_days_on_market, calculate_gas_cost,
    calculate_offer_ratio, calculate_revenue_per_hour, calculate_roi, percent_change, sum_amounts,
};
use super::record::{CommissionType, ExpenseCategory, MileageLog, PropertyStatus, RecordSet};

pub const DEFAULT_MPG: f64 = 25.0;
pub const DEFAULT_GAS_PRICE: f64 = 3.5;

/// Vehicle figures used when a mileage log has no precomputed gas cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MileageRates {
    pub mpg: f64,
    pub gas_price: f64,
}

impl Default for MileageRates {
    fn default() -> Self {
        Self {
            mpg: DEFAULT_MPG,
            gas_price: DEFAULT_GAS_PRICE,
        }
    }
}

impl MileageRates {
    pub fn gas_cost(&self, log: &MileageLog) -> f64 {
        match log.gas_cost.filter(|c| c.is_finite()) {
            Some(cost) => cost,
            None => calculate_gas_cost(log.miles.unwrap_or(0.0), self.mpg, self.gas_price),
        }
    }

    pub fn total_gas_cost(&self, logs: &[MileageLog]) -> f64 {
        logs.iter().map(|log| self.gas_cost(log)).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub total_volume: f64,
    pub properties_closed: usize,
    pub active_listings: usize,
    pub under_contract_count: usize,
    pub under_contract_value: f64,
    pub pending_count: usize,
    pub pending_value: f64,
    pub withdrawn_properties: usize,
    pub expired_properties: usize,
    pub terminated_properties: usize,
    pub avg_home_sale_price: f64,
    pub avg_commission: f64,
    pub avg_days_on_market: f64,
    pub avg_offer_ratio: f64,
    pub total_hours: f64,
    pub revenue_per_hour: f64,
    pub conversion_rate: f64,
    pub roi_performance: f64,
    pub total_expenses: f64,
    pub mileage_gas_costs: f64,
    pub net_profit: f64,
}

impl DashboardMetrics {
    pub fn compute(records: &RecordSet, rates: &MileageRates) -> Self {
        let properties = &records.properties;
        let count = |status: PropertyStatus| properties.iter().filter(|p| p.status == status).count();
        let value = |status: PropertyStatus| -> f64 {
            properties
                .iter()
                .filter(|p| p.status == status)
                .map(|p| p.contract_value())
                .sum()
        };

        let base = ReportMetrics::compute(records, rates);
        let total_revenue = base.total_revenue;
        let properties_closed = base.closed_properties;

        let closed: Vec<_> = properties
            .iter()
            .filter(|p| p.status == PropertyStatus::Closed)
            .collect();
        let total_volume = sum_amounts(closed.iter().map(|p| p.sold_price));

        let avg_home_sale_price = average(total_volume, properties_closed);
        let avg_commission = average(total_revenue, records.commissions.len());

        let dated: Vec<i64> = closed
            .iter()
            .filter(|p| p.listing_date.is_some() && p.sold_date.is_some())
            .map(|p| calculate_days_on_market(p.listing_date, p.sold_date))
            .collect();
        let avg_days_on_market = average(dated.iter().sum::<i64>() as f64, dated.len());

        let ratios: Vec<f64> = closed
            .iter()
            .map(|p| calculate_offer_ratio(p.sold_price, p.listing_price))
            .filter(|r| *r != 0.0)
            .collect();
        let avg_offer_ratio = average(ratios.iter().sum(), ratios.len());

        DashboardMetrics {
            total_revenue,
            total_volume,
            properties_closed,
            active_listings: count(PropertyStatus::Listed),
            under_contract_count: count(PropertyStatus::ActiveUnderContract),
            under_contract_value: value(PropertyStatus::ActiveUnderContract),
            pending_count: count(PropertyStatus::Pending),
            pending_value: value(PropertyStatus::Pending),
            withdrawn_properties: count(PropertyStatus::Withdrawn),
            expired_properties: count(PropertyStatus::Expired),
            terminated_properties: count(PropertyStatus::Terminated),
            avg_home_sale_price,
            avg_commission,
            avg_days_on_market,
            avg_offer_ratio,
            total_hours: base.total_hours,
            revenue_per_hour: base.revenue_per_hour,
            conversion_rate: calculate_conversion_rate(
                properties_closed as f64,
                base.total_properties as f64,
            ),
            roi_performance: calculate_roi(total_revenue, base.investment()),
            total_expenses: base.total_expenses,
            mileage_gas_costs: base.mileage_gas_costs,
            net_profit: base.net_profit,
        }
    }
}

/// The subset of metrics the report generators summarise, plus breakdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportMetrics {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub mileage_gas_costs: f64,
    pub net_profit: f64,
    pub total_hours: f64,
    pub total_miles: f64,
    pub revenue_per_hour: f64,
    pub closed_properties: usize,
    pub total_properties: usize,
    pub expenses_by_category: BTreeMap<ExpenseCategory, f64>,
    pub revenue_by_type: BTreeMap<CommissionType, f64>,
}

impl ReportMetrics {
    pub fn compute(records: &RecordSet, rates: &MileageRates) -> Self {
        let total_revenue = sum_amounts(records.commissions.iter().map(|c| c.amount));
        let total_expenses = sum_amounts(records.expenses.iter().map(|e| e.amount));
        let mileage_gas_costs = rates.total_gas_cost(&records.mileage_logs);
        let total_hours = sum_amounts(records.time_entries.iter().map(|t| t.hours));
        let total_miles = sum_amounts(records.mileage_logs.iter().map(|m| m.miles));

        let mut expenses_by_category = BTreeMap::new();
        for expense in &records.expenses {
            *expenses_by_category.entry(expense.category).or_insert(0.0) +=
                sum_amounts([expense.amount]);
        }

        let mut revenue_by_type = BTreeMap::new();
        for commission in &records.commissions {
            *revenue_by_type.entry(commission.commission_type).or_insert(0.0) +=
                sum_amounts([commission.amount]);
        }

        ReportMetrics {
            total_revenue,
            total_expenses,
            mileage_gas_costs,
            net_profit: total_revenue - (total_expenses + mileage_gas_costs),
            total_hours,
            total_miles,
            revenue_per_hour: calculate_revenue_per_hour(total_revenue, total_hours),
            closed_properties: records
                .properties
                .iter()
                .filter(|p| p.status == PropertyStatus::Closed)
                .count(),
            total_properties: records.properties.len(),
            expenses_by_category,
            revenue_by_type,
        }
    }
}

impl ReportMetrics {
    /// Everything spent in the window: recorded expenses plus gas.
    pub fn investment(&self) -> f64 {
        self.total_expenses + self.mileage_gas_costs
    }
}

/// Percentage change of headline figures against the previous window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendComparison {
    pub revenue_change: f64,
    pub expenses_change: f64,
    pub net_profit_change: f64,
    pub closed_change: f64,
}

impl TrendComparison {
    pub fn between(current: &ReportMetrics, previous: &ReportMetrics) -> Self {
        Self {
            revenue_change: percent_change(current.total_revenue, previous.total_revenue),
            expenses_change: percent_change(current.total_expenses, previous.total_expenses),
            net_profit_change: percent_change(current.net_profit, previous.net_profit),
            closed_change: percent_change(
                current.closed_properties as f64,
                previous.closed_properties as f64,
            ),
        }
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
