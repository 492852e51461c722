//! Single-record business formulas.
//!
//! Every function here is total: zero denominators, missing inputs and
//! non-finite intermediates all collapse to `0.0`. Dashboard rendering must
//! never be interrupted by a bad record.

use chrono::NaiveDate;

const FULL_SPLIT: f64 = 100.0;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// `price × rate% × split%`. `split` defaults to a full (100%) share.
pub fn calculate_commission(price: f64, commission_rate: f64, split: Option<f64>) -> f64 {
    let split = split.unwrap_or(FULL_SPLIT);
    finite_or_zero(price * (commission_rate / 100.0) * (split / 100.0))
}

/// Return on investment as a percentage.
pub fn calculate_roi(revenue: f64, investment: f64) -> f64 {
    if investment == 0.0 {
        return 0.0;
    }
    finite_or_zero((revenue - investment) / investment * 100.0)
}

/// Calendar days between listing and sale, in either order.
pub fn calculate_days_on_market(listing_date: Option<NaiveDate>, sold_date: Option<NaiveDate>) -> i64 {
    match (listing_date, sold_date) {
        (Some(listed), Some(sold)) => (sold - listed).num_days().abs(),
        _ => 0,
    }
}

/// Sold price as a percentage of listing price.
pub fn calculate_offer_ratio(sold_price: Option<f64>, listing_price: Option<f64>) -> f64 {
    match (sold_price, listing_price) {
        (Some(sold), Some(listing)) if listing != 0.0 => finite_or_zero(sold / listing * 100.0),
        _ => 0.0,
    }
}

pub fn calculate_revenue_per_hour(total_revenue: f64, total_hours: f64) -> f64 {
    if total_hours == 0.0 {
        return 0.0;
    }
    finite_or_zero(total_revenue / total_hours)
}

pub fn calculate_conversion_rate(conversions: f64, opportunities: f64) -> f64 {
    if opportunities == 0.0 {
        return 0.0;
    }
    finite_or_zero(conversions / opportunities * 100.0)
}

pub fn calculate_gas_cost(miles: f64, mpg: f64, gas_price: f64) -> f64 {
    if mpg == 0.0 {
        return 0.0;
    }
    finite_or_zero(miles / mpg * gas_price)
}

/// Period-over-period change as a percentage of the earlier value.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    finite_or_zero((current - previous) / previous.abs() * 100.0)
}

/// Sum of optional amounts; a missing amount contributes nothing.
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    amounts
        .into_iter()
        .map(|amount| amount.filter(|v| v.is_finite()).unwrap_or(0.0))
        .sum()
}
