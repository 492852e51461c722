//! Display strings for currency and percentages.

/// en-US currency, whole dollars: `$1,234`, `-$1,234`.
///
/// Absent, zero and non-finite amounts all render as `$0`.
pub fn format_currency(amount: Option<f64>) -> String {
    let value = match amount {
        Some(v) if v.is_finite() && v != 0.0 => v.round(),
        _ => return "$0".to_string(),
    };
    if value == 0.0 {
        return "$0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(value.abs() as u64))
}

/// One decimal place followed by `%`. Absent, non-finite and anything that
/// rounds to zero render as `0%`.
pub fn format_percentage(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => return "0%".to_string(),
    };
    // Ties round away from zero.
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        return "0%".to_string();
    }
    format!("{rounded:.1}%")
}

/// Signed trend text, e.g. `+12.5% from last month`.
pub fn format_trend(change: f64, baseline_label: &str) -> String {
    let percentage = format_percentage(Some(change));
    let sign = if change > 0.0 && percentage != "0%" { "+" } else { "" };
    format!("{sign}{percentage} from {baseline_label}")
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    for group in groups.iter().rev() {
        out.push_str(&format!(",{group:03}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_missing_and_zero() {
        assert_eq!(format_currency(None), "$0");
        assert_eq!(format_currency(Some(0.0)), "$0");
        assert_eq!(format_currency(Some(f64::NAN)), "$0");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(Some(1234.0)), "$1,234");
        assert_eq!(format_currency(Some(999.0)), "$999");
        assert_eq!(format_currency(Some(1_000_000.0)), "$1,000,000");
        assert_eq!(format_currency(Some(12_005_030.0)), "$12,005,030");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(Some(1234.5)), "$1,235");
        assert_eq!(format_currency(Some(1234.49)), "$1,234");
        assert_eq!(format_currency(Some(0.4)), "$0");
    }

    #[test]
    fn currency_negative() {
        assert_eq!(format_currency(Some(-2500.0)), "-$2,500");
    }

    #[test]
    fn percentage_missing_and_zero() {
        assert_eq!(format_percentage(None), "0%");
        assert_eq!(format_percentage(Some(0.0)), "0%");
        assert_eq!(format_percentage(Some(f64::INFINITY)), "0%");
    }

    #[test]
    fn percentage_one_decimal() {
        assert_eq!(format_percentage(Some(97.777)), "97.8%");
        assert_eq!(format_percentage(Some(25.0)), "25.0%");
        assert_eq!(format_percentage(Some(-12.54)), "-12.5%");
        assert_eq!(format_percentage(Some(0.25)), "0.3%");
    }

    #[test]
    fn percentage_rounding_to_zero_matches_exact_zero() {
        assert_eq!(format_percentage(Some(-0.01)), "0%");
        assert_eq!(format_percentage(Some(0.04)), "0%");
        assert_eq!(format_percentage(Some(0.05)), "0.1%");
    }

    #[test]
    fn trend_text() {
        assert_eq!(format_trend(12.5, "last month"), "+12.5% from last month");
        assert_eq!(format_trend(-4.0, "last month"), "-4.0% from last month");
        assert_eq!(format_trend(0.0, "last month"), "0% from last month");
        assert_eq!(format_trend(0.01, "last month"), "0% from last month");
        assert_eq!(format_trend(-0.01, "last month"), "0% from last month");
    }
}
