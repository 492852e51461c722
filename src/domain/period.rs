//! Reporting windows and record filtering.

use crate::domain::error::KpiError;
use crate::domain::record::RecordSet;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    AllTime,
    Month { year: i32, month: u32 },
}

impl ReportPeriod {
    /// Parses `all`, `month` (the month containing `today`) or `YYYY-MM`.
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, KpiError> {
        let trimmed = input.trim().to_lowercase();
        match trimmed.as_str() {
            "all" | "" => Ok(ReportPeriod::AllTime),
            "month" => Ok(ReportPeriod::containing(today)),
            other => {
                let invalid = || KpiError::ConfigInvalid {
                    section: "report".into(),
                    key: "period".into(),
                    reason: format!("'{other}' is not 'all', 'month' or YYYY-MM"),
                };
                let (year, month) = other.split_once('-').ok_or_else(invalid)?;
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(ReportPeriod::Month { year, month })
            }
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        ReportPeriod::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The window immediately before this one. All-time has none.
    pub fn previous(&self) -> Option<Self> {
        match *self {
            ReportPeriod::AllTime => None,
            ReportPeriod::Month { year, month: 1 } => Some(ReportPeriod::Month {
                year: year - 1,
                month: 12,
            }),
            ReportPeriod::Month { year, month } => Some(ReportPeriod::Month {
                year,
                month: month - 1,
            }),
        }
    }

    /// Undated records belong only to the all-time window.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match (self, date) {
            (ReportPeriod::AllTime, _) => true,
            (ReportPeriod::Month { year, month }, Some(d)) => d.year() == *year && d.month() == *month,
            (ReportPeriod::Month { .. }, None) => false,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            ReportPeriod::AllTime => "All Time".to_string(),
            ReportPeriod::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_else(|| format!("{year}-{month:02}")),
        }
    }

    /// Properties are placed by sold date, falling back to listing date.
    pub fn filter(&self, records: &RecordSet) -> RecordSet {
        if *self == ReportPeriod::AllTime {
            return records.clone();
        }
        RecordSet {
            properties: records
                .properties
                .iter()
                .filter(|p| self.contains(p.sold_date.or(p.listing_date)))
                .cloned()
                .collect(),
            commissions: records
                .commissions
                .iter()
                .filter(|c| self.contains(c.date_earned))
                .cloned()
                .collect(),
            expenses: records
                .expenses
                .iter()
                .filter(|e| self.contains(e.date))
                .cloned()
                .collect(),
            time_entries: records
                .time_entries
                .iter()
                .filter(|t| self.contains(t.date))
                .cloned()
                .collect(),
            mileage_logs: records
                .mileage_logs
                .iter()
                .filter(|m| self.contains(m.date))
                .cloned()
                .collect(),
        }
    }
}
