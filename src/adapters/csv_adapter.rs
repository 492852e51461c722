//! CSV record adapter.
//!
//! Reads one file per collection from a data directory. Columns are matched
//! by header name so exports with extra or reordered columns still load. A
//! missing file is an empty collection.

use crate::domain::error::KpiError;
use crate::domain::record::{
    parse_amount, parse_date, Commission, Expense, MileageLog, Property, TimeEntry,
};
use crate::ports::record_port::RecordPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const PROPERTIES_FILE: &str = "properties.csv";
pub const COMMISSIONS_FILE: &str = "commissions.csv";
pub const EXPENSES_FILE: &str = "expenses.csv";
pub const TIME_ENTRIES_FILE: &str = "time_entries.csv";
pub const MILEAGE_LOGS_FILE: &str = "mileage_logs.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

/// One data row plus the header it was read under.
struct Row<'a> {
    file: &'static str,
    line: u64,
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn text(&self, column: &str) -> Option<&str> {
        let index = self
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))?;
        self.record.get(index).map(str::trim).filter(|v| !v.is_empty())
    }

    fn owned_text(&self, column: &str) -> String {
        self.text(column).unwrap_or_default().to_string()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        self.text(column).and_then(parse_amount)
    }

    fn date(&self, column: &str) -> Option<NaiveDate> {
        self.text(column).and_then(parse_date)
    }

    fn required(&self, column: &str) -> Result<&str, KpiError> {
        self.text(column).ok_or_else(|| self.error(format!("missing {column}")))
    }

    fn parsed<T>(&self, column: &str) -> Result<T, KpiError>
    where
        T: std::str::FromStr<Err = KpiError>,
    {
        self.required(column)?
            .parse()
            .map_err(|e: KpiError| self.error(e.to_string()))
    }

    fn error(&self, reason: String) -> KpiError {
        KpiError::RecordLoad {
            file: self.file.to_string(),
            line: self.line,
            reason,
        }
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_rows<T>(
        &self,
        file: &'static str,
        mut convert: impl FnMut(&Row<'_>) -> Result<T, KpiError>,
    ) -> Result<Vec<T>, KpiError> {
        let path = self.base_path.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "record file absent, treating as empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| KpiError::RecordLoad {
                file: file.to_string(),
                line: 1,
                reason: format!("CSV header error: {e}"),
            })?
            .clone();

        let mut out = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| KpiError::RecordLoad {
                file: file.to_string(),
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: format!("CSV parse error: {e}"),
            })?;
            let row = Row {
                file,
                line: record.position().map(|p| p.line()).unwrap_or(0),
                headers: &headers,
                record: &record,
            };
            out.push(convert(&row)?);
        }

        debug!(path = %path.display(), rows = out.len(), "loaded records");
        Ok(out)
    }
}

impl RecordPort for CsvAdapter {
    fn properties(&self) -> Result<Vec<Property>, KpiError> {
        self.read_rows(PROPERTIES_FILE, |row| {
            let mut property = Property::new(row.owned_text("address"), row.parsed("status")?);
            property.representation = match row.text("representation") {
                Some(_) => Some(row.parsed("representation")?),
                None => None,
            };
            property.listing_price = row.amount("listing_price");
            property.offer_price = row.amount("offer_price");
            property.accepted_price = row.amount("accepted_price");
            property.sold_price = row.amount("sold_price");
            property.commission_rate = row.amount("commission_rate");
            property.listing_date = row.date("listing_date");
            property.sold_date = row.date("sold_date");
            Ok(property)
        })
    }

    fn commissions(&self) -> Result<Vec<Commission>, KpiError> {
        self.read_rows(COMMISSIONS_FILE, |row| {
            Ok(Commission {
                commission_type: row.parsed("type")?,
                amount: row.amount("amount"),
                commission_rate: row.amount("commission_rate"),
                date_earned: row.date("date_earned"),
            })
        })
    }

    fn expenses(&self) -> Result<Vec<Expense>, KpiError> {
        self.read_rows(EXPENSES_FILE, |row| {
            Ok(Expense {
                category: row.parsed("category")?,
                amount: row.amount("amount"),
                date: row.date("date"),
                description: row.owned_text("description"),
            })
        })
    }

    fn time_entries(&self) -> Result<Vec<TimeEntry>, KpiError> {
        self.read_rows(TIME_ENTRIES_FILE, |row| {
            Ok(TimeEntry {
                hours: row.amount("hours"),
                date: row.date("date"),
                activity: row.owned_text("activity"),
            })
        })
    }

    fn mileage_logs(&self) -> Result<Vec<MileageLog>, KpiError> {
        self.read_rows(MILEAGE_LOGS_FILE, |row| {
            Ok(MileageLog {
                miles: row.amount("miles"),
                gas_cost: row.amount("gas_cost"),
                date: row.date("date"),
                purpose: row.owned_text("purpose"),
            })
        })
    }
}
