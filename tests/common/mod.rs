#![allow(dead_code)]

use chrono::NaiveDate;
use elitekpi::domain::error::KpiError;
use elitekpi::domain::record::{
    Commission, CommissionType, Expense, ExpenseCategory, MileageLog, Property, PropertyStatus,
    RecordSet, Representation, TimeEntry,
};
use elitekpi::ports::record_port::RecordPort;
use std::fs;
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory record source; `fail_with` makes every load return an error.
pub struct MockRecordPort {
    pub records: RecordSet,
    pub fail_with: Option<String>,
}

impl MockRecordPort {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            records: RecordSet::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    fn check(&self) -> Result<(), KpiError> {
        match &self.fail_with {
            Some(reason) => Err(KpiError::RecordLoad {
                file: "mock".into(),
                line: 0,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl RecordPort for MockRecordPort {
    fn properties(&self) -> Result<Vec<Property>, KpiError> {
        self.check()?;
        Ok(self.records.properties.clone())
    }

    fn commissions(&self) -> Result<Vec<Commission>, KpiError> {
        self.check()?;
        Ok(self.records.commissions.clone())
    }

    fn expenses(&self) -> Result<Vec<Expense>, KpiError> {
        self.check()?;
        Ok(self.records.expenses.clone())
    }

    fn time_entries(&self) -> Result<Vec<TimeEntry>, KpiError> {
        self.check()?;
        Ok(self.records.time_entries.clone())
    }

    fn mileage_logs(&self) -> Result<Vec<MileageLog>, KpiError> {
        self.check()?;
        Ok(self.records.mileage_logs.clone())
    }
}

/// Two months of activity for one agent, January and February 2025, plus a
/// few undated and older records.
///
/// All-time: revenue $21,250, expenses $1,000, gas $34 (one log priced at
/// 25 mpg / $3.50), 90 hours, 2 of 5 properties closed.
/// February vs January: revenue $11,250 vs $10,000.
pub fn sample_records() -> RecordSet {
    let mut oak = Property::new("12 Oak Ave", PropertyStatus::Closed);
    oak.representation = Some(Representation::Seller);
    oak.listing_price = Some(450_000.0);
    oak.sold_price = Some(440_000.0);
    oak.commission_rate = Some(2.5);
    oak.listing_date = Some(date(2025, 1, 5));
    oak.sold_date = Some(date(2025, 2, 14));

    let mut pine = Property::new("7 Pine Rd", PropertyStatus::Closed);
    pine.representation = Some(Representation::Buyer);
    pine.listing_price = Some(300_000.0);
    pine.sold_price = Some(306_000.0);
    pine.listing_date = Some(date(2025, 1, 1));
    pine.sold_date = Some(date(2025, 1, 21));

    let mut birch = Property::new("3 Birch Ln", PropertyStatus::Listed);
    birch.listing_price = Some(525_000.0);
    birch.listing_date = Some(date(2025, 2, 1));

    let mut cedar = Property::new("88 Cedar Ct", PropertyStatus::Pending);
    cedar.listing_price = Some(400_000.0);
    cedar.offer_price = Some(390_000.0);
    cedar.accepted_price = Some(395_000.0);
    cedar.listing_date = Some(date(2025, 2, 10));

    let mut maple = Property::new("19 Maple St", PropertyStatus::Withdrawn);
    maple.listing_date = Some(date(2024, 12, 1));

    RecordSet {
        properties: vec![oak, pine, birch, cedar, maple],
        commissions: vec![
            Commission {
                commission_type: CommissionType::SellerSide,
                amount: Some(11_250.0),
                commission_rate: Some(2.5),
                date_earned: Some(date(2025, 2, 14)),
            },
            Commission {
                commission_type: CommissionType::BuyerSide,
                amount: Some(10_000.0),
                commission_rate: None,
                date_earned: Some(date(2025, 1, 21)),
            },
        ],
        expenses: vec![
            Expense {
                category: ExpenseCategory::Marketing,
                amount: Some(500.0),
                date: Some(date(2025, 1, 10)),
                description: "Listing photos".into(),
            },
            Expense {
                category: ExpenseCategory::Education,
                amount: Some(400.0),
                date: Some(date(2025, 2, 3)),
                description: "CE course".into(),
            },
            Expense {
                category: ExpenseCategory::Meals,
                amount: Some(100.0),
                date: None,
                description: "Client lunch".into(),
            },
        ],
        time_entries: vec![
            TimeEntry {
                hours: Some(40.0),
                date: Some(date(2025, 1, 15)),
                activity: "Showings".into(),
            },
            TimeEntry {
                hours: Some(50.0),
                date: Some(date(2025, 2, 15)),
                activity: "Open house".into(),
            },
        ],
        mileage_logs: vec![
            MileageLog {
                miles: Some(50.0),
                gas_cost: Some(20.0),
                date: Some(date(2025, 1, 12)),
                purpose: "Tour".into(),
            },
            MileageLog {
                miles: Some(100.0),
                gas_cost: None,
                date: Some(date(2025, 2, 12)),
                purpose: "Closing".into(),
            },
        ],
    }
}

/// Writes [`sample_records`] as a CSV data directory.
pub fn write_sample_data_dir(dir: &Path) {
    fs::write(
        dir.join("properties.csv"),
        "address,status,representation,listing_price,offer_price,accepted_price,sold_price,commission_rate,listing_date,sold_date\n\
         12 Oak Ave,closed,seller,\"$450,000\",,,\"$440,000\",2.5,2025-01-05,2025-02-14\n\
         7 Pine Rd,closed,buyer,300000,,,306000,,2025-01-01,2025-01-21\n\
         3 Birch Ln,listed,,525000,,,,,2025-02-01,\n\
         88 Cedar Ct,pending,,400000,390000,395000,,,2025-02-10,\n\
         19 Maple St,withdrawn,,,,,,,2024-12-01,\n",
    )
    .unwrap();
    fs::write(
        dir.join("commissions.csv"),
        "type,amount,commission_rate,date_earned\n\
         seller_side,11250,2.5,2025-02-14\n\
         buyer_side,10000,,2025-01-21\n",
    )
    .unwrap();
    fs::write(
        dir.join("expenses.csv"),
        "category,amount,date,description\n\
         marketing,500,2025-01-10,Listing photos\n\
         education,400,2025-02-03,CE course\n\
         meals,100,,Client lunch\n",
    )
    .unwrap();
    fs::write(
        dir.join("time_entries.csv"),
        "hours,date,activity\n40,2025-01-15,Showings\n50,2025-02-15,Open house\n",
    )
    .unwrap();
    fs::write(
        dir.join("mileage_logs.csv"),
        "miles,gas_cost,date,purpose\n50,20,2025-01-12,Tour\n100,,2025-02-12,Closing\n",
    )
    .unwrap();
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
