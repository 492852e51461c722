//! Raw records supplied by the persistence layer.
//!
//! Every numeric and date field is optional. The calculator treats a missing
//! value the same as zero, so nothing here validates ranges.

use crate::domain::error::KpiError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyStatus {
    InProgress,
    Listed,
    OfferWritten,
    ActiveUnderContract,
    Pending,
    Closed,
    LostDeal,
    Withdrawn,
    Expired,
    Terminated,
    FiredClient,
    GotFired,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 12] = [
        PropertyStatus::InProgress,
        PropertyStatus::Listed,
        PropertyStatus::OfferWritten,
        PropertyStatus::ActiveUnderContract,
        PropertyStatus::Pending,
        PropertyStatus::Closed,
        PropertyStatus::LostDeal,
        PropertyStatus::Withdrawn,
        PropertyStatus::Expired,
        PropertyStatus::Terminated,
        PropertyStatus::FiredClient,
        PropertyStatus::GotFired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::InProgress => "in_progress",
            PropertyStatus::Listed => "listed",
            PropertyStatus::OfferWritten => "offer_written",
            PropertyStatus::ActiveUnderContract => "active_under_contract",
            PropertyStatus::Pending => "pending",
            PropertyStatus::Closed => "closed",
            PropertyStatus::LostDeal => "lost_deal",
            PropertyStatus::Withdrawn => "withdrawn",
            PropertyStatus::Expired => "expired",
            PropertyStatus::Terminated => "terminated",
            PropertyStatus::FiredClient => "fired_client",
            PropertyStatus::GotFired => "got_fired",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PropertyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| KpiError::UnknownVariant {
                kind: "property status",
                value: s.to_string(),
            })
    }
}

/// Which side of the transaction the agent represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Buyer,
    Seller,
}

impl FromStr for Representation {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buyer" => Ok(Representation::Buyer),
            "seller" => Ok(Representation::Seller),
            _ => Err(KpiError::UnknownVariant {
                kind: "representation",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommissionType {
    BuyerSide,
    SellerSide,
    Referral,
}

impl CommissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionType::BuyerSide => "buyer_side",
            CommissionType::SellerSide => "seller_side",
            CommissionType::Referral => "referral",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommissionType::BuyerSide => "Buyer Side",
            CommissionType::SellerSide => "Seller Side",
            CommissionType::Referral => "Referral",
        }
    }
}

impl fmt::Display for CommissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommissionType {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buyer_side" => Ok(CommissionType::BuyerSide),
            "seller_side" => Ok(CommissionType::SellerSide),
            "referral" => Ok(CommissionType::Referral),
            _ => Err(KpiError::UnknownVariant {
                kind: "commission type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Marketing,
    Gas,
    Mileage,
    Meals,
    Supplies,
    ProfessionalServices,
    Education,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Marketing,
        ExpenseCategory::Gas,
        ExpenseCategory::Mileage,
        ExpenseCategory::Meals,
        ExpenseCategory::Supplies,
        ExpenseCategory::ProfessionalServices,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Gas => "gas",
            ExpenseCategory::Mileage => "mileage",
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::ProfessionalServices => "professional_services",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Gas => "Gas",
            ExpenseCategory::Mileage => "Mileage",
            ExpenseCategory::Meals => "Meals",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::ProfessionalServices => "Professional Services",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| KpiError::UnknownVariant {
                kind: "expense category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub address: String,
    pub status: PropertyStatus,
    pub representation: Option<Representation>,
    pub listing_price: Option<f64>,
    pub offer_price: Option<f64>,
    pub accepted_price: Option<f64>,
    pub sold_price: Option<f64>,
    pub commission_rate: Option<f64>,
    pub listing_date: Option<NaiveDate>,
    pub sold_date: Option<NaiveDate>,
}

impl Property {
    pub fn new(address: impl Into<String>, status: PropertyStatus) -> Self {
        Self {
            address: address.into(),
            status,
            representation: None,
            listing_price: None,
            offer_price: None,
            accepted_price: None,
            sold_price: None,
            commission_rate: None,
            listing_date: None,
            sold_date: None,
        }
    }

    /// Best known deal value: accepted, then offer, then listing price.
    pub fn contract_value(&self) -> f64 {
        self.accepted_price
            .or(self.offer_price)
            .or(self.listing_price)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Commission {
    pub commission_type: CommissionType,
    pub amount: Option<f64>,
    pub commission_rate: Option<f64>,
    pub date_earned: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub category: ExpenseCategory,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub hours: Option<f64>,
    pub date: Option<NaiveDate>,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MileageLog {
    pub miles: Option<f64>,
    pub gas_cost: Option<f64>,
    pub date: Option<NaiveDate>,
    pub purpose: String,
}

/// One user's snapshot of every record collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub properties: Vec<Property>,
    pub commissions: Vec<Commission>,
    pub expenses: Vec<Expense>,
    pub time_entries: Vec<TimeEntry>,
    pub mileage_logs: Vec<MileageLog>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.commissions.is_empty()
            && self.expenses.is_empty()
            && self.time_entries.is_empty()
            && self.mileage_logs.is_empty()
    }
}

/// Lenient monetary parse used at the loading boundary.
///
/// Strips whitespace, a leading `$` (after an optional sign) and thousands
/// separators. Anything else that fails to parse, including NaN and
/// infinities, yields `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = rest
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
