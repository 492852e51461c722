//! Record source port trait.

use crate::domain::error::KpiError;
use crate::domain::record::{Commission, Expense, MileageLog, Property, RecordSet, TimeEntry};

/// Supplies one user's raw records. Storage is someone else's concern.
pub trait RecordPort {
    fn properties(&self) -> Result<Vec<Property>, KpiError>;
    fn commissions(&self) -> Result<Vec<Commission>, KpiError>;
    fn expenses(&self) -> Result<Vec<Expense>, KpiError>;
    fn time_entries(&self) -> Result<Vec<TimeEntry>, KpiError>;
    fn mileage_logs(&self) -> Result<Vec<MileageLog>, KpiError>;

    /// Default implementation: loads each collection in turn.
    fn load_all(&self) -> Result<RecordSet, KpiError> {
        Ok(RecordSet {
            properties: self.properties()?,
            commissions: self.commissions()?,
            expenses: self.expenses()?,
            time_entries: self.time_entries()?,
            mileage_logs: self.mileage_logs()?,
        })
    }
}
