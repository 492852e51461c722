//! Configuration validation.
//!
//! Runs before any report is built so bad settings surface as config errors
//! rather than as silently zeroed metrics.

use crate::domain::error::KpiError;
use crate::domain::metrics::{DEFAULT_GAS_PRICE, DEFAULT_MPG, MileageRates};
use crate::domain::period::ReportPeriod;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_report_config(config: &dyn ConfigPort, today: NaiveDate) -> Result<(), KpiError> {
    validate_mpg(config)?;
    validate_gas_price(config)?;
    validate_period(config, today)?;
    validate_email(config)?;
    Ok(())
}

/// Mileage rates from `[mileage]`, defaulted when absent.
pub fn mileage_rates(config: &dyn ConfigPort) -> MileageRates {
    MileageRates {
        mpg: config.get_double("mileage", "mpg", DEFAULT_MPG),
        gas_price: config.get_double("mileage", "gas_price", DEFAULT_GAS_PRICE),
    }
}

/// Raw `[mileage] key` as a finite number; `None` when absent.
fn mileage_value(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, KpiError> {
    let Some(raw) = config.get_string("mileage", key) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(KpiError::ConfigInvalid {
            section: "mileage".to_string(),
            key: key.to_string(),
            reason: format!("'{raw}' is not a finite number"),
        }),
    }
}

fn validate_mpg(config: &dyn ConfigPort) -> Result<(), KpiError> {
    if let Some(value) = mileage_value(config, "mpg")? {
        if value <= 0.0 {
            return Err(KpiError::ConfigInvalid {
                section: "mileage".to_string(),
                key: "mpg".to_string(),
                reason: "mpg must be positive".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_gas_price(config: &dyn ConfigPort) -> Result<(), KpiError> {
    if let Some(value) = mileage_value(config, "gas_price")? {
        if value < 0.0 {
            return Err(KpiError::ConfigInvalid {
                section: "mileage".to_string(),
                key: "gas_price".to_string(),
                reason: "gas_price must be non-negative".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_period(config: &dyn ConfigPort, today: NaiveDate) -> Result<(), KpiError> {
    match config.get_string("report", "period") {
        Some(period) => ReportPeriod::parse(&period, today).map(|_| ()),
        None => Ok(()),
    }
}

fn validate_email(config: &dyn ConfigPort) -> Result<(), KpiError> {
    for key in ["from", "to"] {
        if let Some(address) = config.get_string("email", key) {
            let address = address.trim();
            if !address.is_empty() && !address.contains('@') {
                return Err(KpiError::ConfigInvalid {
                    section: "email".to_string(),
                    key: key.to_string(),
                    reason: format!("'{address}' is not an email address"),
                });
            }
        }
    }
    Ok(())
}
