//! Core domain types and the metrics engine.

pub mod record;
pub mod calculator;
pub mod format;
pub mod metrics;
pub mod period;
pub mod report;
pub mod preferences;
pub mod config_validation;
pub mod error;
