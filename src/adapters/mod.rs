//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod html_report_adapter;
pub mod ini_preferences_adapter;
pub mod memory_preferences_adapter;
pub mod outbox_email_adapter;
pub mod sms_log_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_preferences_adapter;
