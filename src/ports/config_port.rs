//! Settings lookup port trait.

/// Sectioned key/value settings (`[mileage] mpg`, `[email] outbox`, ...).
///
/// Typed getters return `default` when the key is absent or unparseable;
/// range checks live in `domain::config_validation`.
pub trait ConfigPort {
    /// Trimmed value, `None` when absent or blank.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
