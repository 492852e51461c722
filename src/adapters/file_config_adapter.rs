//! INI file configuration adapter.

use crate::domain::error::KpiError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use tracing::debug;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KpiError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| KpiError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, KpiError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| KpiError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// No file given: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[report]
user_name = Jordan Lee
period = month

[email]
from = reports@elitekpi.test
outbox = /var/spool/elitekpi
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("report", "user_name"),
            Some("Jordan Lee".to_string())
        );
        assert_eq!(
            adapter.get_string("email", "outbox"),
            Some("/var/spool/elitekpi".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[report]\nperiod = all\n").unwrap();
        assert_eq!(adapter.get_string("report", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[sqlite]\npool_size = 4\nprofile = jordan\n").unwrap();
        assert_eq!(adapter.get_int("sqlite", "pool_size", 2), 4);
        assert_eq!(adapter.get_int("sqlite", "missing", 2), 2);
        assert_eq!(adapter.get_int("sqlite", "profile", 2), 2);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[mileage]\nmpg = 27.5\ngas_price = cheap\n").unwrap();
        assert_eq!(adapter.get_double("mileage", "mpg", 0.0), 27.5);
        assert_eq!(adapter.get_double("mileage", "gas_price", 3.5), 3.5);
        assert_eq!(adapter.get_double("mileage", "missing", 99.9), 99.9);
    }

    #[test]
    fn get_bool_parses_common_spellings() {
        for (raw, expected) in [("true", true), ("Yes", true), ("1", true), ("false", false), ("no", false), ("0", false)] {
            let adapter =
                FileConfigAdapter::from_string(&format!("[report]\ndeliver = {raw}\n")).unwrap();
            assert_eq!(adapter.get_bool("report", "deliver", !expected), expected, "{raw}");
        }
        let adapter = FileConfigAdapter::from_string("[report]\ndeliver = maybe\n").unwrap();
        assert!(adapter.get_bool("report", "deliver", true));
        assert!(!adapter.get_bool("report", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[preferences]\npath = /tmp/prefs.ini\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("preferences", "path"),
            Some("/tmp/prefs.ini".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/elitekpi.ini");
        assert!(matches!(result, Err(KpiError::ConfigParse { .. })));
    }

    #[test]
    fn blank_values_read_as_missing() {
        let adapter = FileConfigAdapter::from_string("[sms]\nphone =   \n").unwrap();
        assert_eq!(adapter.get_string("sms", "phone"), None);
    }

    #[test]
    fn empty_adapter_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("report", "period"), None);
        assert_eq!(adapter.get_double("mileage", "mpg", 25.0), 25.0);
    }
}
