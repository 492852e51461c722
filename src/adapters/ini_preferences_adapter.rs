//! INI file preferences store.
//!
//! Everything lives under a single `[preferences]` section. A file that does
//! not exist yet loads as the default record.

use crate::domain::error::KpiError;
use crate::domain::preferences::Preferences;
use crate::ports::preferences_port::PreferencesPort;
use configparser::ini::Ini;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const SECTION: &str = "preferences";

pub struct IniPreferencesAdapter {
    path: PathBuf,
}

impl IniPreferencesAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PreferencesPort for IniPreferencesAdapter {
    fn load(&self) -> Result<Preferences, KpiError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preferences file, using defaults");
            return Ok(Preferences::default());
        }
        let mut ini = Ini::new();
        ini.load(&self.path)
            .map_err(|reason| KpiError::PreferencesStore { reason })?;
        Ok(Preferences::from_lookup(|key| ini.get(SECTION, key)))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), KpiError> {
        let mut ini = Ini::new();
        for (key, value) in preferences.to_pairs() {
            ini.set(SECTION, key, Some(value));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        ini.write(&self.path)?;
        debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
