//! In-memory preferences store, for tests and one-shot runs.

use crate::domain::error::KpiError;
use crate::domain::preferences::Preferences;
use crate::ports::preferences_port::PreferencesPort;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryPreferencesAdapter {
    stored: Mutex<Option<Preferences>>,
}

impl MemoryPreferencesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(preferences: Preferences) -> Self {
        Self {
            stored: Mutex::new(Some(preferences)),
        }
    }
}

impl PreferencesPort for MemoryPreferencesAdapter {
    fn load(&self) -> Result<Preferences, KpiError> {
        let stored = self.stored.lock().map_err(|e| KpiError::PreferencesStore {
            reason: e.to_string(),
        })?;
        Ok(stored.clone().unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), KpiError> {
        let mut stored = self.stored.lock().map_err(|e| KpiError::PreferencesStore {
            reason: e.to_string(),
        })?;
        *stored = Some(preferences.clone());
        Ok(())
    }
}
