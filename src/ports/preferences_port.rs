//! Settings repository port trait.

use crate::domain::error::KpiError;
use crate::domain::preferences::Preferences;

/// Single read/write point for the persisted preferences record.
pub trait PreferencesPort {
    /// A store that has never been written loads as `Preferences::default()`.
    fn load(&self) -> Result<Preferences, KpiError>;
    fn save(&self, preferences: &Preferences) -> Result<(), KpiError>;

    /// Load, apply `change`, save. Returns the saved record.
    fn update(&self, change: &dyn Fn(&mut Preferences)) -> Result<Preferences, KpiError> {
        let mut preferences = self.load()?;
        change(&mut preferences);
        self.save(&preferences)?;
        Ok(preferences)
    }
}
