//! Persisted per-user UI preferences.
//!
//! Loaded once at startup through a [`PreferencesPort`] and passed
//! explicitly to whatever needs it.
//!
//! [`PreferencesPort`]: crate::ports::preferences_port::PreferencesPort

use crate::domain::error::KpiError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(KpiError::UnknownVariant {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub tutorial_completed_steps: BTreeSet<String>,
    pub tutorial_dismissed: bool,
    pub dismissed_notices: BTreeSet<String>,
}

impl Preferences {
    /// Returns false if the step was already recorded.
    pub fn complete_step(&mut self, step: &str) -> bool {
        self.tutorial_completed_steps.insert(step.trim().to_string())
    }

    /// Returns false if the notice was already dismissed.
    pub fn dismiss_notice(&mut self, notice: &str) -> bool {
        self.dismissed_notices.insert(notice.trim().to_string())
    }

    pub fn is_notice_dismissed(&self, notice: &str) -> bool {
        self.dismissed_notices.contains(notice.trim())
    }

    /// Tutorial shows until dismissed or every listed step is done.
    pub fn should_show_tutorial(&self, steps: &[&str]) -> bool {
        !self.tutorial_dismissed
            && !steps
                .iter()
                .all(|step| self.tutorial_completed_steps.contains(*step))
    }

    pub fn reset_tutorial(&mut self) {
        self.tutorial_completed_steps.clear();
        self.tutorial_dismissed = false;
    }
}

pub(crate) const KEY_THEME: &str = "theme";
pub(crate) const KEY_STEPS: &str = "tutorial_completed_steps";
pub(crate) const KEY_DISMISSED: &str = "tutorial_dismissed";
pub(crate) const KEY_NOTICES: &str = "dismissed_notices";

impl Preferences {
    /// Flat key/value form shared by the INI and SQLite stores.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_THEME, self.theme.to_string()),
            (KEY_STEPS, join_set(&self.tutorial_completed_steps)),
            (KEY_DISMISSED, self.tutorial_dismissed.to_string()),
            (KEY_NOTICES, join_set(&self.dismissed_notices)),
        ]
    }

    /// Inverse of [`Preferences::to_pairs`]. Unreadable values fall back to
    /// their defaults rather than failing the load.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let theme = match lookup(KEY_THEME) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown stored theme, using default");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Preferences {
            theme,
            tutorial_completed_steps: lookup(KEY_STEPS).map(|v| split_set(&v)).unwrap_or_default(),
            tutorial_dismissed: lookup(KEY_DISMISSED)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            dismissed_notices: lookup(KEY_NOTICES).map(|v| split_set(&v)).unwrap_or_default(),
        }
    }
}

/// Comma-joined form used by the flat key/value stores. Each entry is
/// percent-encoded so separators and INI comment characters survive.
pub(crate) fn join_set(set: &BTreeSet<String>) -> String {
    set.iter()
        .map(|entry| urlencoding::encode(entry).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn split_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match urlencoding::decode(entry) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => entry.to_string(),
        })
        .collect()
}
