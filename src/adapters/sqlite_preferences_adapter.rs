//! SQLite preferences store.
//!
//! One row per preference key, scoped by profile so several agents can share
//! a database file.

use crate::domain::error::KpiError;
use crate::domain::preferences::Preferences;
use crate::ports::config_port::ConfigPort;
use crate::ports::preferences_port::PreferencesPort;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::collections::HashMap;

pub const DEFAULT_PROFILE: &str = "default";

pub struct SqlitePreferencesAdapter {
    pool: Pool<SqliteConnectionManager>,
    profile: String,
}

fn store_error(e: impl std::fmt::Display) -> KpiError {
    KpiError::PreferencesStore {
        reason: e.to_string(),
    }
}

impl SqlitePreferencesAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, KpiError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| KpiError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;
        let profile = config
            .get_string("sqlite", "profile")
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let pool_size = config.get_int("sqlite", "pool_size", 2).max(1) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(store_error)?;

        let adapter = Self { pool, profile };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    pub fn in_memory(profile: &str) -> Result<Self, KpiError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(store_error)?;

        let adapter = Self {
            pool,
            profile: profile.to_string(),
        };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    fn initialize_schema(&self) -> Result<(), KpiError> {
        let conn = self.pool.get().map_err(store_error)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS preferences (
                profile TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (profile, key)
            );",
        )
        .map_err(store_error)?;
        Ok(())
    }
}

impl PreferencesPort for SqlitePreferencesAdapter {
    fn load(&self) -> Result<Preferences, KpiError> {
        let conn = self.pool.get().map_err(store_error)?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM preferences WHERE profile = ?1")
            .map_err(store_error)?;
        let rows = stmt
            .query_map(params![self.profile], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(store_error)?;

        let mut values = HashMap::new();
        for row in rows {
            let (key, value) = row.map_err(store_error)?;
            values.insert(key, value);
        }

        Ok(Preferences::from_lookup(|key| values.get(key).cloned()))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), KpiError> {
        let mut conn = self.pool.get().map_err(store_error)?;
        let tx = conn.transaction().map_err(store_error)?;
        for (key, value) in preferences.to_pairs() {
            tx.execute(
                "INSERT OR REPLACE INTO preferences (profile, key, value) VALUES (?1, ?2, ?3)",
                params![self.profile, key, value],
            )
            .map_err(store_error)?;
        }
        tx.commit().map_err(store_error)?;
        tracing::debug!(profile = %self.profile, "saved preferences");
        Ok(())
    }
}
