//! # JSON Settings Repository
//!
//! File-based storage for the user settings object, kept in a single
//! `settings.json` at the root of the data directory.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "currency_code": "USD",
//!   "created_at": "2024-01-21T19:30:00Z",
//!   "updated_at": "2024-01-21T19:35:00Z"
//! }
//! ```
//!
//! The file is created on first read with default values and rewritten
//! atomically (temp file + rename) on every update.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::JsonConnection;

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Code of the user's selected display currency.
    pub currency_code: String,
    /// When the settings file was first created.
    pub created_at: String,
    /// When the settings were last updated.
    pub updated_at: String,
}

impl Default for Settings {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            currency_code: "USD".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for user settings operations.
pub trait SettingsStorage: Send + Sync {
    /// Get the settings, creating the default file if none exists.
    fn get_settings(&self) -> Result<Settings>;

    /// Persist updated settings.
    fn update_settings(&self, settings: &Settings) -> Result<()>;
}

/// JSON-file-backed settings repository.
#[derive(Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn settings_path(&self) -> PathBuf {
        self.connection.settings_file_path()
    }

    /// Load settings from file, creating the default if it doesn't exist.
    fn load_or_create_settings(&self) -> Result<Settings> {
        let settings_path = self.settings_path();

        if settings_path.exists() {
            let contents = fs::read_to_string(&settings_path)?;
            let settings: Settings = serde_json::from_str(&contents)?;
            debug!("Loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            let settings = Settings::default();
            self.save_settings(&settings)?;
            info!("Created default settings at {}", settings_path.display());
            Ok(settings)
        }
    }

    /// Save settings to file using the atomic write pattern.
    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let settings_path = self.settings_path();
        let contents = serde_json::to_string_pretty(settings)?;

        let temp_path = settings_path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &settings_path)?;

        debug!("Saved settings to {}", settings_path.display());
        Ok(())
    }
}

impl SettingsStorage for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        self.load_or_create_settings()
    }

    fn update_settings(&self, settings: &Settings) -> Result<()> {
        let mut updated = settings.clone();
        updated.updated_at = Utc::now().to_rfc3339();
        self.save_settings(&updated)?;
        info!("Updated settings (currency: {})", updated.currency_code);
        Ok(())
    }
}
