//! Currency preference service.
//!
//! The tracker core computes raw numeric amounts only; this service manages
//! which display currency the UI formats them with. The preference is kept in
//! the settings file and falls back to the default currency whenever the
//! stored code is unknown.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use shared::Currency;

use crate::storage::json::{JsonConnection, SettingsRepository, SettingsStorage};

/// Service for reading and updating the user's display currency.
#[derive(Clone)]
pub struct CurrencyService {
    settings_repository: SettingsRepository,
}

impl CurrencyService {
    /// Create a new CurrencyService.
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let settings_repository = SettingsRepository::new((*connection).clone());
        Self {
            settings_repository,
        }
    }

    /// The currencies available for selection.
    pub fn supported_currencies(&self) -> Vec<Currency> {
        Currency::supported()
    }

    /// The user's selected currency, or the default when none is stored or
    /// the stored code is no longer supported.
    pub fn user_currency(&self) -> Result<Currency> {
        let settings = self.settings_repository.get_settings()?;

        match Currency::find(&settings.currency_code) {
            Some(currency) => Ok(currency),
            None => {
                warn!(
                    "Stored currency code '{}' is not supported, using default",
                    settings.currency_code
                );
                Ok(Currency::default())
            }
        }
    }

    /// Persist a new currency selection. Unknown codes are rejected.
    pub fn set_user_currency(&self, code: &str) -> Result<Currency> {
        let currency = Currency::find(code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported currency code: {}", code))?;

        let mut settings = self.settings_repository.get_settings()?;
        settings.currency_code = currency.code.clone();
        self.settings_repository.update_settings(&settings)?;

        info!("Set user currency to {} ({})", currency.code, currency.name);
        Ok(currency)
    }

    /// Format an amount in the user's selected currency.
    pub fn format_amount(&self, amount: f64) -> Result<String> {
        Ok(self.user_currency()?.format(amount))
    }
}
