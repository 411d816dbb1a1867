/*!
 * Persistent user settings.
 *
 * The whole `UserSettings` record is stored as one JSON value under
 * [`SETTINGS_KEY`]. Reads never fail: a missing, unreadable or corrupted
 * record yields the defaults. Mutators read the latest stored record,
 * change one field and write the whole record back, so concurrent
 * mutators race and the last write wins.
 */

use log::{debug, error, warn};

use crate::errors::SettingsError;
use crate::models::{Gender, Language, UserSettings};
use crate::storage::KeyValueStore;

/// Storage key of the settings record
pub const SETTINGS_KEY: &str = "@baba_user_settings";

/// Settings service backed by a key-value store
#[derive(Debug, Clone)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Create a settings store on top of a key-value store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Read the stored record, reporting storage and parse failures
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    pub async fn try_load(&self) -> Result<Option<UserSettings>, SettingsError> {
        match self.store.get_item(SETTINGS_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Read the stored record, falling back to the defaults
    pub async fn load(&self) -> UserSettings {
        match self.try_load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!("No stored settings, using defaults");
                UserSettings::default()
            }
            Err(e) => {
                error!("Error loading user settings: {}", e);
                UserSettings::default()
            }
        }
    }

    /// Write the whole record
    ///
    /// Failures are logged and returned; callers may ignore them.
    pub async fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        let result = match serde_json::to_string(settings) {
            Ok(json) => self.store.set_item(SETTINGS_KEY, &json).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            error!("Error saving user settings: {}", e);
        }
        result
    }

    /// Change the stored gender, keeping the other fields
    pub async fn set_gender(&self, gender: Gender) -> Result<UserSettings, SettingsError> {
        let mut settings = self.load().await;
        settings.user_gender = gender;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Change the stored preferred language, keeping the other fields
    pub async fn set_preferred_language(&self, language: Language) -> Result<UserSettings, SettingsError> {
        let mut settings = self.load().await;
        settings.preferred_language = language;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Forget the stored record so the defaults apply again
    pub async fn reset(&self) -> Result<(), SettingsError> {
        self.store.remove_item(SETTINGS_KEY).await.inspect_err(|e| {
            warn!("Error resetting user settings: {}", e);
        })
    }
}
