use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::models::{AudienceType, Gender, Language, TranslationRequest, UserSettings};
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use crate::settings::SettingsStore;
use crate::storage::SqliteStore;
use crate::translation::{TranslationReport, TranslationService};

// @module: Application controller tying settings, detection and translation together

/// Main application controller
pub struct Controller<P = OpenAI> {
    // @field: Persisted user preferences
    settings: SettingsStore<SqliteStore>,
    // @field: Translation client
    service: TranslationService<P>,
}

impl Controller<OpenAI> {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        let store = match config.storage.database_path() {
            Some(path) => SqliteStore::open(path),
            None => SqliteStore::open_default(),
        }
        .context("Failed to open settings storage")?;

        let service = TranslationService::new(&config.translation);
        Ok(Self::with_parts(SettingsStore::new(store), service))
    }
}

impl<P> Controller<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    // @method: Assemble a controller from already built services
    pub fn with_parts(settings: SettingsStore<SqliteStore>, service: TranslationService<P>) -> Self {
        Self { settings, service }
    }

    /// Verify that the translation API accepts the configured credential
    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.service.provider().test_connection().await?;
        info!("Translation API is reachable");
        Ok(())
    }

    /// Translate user input addressed to the given audience
    ///
    /// Empty input is rejected before any request is made. The direction is
    /// detected from the text and flipped; the speaker's gender comes from
    /// the stored settings.
    pub async fn translate_text(&self, text: &str, audience: AudienceType) -> Result<TranslationReport, AppError> {
        if text.trim().is_empty() {
            warn!("Nothing to translate");
            return Err(AppError::EmptyInput);
        }

        let settings = self.settings.load().await;
        let request = TranslationRequest::detected(text, settings.user_gender, audience);
        info!(
            "Translating from {} to {} ({})",
            request.from_language.display_name(),
            request.to_language.display_name(),
            audience.label()
        );

        let report = self.service.translate_with_outcome(&request).await;
        if report.outcome.is_fallback() {
            debug!("Returned placeholder translation for {:?}", request.text);
        }
        Ok(report)
    }

    /// Current user settings
    pub async fn settings(&self) -> UserSettings {
        self.settings.load().await
    }

    /// Store the user's gender
    pub async fn set_gender(&self, gender: Gender) -> Result<UserSettings, AppError> {
        let settings = self.settings.set_gender(gender).await?;
        info!("Gender set to {}", gender);
        Ok(settings)
    }

    /// Store the user's preferred language
    pub async fn set_preferred_language(&self, language: Language) -> Result<UserSettings, AppError> {
        let settings = self.settings.set_preferred_language(language).await?;
        info!("Preferred language set to {}", language.display_name());
        Ok(settings)
    }

    /// Restore default settings
    pub async fn reset_settings(&self) -> Result<UserSettings, AppError> {
        self.settings.reset().await?;
        Ok(self.settings.load().await)
    }
}
