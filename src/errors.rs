/*!
 * Error types for the baba application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether the error came from a missing or rejected credential
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::AuthenticationError(_) => true,
            Self::ApiError { status_code, .. } => *status_code == 401 || *status_code == 403,
            _ => false,
        }
    }

    /// Whether the API reported a quota or rate limit problem
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::ApiError { status_code: 429, .. })
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Source and target language are the same
    #[error("Cannot translate from {0} into itself")]
    SameLanguage(String),
}

/// Errors raised by the key-value storage and the settings store
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The underlying key-value store failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite rejected a statement or could not open the database
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The stored record could not be (de)serialized
    #[error("Invalid settings record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<anyhow::Error> for SettingsError {
    fn from(error: anyhow::Error) -> Self {
        Self::Storage(format!("{:#}", error))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Input text was empty or whitespace only
    #[error("Nothing to translate: input text is empty")]
    EmptyInput,

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the settings store
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
