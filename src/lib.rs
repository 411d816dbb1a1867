/*!
 * # BABA - gender-aware English/Hebrew translation
 *
 * A Rust library for translating short texts between English and Hebrew
 * with a chat-completion model, taking the speaker's gender and the
 * audience into account so Hebrew output uses the right conjugations.
 *
 * ## Features
 *
 * - Script-based detection of the source language
 * - Prompt construction with audience-specific Hebrew grammar context
 * - Single-attempt translation with a deterministic placeholder on failure
 * - Persistent user settings in a local key-value store
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `models`: Languages, genders, audiences, requests and results
 * - `language_utils`: Language detection and ISO language code parsing
 * - `translation`: Prompt building and the translation service:
 *   - `translation::prompts`: Prompt template and audience context table
 *   - `translation::core`: Translation service with fail-soft fallback
 * - `providers`: Chat-completion clients:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::mock`: Test double
 * - `storage`: SQLite-backed key-value store
 * - `settings`: User settings persisted in the key-value store
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod models;
pub mod providers;
pub mod settings;
pub mod storage;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, SettingsError, TranslationError};
pub use language_utils::detect_language;
pub use models::{AudienceType, Gender, Language, TranslationRequest, TranslationResult, UserSettings};
pub use settings::SettingsStore;
pub use translation::{TranslationService, build_prompt};
