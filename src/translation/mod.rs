/*!
 * Translation service for English/Hebrew text using a chat-completion provider.
 *
 * This module is split into two submodules:
 *
 * - `core`: The translation service, its fail-soft fallback and outcome reporting
 * - `prompts`: Prompt templates and the audience context table
 */

// Re-export main types for easier usage
pub use self::core::{TranslationOutcome, TranslationReport, TranslationService};

// Re-export prompt types
pub use self::prompts::{PromptTemplate, TranslationPromptBuilder, build_prompt};

// Submodules
pub mod core;
pub mod prompts;
