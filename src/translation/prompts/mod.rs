/*!
 * Prompt engineering for English/Hebrew translation.
 *
 * This module provides:
 * - The instruction template sent to the chat-completion model
 * - The audience lookup table for Hebrew conjugation context
 * - A builder that combines both for a single request
 */

pub mod templates;

// Re-export main types
pub use templates::{
    AUDIENCE_CONTEXTS, PromptTemplate, TranslationPromptBuilder, build_prompt, context_instruction,
};
